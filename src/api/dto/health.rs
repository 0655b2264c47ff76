//! DTOs for health check endpoint.

use serde::{Deserialize, Serialize};

/// Liveness report for container probes.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `"healthy"` while the process serves requests.
    pub status: String,
    pub service: String,
    /// RFC 3339 UTC time the response was produced.
    pub timestamp: String,
    /// Whole seconds since server start.
    pub uptime: u64,
    pub message: String,
}
