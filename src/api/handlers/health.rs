//! Handler for health check endpoint.

use axum::{
    Json,
    extract::State,
    http::header::{CACHE_CONTROL, EXPIRES, PRAGMA},
    response::IntoResponse,
};
use chrono::{SecondsFormat, Utc};

use crate::api::dto::health::HealthResponse;
use crate::state::AppState;

/// Service name reported by the health endpoint.
pub const SERVICE_NAME: &str = "task-management-frontend";

/// Reports that the process is up.
///
/// # Endpoint
///
/// `GET /api/health`
///
/// # Response Codes
///
/// - **200 OK**: always, once the server accepts requests
///
/// The check does not touch the session store or the auth backend, so a
/// backend outage never fails the container probe.
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "service": "task-management-frontend",
///   "timestamp": "2024-01-15T10:30:00.000Z",
///   "uptime": 42,
///   "message": "Frontend server is running"
/// }
/// ```
///
/// Sent with `Cache-Control: no-store, no-cache, must-revalidate, proxy-revalidate`,
/// `Pragma: no-cache` and `Expires: 0`.
pub async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    let response = HealthResponse {
        status: "healthy".to_string(),
        service: SERVICE_NAME.to_string(),
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        uptime: state.uptime_secs(),
        message: "Frontend server is running".to_string(),
    };

    (
        [
            (
                CACHE_CONTROL,
                "no-store, no-cache, must-revalidate, proxy-revalidate",
            ),
            (PRAGMA, "no-cache"),
            (EXPIRES, "0"),
        ],
        Json(response),
    )
}
