//! DTOs for the session endpoints.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::entities::User;

/// Body of `GET /api/session`.
///
/// Tokens are kept server-side and never returned.
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub authenticated: bool,
    pub user: User,
    pub created_at: DateTime<Utc>,
}

/// Body of `POST /api/session/refresh`.
#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    pub refreshed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_in: Option<u64>,
}
