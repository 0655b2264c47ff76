//! API route configuration.

use crate::api::handlers::{health_handler, refresh_handler, session_handler};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Session routes, protected by [`crate::api::middleware::session_auth`].
///
/// # Endpoints
///
/// - `GET  /session`         - Current user
/// - `POST /session/refresh` - Renew the access token
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/session", get(session_handler))
        .route("/session/refresh", post(refresh_handler))
}

/// Unauthenticated API routes.
///
/// # Endpoints
///
/// - `GET /health` - Liveness probe
pub fn public_routes() -> Router<AppState> {
    Router::new().route("/health", get(health_handler))
}
