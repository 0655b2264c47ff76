//! Handlers for the session JSON endpoints.

use axum::{Extension, Json, extract::State};

use crate::api::dto::session::{RefreshResponse, SessionResponse};
use crate::error::AppError;
use crate::state::AppState;
use crate::web::session_cookie::CurrentSession;

/// Returns the signed-in user.
///
/// # Endpoint
///
/// `GET /api/session`
///
/// # Response Codes
///
/// - **200 OK**: `{"authenticated": true, "user": {...}, "created_at": "..."}`
/// - **401 Unauthorized**: no session (from [`crate::api::middleware::session_auth`])
pub async fn session_handler(Extension(current): Extension<CurrentSession>) -> Json<SessionResponse> {
    Json(SessionResponse {
        authenticated: true,
        user: current.session.user,
        created_at: current.session.created_at,
    })
}

/// Renews the session's access token with its refresh token.
///
/// # Endpoint
///
/// `POST /api/session/refresh`
///
/// # Response Codes
///
/// - **200 OK**: `{"refreshed": true, "expires_in": 3600}`
/// - **401 Unauthorized**: no session, or the backend rejected the refresh
///   token (the session is then cleared)
/// - **500 Internal Server Error**: session store failure
pub async fn refresh_handler(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentSession>,
) -> Result<Json<RefreshResponse>, AppError> {
    let outcome = state.auth_service.refresh(&current.session_id).await?;

    Ok(Json(RefreshResponse {
        refreshed: true,
        expires_in: outcome.expires_in,
    }))
}
