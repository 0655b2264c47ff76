//! Cookie-session authentication for the JSON API.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;
use serde_json::json;

use crate::{error::AppError, state::AppState, web::session_cookie::current_session};

/// Requires a live session for the wrapped API routes.
///
/// On success the [`crate::web::session_cookie::CurrentSession`] is attached to
/// the request extensions.
///
/// # Errors
///
/// - `401 Unauthorized` if the `sid` cookie is missing or has no live session
/// - `500 Internal Server Error` if the session store cannot be read
pub async fn layer(
    State(st): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let jar = CookieJar::from_headers(req.headers());

    let current = current_session(&st.auth_service, &jar)
        .await?
        .ok_or_else(|| AppError::unauthorized("Not signed in", json!({"reason": "No active session"})))?;

    req.extensions_mut().insert(current);

    Ok(next.run(req).await)
}
