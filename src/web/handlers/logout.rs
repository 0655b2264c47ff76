//! Logout handler.

use axum::{
    extract::State,
    response::{IntoResponse, Redirect},
};
use axum_extra::extract::cookie::CookieJar;

use crate::state::AppState;
use crate::web::session_cookie::session_id;

/// Ends the browser session and returns to the login page.
///
/// # Endpoint
///
/// `POST /logout`
///
/// Always answers 303 to `/login` with an expired `sid` cookie, also when
/// there was no session to end.
pub async fn logout_handler(State(state): State<AppState>, jar: CookieJar) -> impl IntoResponse {
    if let Some(sid) = session_id(&jar)
        && let Err(e) = state.auth_service.logout(&sid).await
    {
        tracing::error!("Failed to end session: {}", e);
    }

    (jar.add(state.cookies.expired_cookie()), Redirect::to("/login"))
}
