//! Cookie-session authentication for HTML pages.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;

use crate::state::AppState;
use crate::web::session_cookie::current_session;

/// Requires a live session for the wrapped pages.
///
/// # Authentication Flow
///
/// 1. Read the `sid` cookie
/// 2. Look the session up via [`crate::application::services::AuthService`]
/// 3. On success, attach [`crate::web::session_cookie::CurrentSession`] to the
///    request extensions and continue
/// 4. Otherwise redirect to `/login`
///
/// Unlike [`crate::api::middleware::session_auth`], which answers
/// `401 Unauthorized`, this sends the browser to the login page.
///
/// # Example
///
/// ```rust,ignore
/// let protected = Router::new()
///     .route("/dashboard", get(dashboard_handler))
///     .route_layer(middleware::from_fn_with_state(state.clone(), web_auth::layer));
/// ```
pub async fn layer(
    State(st): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Redirect> {
    let jar = CookieJar::from_headers(req.headers());

    match current_session(&st.auth_service, &jar).await {
        Ok(Some(current)) => {
            req.extensions_mut().insert(current);
            Ok(next.run(req).await)
        }
        Ok(None) => Err(Redirect::to("/login")),
        Err(e) => {
            tracing::warn!("Session lookup failed, redirecting to login: {}", e);
            Err(Redirect::to("/login"))
        }
    }
}
