//! HTML page route configuration.

use crate::state::AppState;
use crate::web::handlers::{
    dashboard_handler, home_handler, login_page_handler, login_submit_handler, logout_handler,
};
use axum::{
    Router,
    routing::{get, post},
};

/// Pages requiring a session.
///
/// Protected via [`crate::web::middleware::web_auth`].
///
/// # Endpoints
///
/// - `GET /dashboard` - Signed-in landing page
pub fn protected_routes() -> Router<AppState> {
    Router::new().route("/dashboard", get(dashboard_handler))
}

/// Pages reachable without a session.
///
/// # Endpoints
///
/// - `GET /` - Redirect to the dashboard
/// - `GET /login` - Login form
/// - `POST /logout` - End the session
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home_handler))
        .route("/login", get(login_page_handler))
        .route("/logout", post(logout_handler))
}

/// Login form submission, kept apart for its stricter rate limit.
///
/// # Endpoints
///
/// - `POST /login` - Authenticate and start a session
pub fn login_routes() -> Router<AppState> {
    Router::new().route("/login", post(login_submit_handler))
}
