//! Dashboard page handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{Extension, response::IntoResponse};

use crate::web::session_cookie::CurrentSession;

/// Template for the signed-in landing page.
#[derive(Template, WebTemplate)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    display_name: String,
    role: Option<String>,
    signed_in_at: String,
}

/// Renders the dashboard for the signed-in user.
///
/// # Endpoint
///
/// `GET /dashboard`
///
/// Requires a session; see [`crate::web::middleware::web_auth`].
pub async fn dashboard_handler(Extension(current): Extension<CurrentSession>) -> impl IntoResponse {
    let user = &current.session.user;

    DashboardTemplate {
        display_name: user.display_name().to_string(),
        role: user.role.clone(),
        signed_in_at: current
            .session
            .created_at
            .format("%Y-%m-%d %H:%M UTC")
            .to_string(),
    }
}
