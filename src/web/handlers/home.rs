//! Root redirect handler.

use axum::response::Redirect;

/// `GET /` sends the browser to the dashboard; unauthenticated visitors
/// bounce on to `/login` from there.
pub async fn home_handler() -> Redirect {
    Redirect::to("/dashboard")
}
