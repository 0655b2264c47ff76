//! Top-level router configuration combining page and API routes.
//!
//! # Route Structure
//!
//! - `GET  /`                     - Redirect to the dashboard
//! - `GET  /login`, `POST /login` - Login form
//! - `GET  /dashboard`            - Signed-in page (cookie session required)
//! - `POST /logout`               - End the session
//! - `GET  /api/health`           - Liveness probe
//! - `/api/session*`              - Session JSON API (cookie session required)
//! - `/static/*`                  - Login script and stylesheet
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-IP token bucket, stricter around credentials
//! - **Authentication** - Cookie session, redirecting (pages) or 401 (API)
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::middleware::rate_limit::{self, ClientKey};
use crate::api::middleware::{session_auth, tracing};
use crate::state::AppState;
use crate::web;
use crate::web::middleware::web_auth;
use axum::{Router, middleware};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tower_http::services::ServeDir;

/// Directory served under `/static`.
pub const STATIC_DIR: &str = "static";

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `behind_proxy` - when `true`, rate limiting reads client IP from
///   `X-Forwarded-For` / `X-Real-IP` headers instead of the peer socket address;
///   enable only when the service runs behind a trusted reverse proxy
pub fn app_router(state: AppState, behind_proxy: bool) -> NormalizePath<Router> {
    let router = router(state, Some(ClientKey::from_behind_proxy(behind_proxy)))
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}

/// Builds the routes with authentication applied.
///
/// With `rate_limiting` set to `None` no rate limiter is installed, which
/// lets the router run without connection info (in-process test servers).
pub fn router(state: AppState, rate_limiting: Option<ClientKey>) -> Router {
    let public = |routes: Router<AppState>| match rate_limiting {
        Some(key) => rate_limit::public(routes, key),
        None => routes,
    };
    let secure = |routes: Router<AppState>| match rate_limiting {
        Some(key) => rate_limit::secure(routes, key),
        None => routes,
    };

    let api_protected = secure(api::routes::protected_routes().route_layer(
        middleware::from_fn_with_state(state.clone(), session_auth::layer),
    ));
    let api_router = Router::new()
        .merge(api_protected)
        .merge(public(api::routes::public_routes()));

    let web_protected = public(web::routes::protected_routes().route_layer(
        middleware::from_fn_with_state(state.clone(), web_auth::layer),
    ));

    Router::new()
        .merge(web_protected)
        .merge(public(web::routes::public_routes()))
        .merge(secure(web::routes::login_routes()))
        .nest("/api", api_router)
        .nest_service("/static", ServeDir::new(STATIC_DIR))
        .with_state(state)
}
