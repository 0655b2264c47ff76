//! Server-rendered pages: login form, dashboard and logout.
//!
//! Uses Askama templates from `templates/` and the `sid` session cookie.
//!
//! # Modules
//!
//! - [`handlers`] - Page handlers
//! - [`middleware`] - Cookie-session guard
//! - [`routes`] - Page route configuration
//! - [`session_cookie`] - `sid` cookie helpers

pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod session_cookie;
