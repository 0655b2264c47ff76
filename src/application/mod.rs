//! Application layer services implementing the authentication flow.
//!
//! This layer orchestrates domain operations: it calls the auth backend
//! through [`crate::domain::repositories::AuthGateway`], keeps sessions in a
//! [`crate::domain::repositories::SessionStore`] and enforces the
//! one-pending-login-per-browser rule. Handlers only talk to services.
//!
//! # Available Services
//!
//! - [`services::auth_service::AuthService`] - Login, logout, refresh and session lookup
//! - [`services::login_guard::LoginGuard`] - De-duplication of concurrent logins

pub mod services;
