//! # Task Management Frontend
//!
//! Server-rendered login and dashboard pages for the task management
//! application, backed by a remote REST authentication API. Built with Axum
//! and Askama.
//!
//! ## Architecture
//!
//! This crate follows Clean Architecture principles with clear layer separation:
//!
//! - **Domain Layer** ([`domain`]) - Session entities and the gateway/store traits
//! - **Application Layer** ([`application`]) - Login, logout and refresh orchestration
//! - **Infrastructure Layer** ([`infrastructure`]) - Auth API client, session stores
//! - **API Layer** ([`api`]) - Health probe and session JSON endpoints
//! - **Web Layer** ([`web`]) - Login form, dashboard and the `sid` cookie
//!
//! ## Features
//!
//! - Email/password login against the backend's `/auth/login`
//! - HttpOnly session cookie, rotated on every login
//! - One login in flight per browser session
//! - In-memory or Redis session storage with expiry
//! - Rate limiting and structured request logging
//!
//! ## Quick Start
//!
//! ```bash
//! export SESSION_SECRET="change-me"
//! export AUTH_API_URL="http://localhost:5000/api"
//! export REDIS_URL="redis://localhost:6379"  # Optional
//!
//! cargo run
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;
pub mod web;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{AuthService, LoginError};
    pub use crate::domain::entities::{Credentials, Session, User};
    pub use crate::domain::repositories::{AuthError, AuthGateway, SessionStore};
    pub use crate::error::AppError;
    pub use crate::state::AppState;
}
