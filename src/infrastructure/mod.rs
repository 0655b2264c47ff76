//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces defined by the domain layer.
//!
//! # Modules
//!
//! - [`auth_api`] - HTTP client for the authentication backend
//! - [`session`] - Session store backends (in-memory and Redis)

pub mod auth_api;
pub mod session;
