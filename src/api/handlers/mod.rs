//! HTTP request handlers for API endpoints.

pub mod health;
pub mod session;

pub use health::health_handler;
pub use session::{refresh_handler, session_handler};
