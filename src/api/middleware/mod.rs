//! HTTP middleware for request processing and protection.
//!
//! Provides session authentication, rate limiting, and observability middleware.

pub mod rate_limit;
pub mod session_auth;
pub mod tracing;
