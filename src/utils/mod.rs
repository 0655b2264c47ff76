//! Utility functions shared across layers.
//!
//! - [`session_id`] - Browser session id generation and validation
//! - [`mask`] - Redaction of secrets in log output

pub mod mask;
pub mod session_id;
