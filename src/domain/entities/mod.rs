//! Core domain entities representing the authentication data model.
//!
//! Entities are plain data structures without I/O. Types holding secrets
//! implement `Debug` by hand so passwords and tokens never reach the logs.
//!
//! # Entity Types
//!
//! - [`Credentials`] - Email/password pair for one login attempt
//! - [`User`] - Opaque user record issued by the backend
//! - [`Session`] - User plus access/refresh tokens

pub mod credentials;
pub mod session;
pub mod user;

pub use credentials::Credentials;
pub use session::Session;
pub use user::User;
