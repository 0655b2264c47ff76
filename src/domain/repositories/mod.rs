//! Trait definitions for the domain layer's external collaborators.
//!
//! These traits abstract the two things the frontend talks to: the remote
//! authentication API and the store holding authenticated sessions. Concrete
//! implementations live in `crate::infrastructure`.
//!
//! # Architecture
//!
//! - Traits define the contract for data operations
//! - Implementations live in `crate::infrastructure::auth_api` and `crate::infrastructure::session`
//! - Mock implementations are auto-generated via `mockall` for testing
//!
//! # Available Traits
//!
//! - [`AuthGateway`] - Login, token refresh and logout against the backend
//! - [`SessionStore`] - Per-browser-session storage of [`crate::domain::entities::Session`]

pub mod auth_gateway;
pub mod session_store;

pub use auth_gateway::{
    AuthError, AuthGateway, DEFAULT_LOGIN_ERROR, LoginResponse, RefreshResponse,
};
pub use session_store::{SessionStore, SessionStoreError, SessionStoreResult};

#[cfg(test)]
pub use auth_gateway::MockAuthGateway;
#[cfg(test)]
pub use session_store::MockSessionStore;
