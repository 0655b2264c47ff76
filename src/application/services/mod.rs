//! Business logic services for the application layer.

pub mod auth_service;
pub mod login_guard;

pub use auth_service::{
    AuthService, CREDENTIALS_REQUIRED, LoginError, LoginOutcome, RefreshOutcome,
};
pub use login_guard::{LoginGuard, LoginPermit};
