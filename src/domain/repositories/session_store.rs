//! Session store trait and error types.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::entities::Session;

/// Errors that can occur during session store operations.
#[derive(Debug, Error)]
pub enum SessionStoreError {
    #[error("Session store connection error: {0}")]
    Connection(String),

    #[error("Session store operation error: {0}")]
    Operation(String),

    #[error("Session serialization error: {0}")]
    Serialization(String),
}

/// Result type for session store operations.
pub type SessionStoreResult<T> = Result<T, SessionStoreError>;

/// Holder of the current session for each browser session.
///
/// Keys are opaque strings derived from the browser session id (see
/// [`crate::application::services::AuthService`]); the store never sees the
/// raw cookie value. Entries expire after the store's configured TTL.
///
/// # Implementations
///
/// - [`crate::infrastructure::session::MemorySessionStore`] - In-process map
/// - [`crate::infrastructure::session::RedisSessionStore`] - Redis with `SET EX`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Atomically replaces whatever session is held under `key`.
    ///
    /// The TTL restarts on every call.
    ///
    /// # Errors
    ///
    /// Returns [`SessionStoreError`] if the backend write fails.
    async fn set_auth(&self, key: &str, session: Session) -> SessionStoreResult<()>;

    /// Returns the live session under `key`.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(session))` if present and not expired
    /// - `Ok(None)` if absent or expired
    ///
    /// # Errors
    ///
    /// Returns [`SessionStoreError`] if the backend read fails.
    async fn get(&self, key: &str) -> SessionStoreResult<Option<Session>>;

    /// Removes the session under `key`. Clearing an absent key succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`SessionStoreError`] if the backend delete fails.
    async fn clear(&self, key: &str) -> SessionStoreResult<()>;

    /// Drops expired entries, returning how many were removed.
    ///
    /// Backends with native expiry have nothing to do.
    async fn purge_expired(&self) -> SessionStoreResult<usize> {
        Ok(0)
    }

    /// Checks if the backend is reachable.
    async fn health_check(&self) -> bool;
}
