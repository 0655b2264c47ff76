//! In-process session store.

use async_trait::async_trait;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::debug;

use crate::domain::entities::Session;
use crate::domain::repositories::{SessionStore, SessionStoreError, SessionStoreResult};

struct Entry {
    session: Session,
    expires_at: Instant,
}

/// Session store backed by a map behind an async `RwLock`.
///
/// Suitable for a single frontend instance. Sessions are lost on restart,
/// which simply sends users back to the login page.
///
/// Expired entries are invisible to [`SessionStore::get`] immediately and are
/// physically removed by [`SessionStore::purge_expired`], which the server
/// runs periodically.
pub struct MemorySessionStore {
    entries: RwLock<HashMap<String, Entry>>,
    ttl: Duration,
}

impl MemorySessionStore {
    /// Creates an empty store whose entries live for `ttl`.
    pub fn new(ttl: Duration) -> Self {
        debug!("Using in-memory session store (TTL: {}s)", ttl.as_secs());
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    /// Number of entries currently held, expired ones included.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn set_auth(&self, key: &str, session: Session) -> SessionStoreResult<()> {
        let expires_at = Instant::now().checked_add(self.ttl).ok_or_else(|| {
            SessionStoreError::Operation(format!(
                "session TTL of {}s is out of range",
                self.ttl.as_secs()
            ))
        })?;
        let entry = Entry {
            session,
            expires_at,
        };
        self.entries.write().await.insert(key.to_string(), entry);
        Ok(())
    }

    async fn get(&self, key: &str) -> SessionStoreResult<Option<Session>> {
        let entries = self.entries.read().await;
        let session = entries
            .get(key)
            .filter(|entry| entry.expires_at > Instant::now())
            .map(|entry| entry.session.clone());
        Ok(session)
    }

    async fn clear(&self, key: &str) -> SessionStoreResult<()> {
        self.entries.write().await.remove(key);
        Ok(())
    }

    async fn purge_expired(&self) -> SessionStoreResult<usize> {
        let now = Instant::now();
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, entry| entry.expires_at > now);
        Ok(before - entries.len())
    }

    async fn health_check(&self) -> bool {
        true
    }
}
