//! Redis-backed session store.

use async_trait::async_trait;
use redis::{AsyncCommands, Client, aio::ConnectionManager};
use tracing::{debug, error, info, warn};

use crate::domain::entities::Session;
use crate::domain::repositories::{SessionStore, SessionStoreError, SessionStoreResult};

const KEY_PREFIX: &str = "session:";

/// Namespaced Redis key for a store key.
fn redis_key(key: &str) -> String {
    format!("{KEY_PREFIX}{key}")
}

fn encode_session(session: &Session) -> SessionStoreResult<String> {
    serde_json::to_string(session).map_err(|e| SessionStoreError::Serialization(e.to_string()))
}

fn decode_session(payload: &str) -> SessionStoreResult<Session> {
    serde_json::from_str(payload).map_err(|e| SessionStoreError::Serialization(e.to_string()))
}

/// Redis session store for multi-instance deployments.
///
/// Sessions are stored as JSON under `session:<key>` with `SET EX`, so a
/// replacement is a single atomic command and expiry is handled by Redis.
/// Uses `ConnectionManager` for automatic reconnection.
pub struct RedisSessionStore {
    client: ConnectionManager,
    ttl_seconds: u64,
}

impl RedisSessionStore {
    /// Connects to Redis and validates the connection with a PING.
    ///
    /// # Arguments
    ///
    /// - `redis_url` - Redis connection string (e.g., `"redis://localhost:6379"`)
    /// - `ttl_seconds` - lifetime of each session; controlled via `SESSION_TTL_SECONDS`
    ///
    /// # Errors
    ///
    /// Returns [`SessionStoreError::Connection`] if the URL is invalid, the
    /// connection cannot be established, or the PING fails.
    pub async fn connect(redis_url: &str, ttl_seconds: u64) -> SessionStoreResult<Self> {
        info!("Connecting to Redis session store");

        let client = Client::open(redis_url).map_err(|e| {
            SessionStoreError::Connection(format!("Failed to create Redis client: {}", e))
        })?;

        let manager = ConnectionManager::new(client).await.map_err(|e| {
            SessionStoreError::Connection(format!("Failed to connect to Redis: {}", e))
        })?;

        let mut test_conn = manager.clone();
        test_conn
            .ping::<()>()
            .await
            .map_err(|e| SessionStoreError::Connection(format!("Redis PING failed: {}", e)))?;

        info!("Connected to Redis session store");

        Ok(Self {
            client: manager,
            ttl_seconds,
        })
    }
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    async fn set_auth(&self, key: &str, session: Session) -> SessionStoreResult<()> {
        let payload = encode_session(&session)?;
        let mut conn = self.client.clone();

        conn.set_ex::<_, _, ()>(redis_key(key), payload, self.ttl_seconds)
            .await
            .map_err(|e| {
                error!("Redis SET error for session: {}", e);
                SessionStoreError::Operation(e.to_string())
            })?;

        debug!("Session stored (TTL: {}s)", self.ttl_seconds);
        Ok(())
    }

    async fn get(&self, key: &str) -> SessionStoreResult<Option<Session>> {
        let full_key = redis_key(key);
        let mut conn = self.client.clone();

        let payload = conn
            .get::<_, Option<String>>(&full_key)
            .await
            .map_err(|e| {
                error!("Redis GET error for session: {}", e);
                SessionStoreError::Operation(e.to_string())
            })?;

        let Some(payload) = payload else {
            return Ok(None);
        };

        match decode_session(&payload) {
            Ok(session) => Ok(Some(session)),
            Err(e) => {
                // Unreadable entries (e.g. written by an incompatible version) log the user out.
                warn!("Discarding undecodable session entry: {}", e);
                let _ = conn.del::<_, i32>(&full_key).await;
                Ok(None)
            }
        }
    }

    async fn clear(&self, key: &str) -> SessionStoreResult<()> {
        let mut conn = self.client.clone();

        let deleted = conn
            .del::<_, i32>(redis_key(key))
            .await
            .map_err(|e| {
                warn!("Redis DEL error for session: {}", e);
                SessionStoreError::Operation(e.to_string())
            })?;

        if deleted > 0 {
            debug!("Session cleared");
        }
        Ok(())
    }

    async fn health_check(&self) -> bool {
        let mut conn = self.client.clone();
        conn.ping::<()>().await.is_ok()
    }
}
