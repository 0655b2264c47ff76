//! Session storage backends.
//!
//! Provides two implementations of [`crate::domain::repositories::SessionStore`]:
//! - [`MemorySessionStore`] - In-process map, default for single instances
//! - [`RedisSessionStore`] - Shared Redis storage with native expiry

mod memory_session_store;
mod redis_session_store;
mod sweeper;

pub use memory_session_store::MemorySessionStore;
pub use redis_session_store::RedisSessionStore;
pub use sweeper::run_session_sweeper;
