//! Background task removing expired sessions.

use std::sync::Arc;
use std::time::Duration;
use tokio::time::{MissedTickBehavior, interval};

use crate::domain::repositories::SessionStore;

/// Periodically calls [`SessionStore::purge_expired`] until the task is aborted.
///
/// Failures are logged and retried on the next tick.
pub async fn run_session_sweeper(store: Arc<dyn SessionStore>, every: Duration) {
    let mut ticker = interval(every);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;

        match store.purge_expired().await {
            Ok(0) => {}
            Ok(removed) => tracing::debug!(removed, "Purged expired sessions"),
            Err(e) => tracing::warn!("Session purge failed: {}", e),
        }
    }
}
