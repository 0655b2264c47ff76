//! Per-browser-session de-duplication of login attempts.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};

type InFlight = Arc<Mutex<HashSet<String>>>;

/// Tracks which browser sessions have a login request pending.
///
/// Only one login per key may be in flight; the slot is held by a
/// [`LoginPermit`] and released when the permit is dropped, which also covers
/// requests cancelled mid-flight.
#[derive(Debug, Clone, Default)]
pub struct LoginGuard {
    in_flight: InFlight,
}

/// Proof that the holder owns the pending-login slot for a key.
#[derive(Debug)]
pub struct LoginPermit {
    key: String,
    in_flight: InFlight,
}

impl LoginGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims the slot for `key`, or returns `None` if a login is already pending.
    pub fn try_acquire(&self, key: &str) -> Option<LoginPermit> {
        let mut in_flight = self.in_flight.lock().unwrap_or_else(PoisonError::into_inner);

        if !in_flight.insert(key.to_string()) {
            return None;
        }

        Some(LoginPermit {
            key: key.to_string(),
            in_flight: self.in_flight.clone(),
        })
    }

    /// Returns true while a permit for `key` is alive.
    #[cfg(test)]
    pub(crate) fn is_pending(&self, key: &str) -> bool {
        self.in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(key)
    }
}

impl Drop for LoginPermit {
    fn drop(&mut self) {
        self.in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.key);
    }
}
