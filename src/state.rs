//! Shared application state injected into every handler.

use std::sync::Arc;
use std::time::Instant;

use crate::application::services::AuthService;
use crate::web::session_cookie::CookieSettings;

#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<AuthService>,
    pub cookies: CookieSettings,
    /// Monotonic start time used for the health endpoint's uptime.
    pub started_at: Instant,
}

impl AppState {
    /// Creates the state, stamping the start time.
    pub fn new(auth_service: Arc<AuthService>, cookies: CookieSettings) -> Self {
        Self {
            auth_service,
            cookies,
            started_at: Instant::now(),
        }
    }

    /// Whole seconds since the state was created.
    pub fn uptime_secs(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}
