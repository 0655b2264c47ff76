#![allow(dead_code)]

use async_trait::async_trait;
use axum::Router;
use axum_test::TestServer;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::Notify;
use task_management_frontend::application::services::AuthService;
use task_management_frontend::domain::entities::User;
use task_management_frontend::domain::repositories::{
    AuthError, AuthGateway, LoginResponse, RefreshResponse,
};
use task_management_frontend::infrastructure::session::MemorySessionStore;
use task_management_frontend::routes;
use task_management_frontend::state::AppState;
use task_management_frontend::web::session_cookie::CookieSettings;

pub const DEMO_EMAIL: &str = "john.doe@example.com";
pub const DEMO_PASSWORD: &str = "SecurePass123";
pub const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// In-process stand-in for the authentication backend.
///
/// Accepts only the demo account. A gated stub parks every login until
/// `release` is notified, signalling `entered` first.
#[derive(Default)]
pub struct StubAuthGateway {
    pub reject_refresh: bool,
    gate: Option<(Arc<Notify>, Arc<Notify>)>,
    pub logins: AtomicUsize,
    pub logouts: AtomicUsize,
}

impl StubAuthGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn gated(entered: Arc<Notify>, release: Arc<Notify>) -> Self {
        Self {
            gate: Some((entered, release)),
            ..Self::default()
        }
    }

    pub fn rejecting_refresh() -> Self {
        Self {
            reject_refresh: true,
            ..Self::default()
        }
    }
}

pub fn demo_user() -> User {
    let mut user = User::new("1");
    user.full_name = Some("John Doe".to_string());
    user.email = Some(DEMO_EMAIL.to_string());
    user.role = Some("user".to_string());
    user
}

#[async_trait]
impl AuthGateway for StubAuthGateway {
    async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, AuthError> {
        self.logins.fetch_add(1, Ordering::SeqCst);

        if let Some((entered, release)) = &self.gate {
            entered.notify_one();
            release.notified().await;
        }

        if email != DEMO_EMAIL || password != DEMO_PASSWORD {
            return Err(AuthError::new(INVALID_CREDENTIALS));
        }

        Ok(LoginResponse {
            user: demo_user(),
            access_token: "access-token-1".to_string(),
            refresh_token: "refresh-token-1".to_string(),
            expires_in: Some(3600),
        })
    }

    async fn refresh(&self, refresh_token: &str) -> Result<RefreshResponse, AuthError> {
        if self.reject_refresh || refresh_token != "refresh-token-1" {
            return Err(AuthError::new("Invalid refresh token"));
        }

        Ok(RefreshResponse {
            access_token: "access-token-2".to_string(),
            expires_in: Some(3600),
        })
    }

    async fn logout(&self, _access_token: &str) -> Result<(), AuthError> {
        self.logouts.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

pub fn create_test_state(gateway: Arc<StubAuthGateway>) -> (AppState, Arc<MemorySessionStore>) {
    let store = Arc::new(MemorySessionStore::new(Duration::from_secs(3600)));

    let auth_service = Arc::new(AuthService::new(
        gateway,
        store.clone(),
        "test-signing-secret".to_string(),
    ));

    let state = AppState::new(auth_service, CookieSettings::new(false, 3600));

    (state, store)
}

/// Full route tree without rate limiting.
pub fn test_app(state: AppState) -> Router {
    routes::router(state, None)
}

pub fn test_server(gateway: Arc<StubAuthGateway>) -> (TestServer, Arc<MemorySessionStore>) {
    let (state, store) = create_test_state(gateway);
    let server = TestServer::new(test_app(state)).unwrap();
    (server, store)
}

pub fn demo_form() -> [(&'static str, &'static str); 2] {
    [("email", DEMO_EMAIL), ("password", DEMO_PASSWORD)]
}
