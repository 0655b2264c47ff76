//! Authentication service: login, logout, refresh and session lookup.

use hmac::{Hmac, Mac};
use serde_json::json;
use sha2::Sha256;
use std::sync::Arc;
use thiserror::Error;

use super::login_guard::LoginGuard;
use crate::domain::entities::{Credentials, Session};
use crate::domain::repositories::{AuthError, AuthGateway, SessionStore};
use crate::error::AppError;
use crate::utils::session_id::{generate_session_id, is_well_formed};

type HmacSha256 = Hmac<Sha256>;

/// Message for a submission with an empty email or password.
pub const CREDENTIALS_REQUIRED: &str = "Email and password are required";

/// Why a login did not produce a session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoginError {
    /// The backend, the network or the session store failed.
    #[error(transparent)]
    Failed(#[from] AuthError),

    /// Another login for the same browser session has not finished yet.
    #[error("A sign-in request is already in progress.")]
    InProgress,
}

/// Result of a successful login.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    /// Freshly issued browser session id to put in the cookie.
    pub session_id: String,
    pub session: Session,
    /// Access token lifetime reported by the backend, in seconds.
    pub expires_in: Option<u64>,
}

/// Result of a successful token refresh.
#[derive(Debug, Clone)]
pub struct RefreshOutcome {
    pub expires_in: Option<u64>,
}

/// Orchestrates the authentication flow between the browser, the auth
/// backend and the session store.
///
/// Browser session ids are never used as store keys directly: each is hashed
/// with HMAC-SHA256 keyed by `signing_secret`, so a leaked store dump cannot be
/// replayed as cookies.
pub struct AuthService {
    gateway: Arc<dyn AuthGateway>,
    store: Arc<dyn SessionStore>,
    signing_secret: String,
    guard: LoginGuard,
}

impl AuthService {
    /// Creates a new authentication service.
    ///
    /// # Arguments
    ///
    /// - `gateway` - client for the remote authentication API
    /// - `store` - where sessions are kept
    /// - `signing_secret` - HMAC key for deriving store keys from session ids
    pub fn new(
        gateway: Arc<dyn AuthGateway>,
        store: Arc<dyn SessionStore>,
        signing_secret: String,
    ) -> Self {
        Self {
            gateway,
            store,
            signing_secret,
            guard: LoginGuard::new(),
        }
    }

    /// Derives the store key for a browser session id.
    ///
    /// Returns a 64-character lowercase hex-encoded MAC.
    fn session_key(&self, session_id: &str) -> String {
        let mut mac = HmacSha256::new_from_slice(self.signing_secret.as_bytes())
            .expect("HMAC accepts any key length");
        mac.update(session_id.as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }

    #[cfg(test)]
    fn is_login_pending(&self, session_id: &str) -> bool {
        self.guard.is_pending(&self.session_key(session_id))
    }

    /// Authenticates credentials and stores the resulting session.
    ///
    /// # Flow
    ///
    /// 1. Reject empty credentials without calling the backend
    /// 2. Claim the pending-login slot for `current_session_id` (if any)
    /// 3. Call [`AuthGateway::login`]
    /// 4. Store the session under a newly generated session id
    /// 5. Clear the session held under `current_session_id`
    ///
    /// The slot from step 2 is released on every exit path.
    ///
    /// # Errors
    ///
    /// - [`LoginError::InProgress`] if a login for the same browser session is pending
    /// - [`LoginError::Failed`] with the backend's message, or the generic
    ///   message on network or storage failure
    pub async fn login(
        &self,
        current_session_id: Option<&str>,
        credentials: &Credentials,
    ) -> Result<LoginOutcome, LoginError> {
        if credentials.is_incomplete() {
            return Err(AuthError::new(CREDENTIALS_REQUIRED).into());
        }

        let current_key = current_session_id
            .filter(|sid| is_well_formed(sid))
            .map(|sid| self.session_key(sid));

        let _permit = match &current_key {
            Some(key) => match self.guard.try_acquire(key) {
                Some(permit) => Some(permit),
                None => {
                    metrics::counter!("frontend_login_total", "outcome" => "duplicate")
                        .increment(1);
                    tracing::debug!("Rejected concurrent login for the same browser session");
                    return Err(LoginError::InProgress);
                }
            },
            None => None,
        };

        let response = match self
            .gateway
            .login(credentials.email(), credentials.password())
            .await
        {
            Ok(response) => response,
            Err(e) => {
                metrics::counter!("frontend_login_total", "outcome" => "rejected").increment(1);
                tracing::info!("Login rejected: {}", e);
                return Err(e.into());
            }
        };

        let session = Session::new(
            response.user,
            response.access_token,
            response.refresh_token,
        );
        let session_id = generate_session_id();

        if let Err(e) = self
            .store
            .set_auth(&self.session_key(&session_id), session.clone())
            .await
        {
            metrics::counter!("frontend_login_total", "outcome" => "error").increment(1);
            tracing::error!("Failed to store session after login: {}", e);
            return Err(AuthError::generic().into());
        }

        if let Some(key) = &current_key
            && let Err(e) = self.store.clear(key).await
        {
            tracing::warn!("Failed to clear previous session: {}", e);
        }

        metrics::counter!("frontend_login_total", "outcome" => "success").increment(1);
        tracing::info!(user_id = %session.user.id, "User signed in");

        Ok(LoginOutcome {
            session_id,
            session,
            expires_in: response.expires_in,
        })
    }

    /// Returns the live session for a browser session id.
    ///
    /// Malformed ids are treated as absent without touching the store.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the store cannot be read.
    pub async fn current_session(&self, session_id: &str) -> Result<Option<Session>, AppError> {
        if !is_well_formed(session_id) {
            return Ok(None);
        }

        Ok(self.store.get(&self.session_key(session_id)).await?)
    }

    /// Ends a browser session.
    ///
    /// Notifies the backend best-effort, then clears the stored session.
    /// Logging out an unknown session succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the store cannot be updated.
    pub async fn logout(&self, session_id: &str) -> Result<(), AppError> {
        let Some(session) = self.current_session(session_id).await? else {
            return Ok(());
        };

        if let Err(e) = self.gateway.logout(&session.access_token).await {
            tracing::debug!("Backend logout failed, clearing session anyway: {}", e);
        }

        self.store.clear(&self.session_key(session_id)).await?;
        tracing::info!(user_id = %session.user.id, "User signed out");

        Ok(())
    }

    /// Exchanges the stored refresh token for a new access token.
    ///
    /// When the backend rejects the refresh token the session is cleared, as
    /// it can no longer be renewed.
    ///
    /// # Errors
    ///
    /// - [`AppError::Unauthorized`] if there is no session or the refresh is rejected
    /// - [`AppError::Internal`] if the store cannot be read or written
    pub async fn refresh(&self, session_id: &str) -> Result<RefreshOutcome, AppError> {
        let session = self.current_session(session_id).await?.ok_or_else(|| {
            AppError::unauthorized("Not signed in", json!({"reason": "No active session"}))
        })?;

        let key = self.session_key(session_id);

        let refreshed = match self.gateway.refresh(&session.refresh_token).await {
            Ok(refreshed) => refreshed,
            Err(e) => {
                tracing::info!(user_id = %session.user.id, "Token refresh rejected: {}", e);
                self.store.clear(&key).await?;
                return Err(AppError::unauthorized(
                    e.message(),
                    json!({"reason": "Refresh token rejected"}),
                ));
            }
        };

        self.store
            .set_auth(&key, session.with_access_token(refreshed.access_token))
            .await?;

        Ok(RefreshOutcome {
            expires_in: refreshed.expires_in,
        })
    }
}
