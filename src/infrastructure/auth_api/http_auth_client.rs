//! JSON-over-HTTP client for the authentication backend.

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;
use tokio_retry::RetryIf;
use tokio_retry::strategy::{ExponentialBackoff, jitter};
use tracing::{debug, warn};
use url::Url;

use crate::domain::repositories::{AuthError, AuthGateway, LoginResponse, RefreshResponse};

const LOGIN_PATH: &str = "auth/login";
const REFRESH_PATH: &str = "auth/refresh";
const LOGOUT_PATH: &str = "auth/logout";

const CONNECT_TIMEOUT_SECS: u64 = 5;
const MAX_RETRY_DELAY: Duration = Duration::from_secs(2);

/// Settings for [`HttpAuthClient`].
#[derive(Debug, Clone)]
pub struct AuthClientConfig {
    /// API root, e.g. `http://localhost:5000/api`. Endpoints are resolved below it.
    pub base_url: String,
    /// Whole-request timeout.
    pub timeout: Duration,
    /// Extra attempts after a transport failure (connect error or timeout).
    pub max_retries: usize,
}

/// Errors raised while building the client.
#[derive(Debug, Error)]
pub enum AuthClientSetupError {
    #[error("invalid auth API URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("failed to build HTTP client: {0}")]
    Http(#[from] reqwest::Error),
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

/// [`AuthGateway`] implementation talking to the backend's `/auth/*` routes.
///
/// Every failure is reduced to an [`AuthError`]: HTTP error responses carry
/// the backend's `error` message, everything else (unreachable host, timeout,
/// malformed success body) becomes the generic message. Only transport
/// failures are retried, with jittered exponential backoff.
pub struct HttpAuthClient {
    http: reqwest::Client,
    base_url: Url,
    max_retries: usize,
}

impl HttpAuthClient {
    /// Builds a client for the given API root.
    ///
    /// # Errors
    ///
    /// Returns [`AuthClientSetupError::InvalidBaseUrl`] if the URL does not
    /// parse or is not http(s), and [`AuthClientSetupError::Http`] if the
    /// underlying HTTP client cannot be constructed.
    pub fn new(config: &AuthClientConfig) -> Result<Self, AuthClientSetupError> {
        let base_url = parse_base_url(&config.base_url)?;

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS).min(config.timeout))
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()?;

        Ok(Self {
            http,
            base_url,
            max_retries: config.max_retries,
        })
    }

    /// Resolved URL of an endpoint below the API root.
    pub fn endpoint(&self, path: &str) -> Result<Url, AuthError> {
        self.base_url.join(path).map_err(|e| {
            warn!("Cannot resolve auth endpoint {}: {}", path, e);
            AuthError::generic()
        })
    }

    /// Sends a POST, retrying transport failures.
    async fn post<B: Serialize + Sync>(
        &self,
        path: &str,
        bearer: Option<&str>,
        body: Option<&B>,
    ) -> Result<reqwest::Response, AuthError> {
        let url = self.endpoint(path)?;

        let strategy = ExponentialBackoff::from_millis(2)
            .factor(50)
            .max_delay(MAX_RETRY_DELAY)
            .map(jitter)
            .take(self.max_retries);

        let attempt = || {
            let mut request = self.http.post(url.clone());
            if let Some(token) = bearer {
                request = request.bearer_auth(token);
            }
            if let Some(body) = body {
                request = request.json(body);
            }
            request.send()
        };

        RetryIf::start(strategy, attempt, is_transient)
            .await
            .map_err(|e| {
                warn!(endpoint = path, "Auth API request failed: {}", e);
                AuthError::generic()
            })
    }
}

#[async_trait]
impl AuthGateway for HttpAuthClient {
    async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, AuthError> {
        let body = LoginRequest { email, password };
        let response = self.post(LOGIN_PATH, None, Some(&body)).await?;
        decode(response, LOGIN_PATH).await
    }

    async fn refresh(&self, refresh_token: &str) -> Result<RefreshResponse, AuthError> {
        let response = self
            .post::<()>(REFRESH_PATH, Some(refresh_token), None)
            .await?;
        decode(response, REFRESH_PATH).await
    }

    async fn logout(&self, access_token: &str) -> Result<(), AuthError> {
        let response = self
            .post::<()>(LOGOUT_PATH, Some(access_token), None)
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        debug!(endpoint = LOGOUT_PATH, %status, "Auth API rejected request");
        Err(AuthError::from_response_body(&body))
    }
}

/// Reads a response, mapping non-2xx bodies to the backend's error message.
async fn decode<T: DeserializeOwned>(
    response: reqwest::Response,
    endpoint: &str,
) -> Result<T, AuthError> {
    let status = response.status();

    let body = response.text().await.map_err(|e| {
        warn!(endpoint, "Failed to read auth API response: {}", e);
        AuthError::generic()
    })?;

    if !status.is_success() {
        debug!(endpoint, %status, "Auth API rejected request");
        return Err(AuthError::from_response_body(&body));
    }

    serde_json::from_str(&body).map_err(|e| {
        warn!(endpoint, "Unexpected auth API response: {}", e);
        AuthError::generic()
    })
}

/// Connect failures and timeouts are worth another attempt; anything that
/// produced an HTTP response is not.
fn is_transient(error: &reqwest::Error) -> bool {
    error.is_connect() || error.is_timeout()
}

/// Parses the API root and forces a trailing slash so relative endpoints
/// resolve below it rather than replacing its last segment.
fn parse_base_url(raw: &str) -> Result<Url, AuthClientSetupError> {
    let invalid = |reason: String| AuthClientSetupError::InvalidBaseUrl {
        url: raw.to_string(),
        reason,
    };

    let mut url = Url::parse(raw.trim()).map_err(|e| invalid(e.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
    }

    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }

    Ok(url)
}
