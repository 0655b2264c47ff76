//! Gateway trait for the remote authentication API.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::domain::entities::User;

/// Message shown when the backend gives no usable explanation.
pub const DEFAULT_LOGIN_ERROR: &str = "Login failed. Please try again.";

/// The single user-visible authentication failure.
///
/// Network faults, rejected credentials and server errors all collapse into
/// this type; the message is either the backend's `error` field or
/// [`DEFAULT_LOGIN_ERROR`]. Diagnostic detail is logged, not carried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct AuthError {
    message: String,
}

impl AuthError {
    /// Creates an error with an explicit message.
    ///
    /// Blank messages are replaced by [`DEFAULT_LOGIN_ERROR`].
    pub fn new(message: impl Into<String>) -> Self {
        let message = message.into();
        if message.trim().is_empty() {
            return Self::generic();
        }
        Self { message }
    }

    /// The generic fallback failure.
    pub fn generic() -> Self {
        Self {
            message: DEFAULT_LOGIN_ERROR.to_string(),
        }
    }

    /// Extracts the message from a backend error body.
    ///
    /// Accepts `{"error": "..."}` and `{"error": {"message": "..."}}`.
    /// Anything else, including non-JSON bodies, yields the generic failure.
    pub fn from_response_body(body: &str) -> Self {
        let Ok(payload) = serde_json::from_str::<Value>(body) else {
            return Self::generic();
        };

        let message = match payload.get("error") {
            Some(Value::String(message)) => Some(message.as_str()),
            Some(Value::Object(inner)) => inner.get("message").and_then(Value::as_str),
            _ => None,
        };

        message.map(Self::new).unwrap_or_else(Self::generic)
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Successful login payload.
///
/// Unknown fields such as `message` or `token_type` are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub user: User,
    pub access_token: String,
    pub refresh_token: String,
    #[serde(default)]
    pub expires_in: Option<u64>,
}

/// Successful token refresh payload.
#[derive(Debug, Clone, Deserialize)]
pub struct RefreshResponse {
    pub access_token: String,
    #[serde(default)]
    pub expires_in: Option<u64>,
}

/// Remote authentication API.
///
/// Implementations are stateless request wrappers; retry and timeout policy
/// belong to the implementation's configuration, not to callers.
///
/// # Implementations
///
/// - [`crate::infrastructure::auth_api::HttpAuthClient`] - JSON over HTTP via `reqwest`
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthGateway: Send + Sync {
    /// Exchanges credentials for a user and a token pair.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError`] for any failure, with the backend's message when
    /// one was supplied.
    async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, AuthError>;

    /// Obtains a new access token using a refresh token.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError`] when the refresh token is rejected or the call fails.
    async fn refresh(&self, refresh_token: &str) -> Result<RefreshResponse, AuthError>;

    /// Tells the backend the access token is no longer in use.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError`] on failure; callers treat this as best-effort.
    async fn logout(&self, access_token: &str) -> Result<(), AuthError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_from_flat_payload() {
        let err = AuthError::from_response_body(r#"{"error": "Invalid email or password"}"#);
        assert_eq!(err.message(), "Invalid email or password");
    }

    #[test]
    fn test_error_from_nested_payload() {
        let err = AuthError::from_response_body(
            r#"{"error": {"code": "unauthorized", "message": "Account is disabled"}}"#,
        );
        assert_eq!(err.message(), "Account is disabled");
    }

    #[test]
    fn test_error_fallbacks() {
        for body in [
            "",
            "<html>502 Bad Gateway</html>",
            "{}",
            r#"{"message": "no error field"}"#,
            r#"{"error": null}"#,
            r#"{"error": 42}"#,
            r#"{"error": ""}"#,
        ] {
            assert_eq!(
                AuthError::from_response_body(body).message(),
                DEFAULT_LOGIN_ERROR,
                "body: {body}"
            );
        }
    }

    #[test]
    fn test_display_is_message() {
        assert_eq!(AuthError::new("Nope").to_string(), "Nope");
    }

    #[test]
    fn test_login_response_ignores_extra_fields() {
        let parsed: LoginResponse = serde_json::from_str(
            r#"{
                "message": "Login successful",
                "access_token": "a",
                "refresh_token": "r",
                "token_type": "Bearer",
                "expires_in": 3600,
                "user": {"id": "1", "full_name": "John Doe"}
            }"#,
        )
        .unwrap();

        assert_eq!(parsed.access_token, "a");
        assert_eq!(parsed.expires_in, Some(3600));
        assert_eq!(parsed.user.display_name(), "John Doe");
    }
}
