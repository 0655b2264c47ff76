//! Authenticated session held for a browser session.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::User;

/// The authenticated user plus the tokens issued by the backend.
///
/// Created on a successful login, replaced by the next login and cleared on
/// logout or expiry. Only the session store owns instances long-term.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub user: User,
    pub access_token: String,
    pub refresh_token: String,
    pub created_at: DateTime<Utc>,
}

impl Session {
    /// Creates a session stamped with the current time.
    pub fn new(user: User, access_token: String, refresh_token: String) -> Self {
        Self {
            user,
            access_token,
            refresh_token,
            created_at: Utc::now(),
        }
    }

    /// Returns a copy carrying a renewed access token.
    ///
    /// The user, refresh token and creation time are preserved.
    pub fn with_access_token(&self, access_token: String) -> Self {
        Self {
            access_token,
            ..self.clone()
        }
    }
}

// Tokens must never reach the logs.
impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("user", &self.user)
            .field("access_token", &"***")
            .field("refresh_token", &"***")
            .field("created_at", &self.created_at)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Session {
        Session::new(
            User::new("1"),
            "access-abc".to_string(),
            "refresh-xyz".to_string(),
        )
    }

    #[test]
    fn test_debug_redacts_tokens() {
        let rendered = format!("{:?}", sample());

        assert!(!rendered.contains("access-abc"));
        assert!(!rendered.contains("refresh-xyz"));
        assert!(rendered.contains("***"));
    }

    #[test]
    fn test_with_access_token_keeps_identity() {
        let session = sample();
        let renewed = session.with_access_token("access-new".to_string());

        assert_eq!(renewed.access_token, "access-new");
        assert_eq!(renewed.refresh_token, session.refresh_token);
        assert_eq!(renewed.user, session.user);
        assert_eq!(renewed.created_at, session.created_at);
    }
}
