//! The `sid` cookie carrying the browser session id.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use time::Duration;

use crate::application::services::AuthService;
use crate::domain::entities::Session;
use crate::error::AppError;

/// Name of the browser session cookie.
pub const SESSION_COOKIE: &str = "sid";

/// Attributes applied to the session cookie.
#[derive(Debug, Clone)]
pub struct CookieSettings {
    /// Send the cookie over HTTPS only.
    pub secure: bool,
    /// Cookie lifetime; matches the session store TTL.
    pub max_age_seconds: u64,
}

impl CookieSettings {
    pub fn new(secure: bool, max_age_seconds: u64) -> Self {
        Self {
            secure,
            max_age_seconds,
        }
    }

    /// Builds the HttpOnly, SameSite=Lax cookie for `session_id`.
    pub fn session_cookie(&self, session_id: String) -> Cookie<'static> {
        let max_age = i64::try_from(self.max_age_seconds).unwrap_or(i64::MAX);

        Cookie::build((SESSION_COOKIE, session_id))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(self.secure)
            .max_age(Duration::seconds(max_age))
            .build()
    }

    /// Builds an already-expired cookie that makes the browser drop `sid`.
    pub fn expired_cookie(&self) -> Cookie<'static> {
        Cookie::build((SESSION_COOKIE, ""))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(self.secure)
            .max_age(Duration::ZERO)
            .build()
    }
}

/// Reads the session id from the request cookies, if any.
pub fn session_id(jar: &CookieJar) -> Option<String> {
    jar.get(SESSION_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .filter(|value| !value.is_empty())
}

/// Authenticated session attached to the request by the auth middlewares.
#[derive(Debug, Clone)]
pub struct CurrentSession {
    pub session_id: String,
    pub session: Session,
}

/// Resolves the live session behind the request's `sid` cookie.
///
/// # Errors
///
/// Returns [`AppError::Internal`] if the session store cannot be read.
pub async fn current_session(
    auth_service: &AuthService,
    jar: &CookieJar,
) -> Result<Option<CurrentSession>, AppError> {
    let Some(session_id) = session_id(jar) else {
        return Ok(None);
    };

    Ok(auth_service
        .current_session(&session_id)
        .await?
        .map(|session| CurrentSession {
            session_id,
            session,
        }))
}
