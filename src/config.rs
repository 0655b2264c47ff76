//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the server starts.
//!
//! ## Session Storage
//!
//! Sessions are kept in memory unless Redis is configured, either as a full URL:
//!
//! ```bash
//! export REDIS_URL="redis://localhost:6379/0"
//! ```
//!
//! or from individual components (recommended for production):
//!
//! ```bash
//! export REDIS_HOST="localhost"
//! export REDIS_PORT="6379"
//! export REDIS_PASSWORD=""
//! export REDIS_DB="0"
//! ```
//!
//! ## Required Variables
//!
//! - `SESSION_SECRET` - HMAC key used to derive session store keys
//!
//! ## Optional Variables
//!
//! - `LISTEN` - Bind address (default: `0.0.0.0:3000`)
//! - `AUTH_API_URL` - Authentication API root (default: `http://localhost:5000/api`)
//! - `AUTH_API_TIMEOUT_SECS` - Per-request timeout (default: 10)
//! - `AUTH_API_RETRIES` - Retries on connect errors/timeouts (default: 0)
//! - `SESSION_TTL_SECONDS` - Session lifetime (default: 86400)
//! - `COOKIE_SECURE` - Mark the session cookie `Secure` (default: false)
//! - `BEHIND_PROXY` - Trust `X-Forwarded-For` for rate limiting (default: false)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)

use anyhow::{Context, Result};
use std::env;
use std::time::Duration;
use url::Url;

use crate::utils::mask::mask_connection_string;

/// Longest accepted `SESSION_TTL_SECONDS`: one year.
pub const MAX_SESSION_TTL_SECONDS: u64 = 365 * 24 * 60 * 60;

/// Auth API root used when `AUTH_API_URL` is unset.
pub const DEFAULT_AUTH_API_URL: &str = "http://localhost:5000/api";

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: String,
    pub auth_api_url: String,
    /// Whole-request timeout for auth API calls in seconds (`AUTH_API_TIMEOUT_SECS`).
    pub auth_api_timeout_secs: u64,
    /// Extra attempts after a transport failure (`AUTH_API_RETRIES`).
    pub auth_api_retries: usize,
    pub redis_url: Option<String>,
    /// HMAC key for session store keys. Loaded from `SESSION_SECRET`. Must be non-empty.
    pub session_secret: String,
    pub session_ttl_seconds: u64,
    pub cookie_secure: bool,
    /// When true, rate limiting reads client IP from X-Forwarded-For / X-Real-IP headers.
    /// Enable only when the service is behind a trusted reverse proxy.
    pub behind_proxy: bool,
    pub log_level: String,
    pub log_format: String,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if `SESSION_SECRET` is missing.
    pub fn from_env() -> Result<Self> {
        let listen_addr = env::var("LISTEN").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
        let auth_api_url =
            env::var("AUTH_API_URL").unwrap_or_else(|_| DEFAULT_AUTH_API_URL.to_string());

        let auth_api_timeout_secs = env::var("AUTH_API_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(10);

        let auth_api_retries = env::var("AUTH_API_RETRIES")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(0);

        let redis_url = Self::load_redis_url();

        let session_secret =
            env::var("SESSION_SECRET").context("SESSION_SECRET must be set")?;

        let session_ttl_seconds = env::var("SESSION_TTL_SECONDS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(86_400);

        let cookie_secure = env_flag("COOKIE_SECURE");
        let behind_proxy = env_flag("BEHIND_PROXY");

        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

        Ok(Self {
            listen_addr,
            auth_api_url,
            auth_api_timeout_secs,
            auth_api_retries,
            redis_url,
            session_secret,
            session_ttl_seconds,
            cookie_secure,
            behind_proxy,
            log_level,
            log_format,
        })
    }

    /// Loads Redis URL with fallback to component-based configuration.
    ///
    /// Priority:
    /// 1. `REDIS_URL` environment variable
    /// 2. Constructed from `REDIS_HOST`, `REDIS_PORT`, `REDIS_PASSWORD`, `REDIS_DB`
    ///
    /// Returns `None` if Redis is not configured.
    fn load_redis_url() -> Option<String> {
        if let Ok(url) = env::var("REDIS_URL") {
            return Some(url);
        }

        let host = env::var("REDIS_HOST").ok()?;
        let port = env::var("REDIS_PORT").unwrap_or_else(|_| "6379".to_string());
        let password = env::var("REDIS_PASSWORD").ok();
        let db = env::var("REDIS_DB").unwrap_or_else(|_| "0".to_string());

        let url = match password {
            // Empty password means no authentication
            Some(pwd) if !pwd.is_empty() => format!("redis://:{}@{}:{}/{}", pwd, host, port, db),
            _ => format!("redis://{}:{}/{}", host, port, db),
        };

        Some(url)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `listen_addr` is not `host:port`
    /// - `auth_api_url` is not an http(s) URL
    /// - timeouts, retries or the session TTL are out of range
    /// - `log_format` is not `text` or `json`
    /// - `session_secret` is empty
    pub fn validate(&self) -> Result<()> {
        if !self.listen_addr.contains(':') {
            anyhow::bail!(
                "LISTEN must be in format 'host:port', got '{}'",
                self.listen_addr
            );
        }

        let api_url = Url::parse(&self.auth_api_url)
            .with_context(|| format!("AUTH_API_URL is not a valid URL: '{}'", self.auth_api_url))?;
        if api_url.scheme() != "http" && api_url.scheme() != "https" {
            anyhow::bail!(
                "AUTH_API_URL must start with 'http://' or 'https://', got '{}'",
                self.auth_api_url
            );
        }

        if self.auth_api_timeout_secs == 0 || self.auth_api_timeout_secs > 120 {
            anyhow::bail!(
                "AUTH_API_TIMEOUT_SECS must be between 1 and 120, got {}",
                self.auth_api_timeout_secs
            );
        }

        if self.auth_api_retries > 5 {
            anyhow::bail!(
                "AUTH_API_RETRIES must be at most 5, got {}",
                self.auth_api_retries
            );
        }

        if let Some(ref redis_url) = self.redis_url
            && !redis_url.starts_with("redis://")
            && !redis_url.starts_with("rediss://")
        {
            anyhow::bail!(
                "REDIS_URL must start with 'redis://' or 'rediss://', got '{}'",
                mask_connection_string(redis_url)
            );
        }

        if self.session_secret.is_empty() {
            anyhow::bail!("SESSION_SECRET must not be empty");
        }

        if self.session_ttl_seconds == 0 || self.session_ttl_seconds > MAX_SESSION_TTL_SECONDS {
            anyhow::bail!(
                "SESSION_TTL_SECONDS must be between 1 and {}, got {}",
                MAX_SESSION_TTL_SECONDS,
                self.session_ttl_seconds
            );
        }

        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        Ok(())
    }

    /// Returns whether sessions are stored in Redis.
    pub fn is_redis_enabled(&self) -> bool {
        self.redis_url.is_some()
    }

    pub fn auth_api_timeout(&self) -> Duration {
        Duration::from_secs(self.auth_api_timeout_secs)
    }

    pub fn session_ttl(&self) -> Duration {
        Duration::from_secs(self.session_ttl_seconds)
    }

    /// Prints configuration summary (without sensitive data).
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen address: {}", self.listen_addr);
        tracing::info!(
            "  Auth API: {} (timeout {}s, retries {})",
            mask_connection_string(&self.auth_api_url),
            self.auth_api_timeout_secs,
            self.auth_api_retries
        );

        if let Some(ref redis_url) = self.redis_url {
            tracing::info!("  Sessions: Redis {}", mask_connection_string(redis_url));
        } else {
            tracing::info!("  Sessions: in-memory");
        }

        tracing::info!("  Session TTL: {}s", self.session_ttl_seconds);
        tracing::info!("  Secure cookies: {}", self.cookie_secure);
        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
    }
}

/// Reads a boolean flag; `true`, `1`, `yes` and `on` enable it.
fn env_flag(key: &str) -> bool {
    env::var(key)
        .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "true" | "1" | "yes" | "on"))
        .unwrap_or(false)
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if required variables are missing or validation fails.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn valid_config() -> Config {
        Config {
            listen_addr: "0.0.0.0:3000".to_string(),
            auth_api_url: "http://localhost:5000/api".to_string(),
            auth_api_timeout_secs: 10,
            auth_api_retries: 0,
            redis_url: None,
            session_secret: "test-secret".to_string(),
            session_ttl_seconds: 86_400,
            cookie_secure: false,
            behind_proxy: false,
            log_level: "info".to_string(),
            log_format: "text".to_string(),
        }
    }

    #[test]
    fn test_config_validation() {
        let mut config = valid_config();
        assert!(config.validate().is_ok());

        config.log_format = "invalid".to_string();
        assert!(config.validate().is_err());

        config.log_format = "json".to_string();
        assert!(config.validate().is_ok());

        config.listen_addr = "3000".to_string();
        assert!(config.validate().is_err());

        config.listen_addr = "0.0.0.0:3000".to_string();

        config.auth_api_url = "ftp://auth.example.com".to_string();
        assert!(config.validate().is_err());

        config.auth_api_url = "not a url".to_string();
        assert!(config.validate().is_err());

        config.auth_api_url = "https://auth.example.com/api".to_string();
        assert!(config.validate().is_ok());

        config.auth_api_timeout_secs = 0;
        assert!(config.validate().is_err());

        config.auth_api_timeout_secs = 10;
        config.auth_api_retries = 6;
        assert!(config.validate().is_err());

        config.auth_api_retries = 2;
        config.session_ttl_seconds = 0;
        assert!(config.validate().is_err());

        config.session_ttl_seconds = 60;
        config.session_secret = String::new();
        assert!(config.validate().is_err());

        config.session_secret = "s".to_string();
        config.redis_url = Some("http://localhost:6379".to_string());
        assert!(config.validate().is_err());

        config.redis_url = Some("rediss://cache:6380/1".to_string());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_session_ttl_upper_bound() {
        let mut config = valid_config();

        config.session_ttl_seconds = MAX_SESSION_TTL_SECONDS;
        assert!(config.validate().is_ok());

        config.session_ttl_seconds = MAX_SESSION_TTL_SECONDS + 1;
        assert!(config.validate().is_err());

        config.session_ttl_seconds = u64::MAX;
        assert!(config.validate().is_err());
    }

    #[test]
    #[serial]
    fn test_from_env_defaults() {
        // SAFETY: Tests are run serially due to #[serial], so no concurrent access
        unsafe {
            env::set_var("SESSION_SECRET", "from-env");
            env::remove_var("LISTEN");
            env::remove_var("AUTH_API_URL");
            env::remove_var("AUTH_API_TIMEOUT_SECS");
            env::remove_var("COOKIE_SECURE");
            env::remove_var("REDIS_URL");
            env::remove_var("REDIS_HOST");
        }

        let config = Config::from_env().unwrap();

        assert_eq!(config.listen_addr, "0.0.0.0:3000");
        assert_eq!(config.auth_api_url, "http://localhost:5000/api");
        assert_eq!(config.auth_api_timeout(), Duration::from_secs(10));
        assert_eq!(config.session_ttl(), Duration::from_secs(86_400));
        assert!(!config.cookie_secure);
        assert!(!config.is_redis_enabled());
        assert!(config.validate().is_ok());

        unsafe {
            env::remove_var("SESSION_SECRET");
        }
    }

    #[test]
    #[serial]
    fn test_from_env_requires_session_secret() {
        // SAFETY: Tests are run serially
        unsafe {
            env::remove_var("SESSION_SECRET");
        }

        assert!(Config::from_env().is_err());
    }

    #[test]
    #[serial]
    fn test_env_flag_values() {
        // SAFETY: Tests are run serially
        unsafe {
            env::set_var("COOKIE_SECURE", " Yes ");
        }
        assert!(env_flag("COOKIE_SECURE"));

        unsafe {
            env::set_var("COOKIE_SECURE", "off");
        }
        assert!(!env_flag("COOKIE_SECURE"));

        unsafe {
            env::remove_var("COOKIE_SECURE");
        }
        assert!(!env_flag("COOKIE_SECURE"));
    }

    #[test]
    #[serial]
    fn test_load_redis_url_from_components() {
        // SAFETY: Tests are run serially due to #[serial], so no concurrent access
        unsafe {
            env::remove_var("REDIS_URL");
            env::set_var("REDIS_HOST", "redis-host");
            env::set_var("REDIS_PORT", "6380");
            env::set_var("REDIS_DB", "1");
        }

        let url = Config::load_redis_url().unwrap();
        assert_eq!(url, "redis://redis-host:6380/1");

        // Test with password
        unsafe {
            env::set_var("REDIS_PASSWORD", "secret");
        }
        let url = Config::load_redis_url().unwrap();
        assert_eq!(url, "redis://:secret@redis-host:6380/1");

        // Test with empty password (should be treated as no password)
        unsafe {
            env::set_var("REDIS_PASSWORD", "");
        }
        let url = Config::load_redis_url().unwrap();
        assert_eq!(url, "redis://redis-host:6380/1");

        // Cleanup
        unsafe {
            env::remove_var("REDIS_HOST");
            env::remove_var("REDIS_PORT");
            env::remove_var("REDIS_DB");
            env::remove_var("REDIS_PASSWORD");
        }
    }

    #[test]
    #[serial]
    fn test_redis_url_priority() {
        // SAFETY: Tests are run serially
        unsafe {
            env::set_var("REDIS_URL", "redis://from-url:6379/0");
            env::set_var("REDIS_HOST", "from-components");
        }

        let url = Config::load_redis_url().unwrap();

        assert!(url.contains("from-url"));
        assert!(!url.contains("from-components"));

        unsafe {
            env::remove_var("REDIS_URL");
            env::remove_var("REDIS_HOST");
        }
    }
}
