//! HTTP server initialization and runtime setup.
//!
//! Handles session store selection, auth client setup, the session sweeper
//! and the Axum server lifecycle.

use crate::application::services::AuthService;
use crate::config::Config;
use crate::domain::repositories::SessionStore;
use crate::infrastructure::auth_api::{AuthClientConfig, HttpAuthClient};
use crate::infrastructure::session::{MemorySessionStore, RedisSessionStore, run_session_sweeper};
use crate::routes::app_router;
use crate::state::AppState;
use crate::web::session_cookie::CookieSettings;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

/// How often expired in-memory sessions are dropped.
const SWEEP_INTERVAL: Duration = Duration::from_secs(60);

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - Session store (Redis, or in-memory fallback)
/// - Auth API client
/// - Expired-session sweeper for the in-memory store
/// - Axum HTTP server with graceful shutdown on Ctrl+C / SIGTERM
///
/// # Errors
///
/// Returns an error if:
/// - The auth API URL is invalid
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let store = build_session_store(&config).await;

    let gateway = HttpAuthClient::new(&AuthClientConfig {
        base_url: config.auth_api_url.clone(),
        timeout: config.auth_api_timeout(),
        max_retries: config.auth_api_retries,
    })
    .context("Failed to create auth API client")?;

    let auth_service = Arc::new(AuthService::new(
        Arc::new(gateway),
        store,
        config.session_secret.clone(),
    ));
    let cookies = CookieSettings::new(config.cookie_secure, config.session_ttl_seconds);
    let state = AppState::new(auth_service, cookies);

    let app = app_router(state, config.behind_proxy);

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid LISTEN address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Picks the session backend.
///
/// Redis is used when configured and reachable; otherwise sessions live in
/// process memory and a sweeper task drops expired entries.
async fn build_session_store(config: &Config) -> Arc<dyn SessionStore> {
    if let Some(redis_url) = &config.redis_url {
        match RedisSessionStore::connect(redis_url, config.session_ttl_seconds).await {
            Ok(redis) => {
                tracing::info!("Session store: Redis");
                return Arc::new(redis);
            }
            Err(e) => {
                tracing::warn!("Failed to connect to Redis: {}. Using in-memory sessions.", e);
            }
        }
    } else {
        tracing::info!("Session store: in-memory");
    }

    let store: Arc<dyn SessionStore> = Arc::new(MemorySessionStore::new(config.session_ttl()));
    tokio::spawn(run_session_sweeper(store.clone(), SWEEP_INTERVAL));
    tracing::info!("Session sweeper started");

    store
}

/// Resolves on Ctrl+C, or SIGTERM on Unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
