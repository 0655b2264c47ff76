//! CLI administration tool for task-management-frontend.
//!
//! Provides operational checks that do not need a browser: probing the
//! health endpoint, trying credentials against the auth backend and
//! validating the configuration.
//!
//! # Usage
//!
//! ```bash
//! # Probe a running instance (exit code 1 if unhealthy, usable as a container probe)
//! cargo run --bin admin -- health
//! cargo run --bin admin -- health --url http://frontend:3000
//!
//! # Try credentials against AUTH_API_URL
//! cargo run --bin admin -- login --email john.doe@example.com
//!
//! # Validate environment configuration
//! cargo run --bin admin -- config check
//! ```
//!
//! # Environment Variables
//!
//! - `AUTH_API_URL`, `AUTH_API_TIMEOUT_SECS` for `login`
//! - everything in [`task_management_frontend::config`] for `config check`

use task_management_frontend::api::dto::health::HealthResponse;
use task_management_frontend::config::{self, DEFAULT_AUTH_API_URL};
use task_management_frontend::domain::repositories::{AuthGateway, SessionStore};
use task_management_frontend::infrastructure::auth_api::{AuthClientConfig, HttpAuthClient};
use task_management_frontend::infrastructure::session::RedisSessionStore;
use task_management_frontend::utils::mask::{mask_connection_string, mask_token};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Input, Password};
use std::time::Duration;

const PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// CLI tool for operating task-management-frontend.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Probe the health endpoint of a running instance
    Health {
        /// Base URL of the instance
        #[arg(short, long, default_value = "http://localhost:3000")]
        url: String,
    },

    /// Try a login against the authentication backend
    Login {
        /// Account email (prompted if omitted)
        #[arg(short, long)]
        email: Option<String>,
    },

    /// Configuration operations
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Configuration subcommands.
#[derive(Subcommand)]
enum ConfigAction {
    /// Load and validate configuration from the environment
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Health { url } => check_health(&url).await?,
        Commands::Login { email } => try_login(email).await?,
        Commands::Config { action } => handle_config_action(action).await?,
    }

    Ok(())
}

/// Calls `GET {url}/api/health` and prints the report.
///
/// # Errors
///
/// Fails on connection errors, non-2xx responses and unparsable bodies, so
/// the process exit code can drive a container health check.
async fn check_health(base_url: &str) -> Result<()> {
    let endpoint = format!("{}/api/health", base_url.trim_end_matches('/'));
    println!("{} {}", "🔍 Probing".bright_blue(), endpoint.bright_white());

    let client = reqwest::Client::builder()
        .timeout(PROBE_TIMEOUT)
        .build()
        .context("Failed to build HTTP client")?;

    let response = client
        .get(&endpoint)
        .send()
        .await
        .with_context(|| format!("Failed to reach {endpoint}"))?;

    let status = response.status();
    if !status.is_success() {
        println!("{}", format!("❌ Unhealthy: HTTP {status}").red().bold());
        anyhow::bail!("health endpoint returned {status}");
    }

    let health: HealthResponse = response
        .json()
        .await
        .context("Health endpoint returned an unexpected body")?;

    println!();
    println!("  Status:  {}", health.status.green().bold());
    println!("  Service: {}", health.service.cyan());
    println!("  Uptime:  {}s", health.uptime.to_string().bright_white());
    println!("  Time:    {}", health.timestamp.bright_black());
    println!();

    Ok(())
}

/// Prompts for a password and tries the credentials against the backend.
///
/// Tokens are printed masked.
async fn try_login(email: Option<String>) -> Result<()> {
    println!("{}", "🔑 Test Login".bright_blue().bold());
    println!();

    let base_url =
        std::env::var("AUTH_API_URL").unwrap_or_else(|_| DEFAULT_AUTH_API_URL.to_string());
    let timeout_secs = std::env::var("AUTH_API_TIMEOUT_SECS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(10);

    let client = HttpAuthClient::new(&AuthClientConfig {
        base_url: base_url.clone(),
        timeout: Duration::from_secs(timeout_secs),
        max_retries: 0,
    })
    .context("Invalid AUTH_API_URL")?;

    let email = match email {
        Some(e) => e,
        None => Input::new().with_prompt("Email").interact_text()?,
    };
    let password = Password::new().with_prompt("Password").interact()?;

    println!(
        "  Backend: {}",
        mask_connection_string(&base_url).bright_black()
    );
    println!();

    match client.login(email.trim(), &password).await {
        Ok(response) => {
            println!("{}", "✅ Login succeeded".green().bold());
            println!();
            println!("  User ID:       {}", response.user.id.cyan());
            println!(
                "  Name:          {}",
                response.user.display_name().bright_white()
            );
            if let Some(role) = &response.user.role {
                println!("  Role:          {}", role.bright_white());
            }
            println!(
                "  Access token:  {}",
                mask_token(&response.access_token).bright_yellow()
            );
            println!(
                "  Refresh token: {}",
                mask_token(&response.refresh_token).bright_yellow()
            );
            if let Some(expires_in) = response.expires_in {
                println!("  Expires in:    {}s", expires_in.to_string().bright_white());
            }
            println!();
            Ok(())
        }
        Err(e) => {
            println!("{}", format!("❌ {}", e.message()).red().bold());
            anyhow::bail!("login failed")
        }
    }
}

/// Connects to the Redis session store and runs its health check.
async fn check_session_store(redis_url: &str, ttl_seconds: u64) -> Result<()> {
    println!("{}", "🔍 Checking session store...".bright_blue());

    let store = RedisSessionStore::connect(redis_url, ttl_seconds)
        .await
        .context("Failed to connect to the Redis session store")?;

    if !store.health_check().await {
        println!("{}", "❌ Redis session store is not responding".red().bold());
        anyhow::bail!("session store health check failed");
    }

    println!("{}", "✅ Redis session store OK".green().bold());
    println!();

    Ok(())
}

/// Handles configuration commands.
///
/// `config check` also pings the Redis session store when one is configured.
async fn handle_config_action(action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Check => {
            println!("{}", "🔍 Checking configuration...".bright_blue());

            let config = config::load_from_env()?;

            println!("{}", "✅ Configuration OK".green().bold());
            println!();
            println!("  Listen:         {}", config.listen_addr.bright_white());
            println!(
                "  Auth API:       {}",
                mask_connection_string(&config.auth_api_url).bright_white()
            );
            println!(
                "  Timeout:        {}s (retries: {})",
                config.auth_api_timeout_secs, config.auth_api_retries
            );
            match &config.redis_url {
                Some(url) => println!(
                    "  Sessions:       Redis {}",
                    mask_connection_string(url).bright_white()
                ),
                None => println!("  Sessions:       {}", "in-memory".bright_white()),
            }
            println!("  Session TTL:    {}s", config.session_ttl_seconds);
            println!("  Secure cookies: {}", config.cookie_secure);
            println!("  Behind proxy:   {}", config.behind_proxy);
            println!();

            if let Some(url) = &config.redis_url {
                check_session_store(url, config.session_ttl_seconds).await?;
            }
        }
    }

    Ok(())
}
