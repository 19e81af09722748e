//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the server starts.
//!
//! ## Required Variables
//!
//! - `DB_PATH` - SQLite database file (created if missing)
//!
//! ## GitHub OAuth
//!
//! ```bash
//! export GITHUB_CLIENT_ID="Iv1.0123456789abcdef"
//! export GITHUB_CLIENT_SECRET="..."
//! export GITHUB_REDIRECT_URL="http://localhost:8080/callback"
//! ```
//!
//! These default to empty strings so the service can start without them, but
//! login cannot succeed until they are set. [`Config::print_summary`] warns
//! about each one that is missing.
//!
//! ## Optional Variables
//!
//! - `HOST` - Bind host (default: `0.0.0.0`)
//! - `PORT` - Bind port (default: `8080`)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)
//! - `SESSION_SECRET` - Enables HMAC-signed session cookies
//! - `COOKIE_SECURE` - Adds the `Secure` attribute to cookies (default: `false`)
//! - `OAUTH_TIMEOUT_SECONDS` - Timeout for calls to GitHub (default: 10)
//! - `DB_MAX_CONNECTIONS` - SQLite pool size (default: 5)

use anyhow::{Context, Result};
use std::env;

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub db_path: String,
    pub github_client_id: String,
    pub github_client_secret: String,
    pub github_redirect_url: String,
    pub host: String,
    pub port: u16,
    pub log_level: String,
    pub log_format: String,
    /// Secret keying the session cookie signature. `None` keeps cookies unsigned.
    pub session_secret: Option<String>,
    pub cookie_secure: bool,
    pub oauth_timeout_seconds: u64,
    pub db_max_connections: u32,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if `DB_PATH` is missing or a numeric variable does not parse.
    pub fn from_env() -> Result<Self> {
        let db_path = env::var("DB_PATH").context("DB_PATH must be set")?;

        let github_client_id = env::var("GITHUB_CLIENT_ID").unwrap_or_default();
        let github_client_secret = env::var("GITHUB_CLIENT_SECRET").unwrap_or_default();
        let github_redirect_url = env::var("GITHUB_REDIRECT_URL").unwrap_or_default();

        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = match env::var("PORT") {
            Ok(v) => v
                .parse()
                .with_context(|| format!("PORT must be a number between 1 and 65535, got '{v}'"))?,
            Err(_) => 8080,
        };

        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

        let session_secret = env::var("SESSION_SECRET").ok();

        let cookie_secure = env::var("COOKIE_SECURE")
            .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
            .unwrap_or(false);

        let oauth_timeout_seconds = env::var("OAUTH_TIMEOUT_SECONDS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(10);

        let db_max_connections = env::var("DB_MAX_CONNECTIONS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(5);

        Ok(Self {
            db_path,
            github_client_id,
            github_client_secret,
            github_redirect_url,
            host,
            port,
            log_level,
            log_format,
            session_secret,
            cookie_secure,
            oauth_timeout_seconds,
            db_max_connections,
        })
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `db_path` is empty
    /// - `port` is zero
    /// - `log_format` is not `text` or `json`
    /// - `oauth_timeout_seconds` or `db_max_connections` is zero
    /// - `session_secret` is set but empty
    pub fn validate(&self) -> Result<()> {
        if self.db_path.trim().is_empty() {
            anyhow::bail!("DB_PATH must not be empty");
        }

        if self.port == 0 {
            anyhow::bail!("PORT must be between 1 and 65535");
        }

        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        if self.oauth_timeout_seconds == 0 {
            anyhow::bail!("OAUTH_TIMEOUT_SECONDS must be greater than 0");
        }

        if self.db_max_connections == 0 {
            anyhow::bail!("DB_MAX_CONNECTIONS must be at least 1");
        }

        if let Some(ref secret) = self.session_secret
            && secret.is_empty()
        {
            anyhow::bail!("SESSION_SECRET must not be empty when set");
        }

        Ok(())
    }

    /// Bind address in `host:port` form.
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Prints configuration summary (without sensitive data).
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen address: {}", self.listen_addr());
        tracing::info!("  Database: {}", self.db_path);
        tracing::info!("  Pool size: {}", self.db_max_connections);
        tracing::info!("  GitHub client id: {}", display_or_unset(&self.github_client_id));
        tracing::info!("  GitHub redirect: {}", display_or_unset(&self.github_redirect_url));
        tracing::info!(
            "  Signed sessions: {}",
            if self.session_secret.is_some() { "enabled" } else { "disabled" }
        );
        tracing::info!("  Secure cookies: {}", self.cookie_secure);
        tracing::info!("  OAuth timeout: {}s", self.oauth_timeout_seconds);
        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);

        for (name, value) in [
            ("GITHUB_CLIENT_ID", &self.github_client_id),
            ("GITHUB_CLIENT_SECRET", &self.github_client_secret),
            ("GITHUB_REDIRECT_URL", &self.github_redirect_url),
        ] {
            if value.is_empty() {
                tracing::warn!("{name} is not set; GitHub login will fail");
            }
        }
    }
}

fn display_or_unset(value: &str) -> &str {
    if value.is_empty() { "(unset)" } else { value }
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
