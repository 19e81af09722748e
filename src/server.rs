//! HTTP server initialization and runtime setup.
//!
//! Handles the database pool, service wiring, and the Axum server lifecycle.

use crate::application::services::{AuthService, LinkService, SessionSettings};
use crate::config::Config;
use crate::infrastructure::oauth::{GitHubConfig, GitHubProvider};
use crate::infrastructure::persistence::{Database, SqliteLinkRepository};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::Result;
use axum::ServiceExt;
use axum::extract::Request;
use std::sync::Arc;
use std::time::Duration;
use tower::Layer;
use tower_http::normalize_path::NormalizePathLayer;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - SQLite connection pool
/// - Apply migrations
/// - GitHub OAuth client
/// - Axum HTTP server
///
/// Returns once Ctrl-C or SIGTERM is received and in-flight requests finish.
///
/// # Errors
///
/// Returns an error if:
/// - The database cannot be opened or migrated
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let pool = Database::connect(&config.db_path, config.db_max_connections).await?;

    let provider = GitHubProvider::new(
        GitHubConfig::new(
            config.github_client_id.clone(),
            config.github_client_secret.clone(),
            config.github_redirect_url.clone(),
        ),
        Duration::from_secs(config.oauth_timeout_seconds),
    )?;

    let link_repository = Arc::new(SqliteLinkRepository::new(Arc::new(pool)));
    let link_service = Arc::new(LinkService::new(link_repository));
    let auth_service = Arc::new(AuthService::new(
        Arc::new(provider),
        SessionSettings {
            secret: config.session_secret.clone(),
            secure_cookies: config.cookie_secure,
        },
    ));

    let state = AppState::new(link_service, auth_service);

    let app = NormalizePathLayer::trim_trailing_slash().layer(app_router(state));

    let addr = config.listen_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Resolves on Ctrl-C, or SIGTERM on Unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {e}");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => tracing::error!("Failed to listen for SIGTERM: {e}"),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
