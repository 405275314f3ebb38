//! Main entry point for the Climate Guard backend.
//!
//! Initializes logging, connects and migrates the database, and serves the
//! API until Ctrl-C.

use anyhow::Context;
use climate_guard::config::Config;
use climate_guard::database::Database;
use climate_guard::repositories::UserRepository;
use climate_guard::{AppState, router};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("climate_guard=info,tower_http=info")),
        )
        .init();

    let config = Config::from_env()?;
    let db = Database::new(&config)
        .await
        .context("failed to connect to the database")?;
    db.migrate().await.context("failed to apply migrations")?;

    let port = config.server_port;
    let store = Arc::new(UserRepository::new(db.pool().clone()));
    let app = router(AppState::new(config, store)?);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port))
        .await
        .with_context(|| format!("failed to bind port {}", port))?;

    info!("Starting Climate Guard API server on port {}", port);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db.close().await;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
