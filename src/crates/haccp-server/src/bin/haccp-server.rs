//! Logbook server binary
//!
//! Loads `haccp-server.toml`, prepares the SQLite database and serves the
//! REST API until Ctrl-C or SIGTERM.

use anyhow::Context;
use haccp_server::api::{create_router, AppState};
use haccp_server::config::ServerConfig;
use haccp_server::db::DatabaseConnection;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    tracing::info!("Loading server configuration...");
    let config = ServerConfig::load().context("failed to load configuration")?;
    config.validate().context("invalid configuration")?;

    tracing::info!("Server name: {}", config.server.name);
    tracing::info!("Database path: {}", config.database.path);
    tracing::info!(
        "Backfill: {} days at {:?}",
        config.logbook.backfill_days,
        config.logbook.slots
    );
    if config.cron.secret.is_none() {
        tracing::warn!("No cron secret configured; cron endpoints are disabled");
    }

    let database_url = config.database_url();
    tracing::info!("Connecting to database: {}", database_url);
    let db = DatabaseConnection::with_max_connections(&database_url, config.database.max_connections)
        .await
        .with_context(|| format!("failed to open {}", database_url))?;

    tracing::info!("Running database migrations");
    db.run_migrations().await.context("database migration failed")?;

    tracing::info!("Performing database health check");
    db.health_check().await?;

    let state = AppState::new(db.clone(), &config)?;

    tracing::info!("Building API router");
    let app = create_router(state);

    let addr = config.bind_address();
    tracing::info!("Starting haccp-server {} on {}", haccp_server::version(), addr);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db.close().await;
    tracing::info!("haccp-server shut down gracefully");
    Ok(())
}

/// Signal for graceful shutdown (Ctrl-C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for CTRL-C: {}", e);
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
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received CTRL-C signal, shutting down");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, shutting down");
        }
    }
}
