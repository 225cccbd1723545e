// Webcal API server
// Decision: Store handle is created once here and injected into every handler
// Usage: webcal [host:port]

use anyhow::{Context, Result};
use std::sync::Arc;
use webcal_control_plane::build_app;
use webcal_control_plane::config::ServerConfig;
use webcal_control_plane::storage::StorageBackend;
use webcal_control_plane::telemetry::{init_telemetry, TelemetryConfig};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env before reading any configuration
    let dotenv_path = dotenvy::dotenv().ok();

    init_telemetry(&TelemetryConfig::from_env());

    tracing::info!("webcal starting...");
    if let Some(path) = dotenv_path {
        tracing::debug!(path = %path.display(), "Loaded environment file");
    }

    let config = ServerConfig::load(std::env::args().nth(1))?;

    // Initialize storage
    let db = if config.dev_mode {
        tracing::warn!("DEV_MODE enabled: using in-memory storage, data is lost on restart");
        StorageBackend::in_memory()
    } else {
        let db = StorageBackend::sqlite(&config.database_url)
            .await
            .context("Failed to connect to database")?;
        tracing::info!(url = %config.database_url, "Connected to database");
        db
    };

    if !config.api_prefix.is_empty() {
        tracing::info!(prefix = %config.api_prefix, "API prefix configured");
    }
    if config.cors_origins.is_empty() {
        tracing::info!("CORS not configured (same-origin requests only)");
    } else {
        tracing::info!(origins = ?config.cors_origins, "CORS origins configured");
    }

    let app = build_app(Arc::new(db), &config);

    // Start HTTP server
    let listener = tokio::net::TcpListener::bind(config.bind_addr.as_str())
        .await
        .with_context(|| format!("Failed to bind to address {}", config.bind_addr))?;
    tracing::info!("HTTP server listening on {}", config.bind_addr);

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
