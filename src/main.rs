use std::sync::Arc;

use anyhow::Result;
use loupdin_backend::{app, build_validator, config::Config, session_cleanup_task, AppState};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "loupdin_backend=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Loupdin backend server...");

    // Load configuration
    let config = Config::from_env()?;
    tracing::info!("Configuration loaded");

    // Create shared HTTP client for reusing connections
    let http_client = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(config.dictionary.timeout_secs))
        .build()?;
    tracing::info!("HTTP client initialized");

    let validator = build_validator(&config, http_client).await;

    // Create application state
    let state = Arc::new(AppState::new(config.clone(), validator));

    // Spawn background task to drop idle games
    let cleanup_state = state.clone();
    tokio::spawn(async move {
        session_cleanup_task(cleanup_state).await;
    });

    let app = app(state);

    // Start server
    let addr = config.server_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Server listening on {}", addr);
    tracing::info!("WebSocket endpoint: ws://{}/ws?game_id=<id>", addr);
    tracing::info!("Health check: http://{}/health", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
