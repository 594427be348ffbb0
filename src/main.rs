//! AI Brain Engine - Decision backend for the game automation client
//!
//! The Engine is the backend server that:
//! - Receives game-state snapshots from the client plugin
//! - Decides the next action per the operator's selected mode
//! - Integrates with an OpenAI-compatible LLM for planning

mod application;
mod domain;
mod infrastructure;

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::infrastructure::config::AppConfig;
use crate::infrastructure::http;
use crate::infrastructure::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "aibrain_engine=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting AI Brain Engine");

    // Load configuration
    let config = AppConfig::from_env()?;
    tracing::info!("Configuration loaded");
    tracing::info!("  Oracle: {}", config.oracle_base_url);
    tracing::info!("  Model: {}", config.oracle_model);
    if config.oracle_api_key.is_none() {
        tracing::warn!("OPENAI_API_KEY is not set, oracle requests are sent without credentials");
    }

    // Initialize application state
    let state = Arc::new(AppState::new(config)?);
    tracing::info!(mode = %state.control.read().await.mode, "Application state initialized");

    let app = http::create_router(state.clone());

    // Start the server
    let addr = state.config.listen_addr();
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    // Run server until Ctrl+C
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
    }

    Ok(())
}
