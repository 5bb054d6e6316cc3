//! Second Brain - a server-rendered front end for a bookmarking service.
//!
//! This is the main entry point for the web server.
//! The application is organized into the following modules:
//!
//! - `models`: Content records and Content API payloads
//! - `grid`: Card filtering and column distribution
//! - `formatter`: Inline description markup
//! - `links`: Link validation and embed derivation
//! - `draft`: The add-content form model
//! - `api`: Client for the remote Content API
//! - `templates`: HTML rendering
//! - `handlers`: HTTP route handlers

use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use second_brain::{build_router, AppState, Config};

// ============================================================================
// Main
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={},tower_http={}",
                env!("CARGO_CRATE_NAME"),
                &config.rust_log,
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let bind_addr = config.bind_addr;
    let state = Arc::new(AppState::new(config).context("Failed to build Content API client")?);
    let app = build_router(state.clone());

    let listener = tokio::net::TcpListener::bind(bind_addr)
        .await
        .with_context(|| format!("Failed to bind to {}", bind_addr))?;

    info!("Second Brain running at {}", state.config.public_url);
    info!("Content API: {}", state.api.base_url());

    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}
