mod config;
mod errors;
mod extract;
mod llm_client;
mod models;
mod render;
mod routes;
mod secrets;
mod state;
mod tailor;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::secrets::{AwsSecretStore, SecretAccessor};
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Tailor Resume API v{}", env!("CARGO_PKG_VERSION"));

    if config.openai_api_key.is_some() {
        info!("Using OPENAI_API_KEY from environment");
    } else {
        info!(
            "API key will be read from Secrets Manager ({}, {})",
            config.openai_secret_id, config.aws_region
        );
    }
    let store = Arc::new(AwsSecretStore::from_region(&config.aws_region).await);
    let secrets = Arc::new(SecretAccessor::new(
        config.openai_api_key.clone(),
        config.openai_secret_id.clone(),
        store,
    ));

    let llm = LlmClient::new(&config, secrets).context("Failed to build HTTP client")?;
    info!("LLM client initialized (model: {})", llm.model());

    let state = AppState {
        config: config.clone(),
        llm,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
