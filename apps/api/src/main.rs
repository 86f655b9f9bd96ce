mod config;
mod errors;
mod gateway;
mod interview;
mod jobs;
mod resume;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{Config, Provider};
use crate::gateway::{GeminiGateway, ModelGateway, OpenAiGateway};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("jobmate_api={}", &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Jobmate API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize the model gateway for the configured provider
    let gateway: Arc<dyn ModelGateway> = match config.provider {
        Provider::OpenAi => Arc::new(OpenAiGateway::new(
            config.llm_api_key.clone(),
            config.llm_base_url.clone(),
            config.chat_model.clone(),
            config.transcription_model.clone(),
        )),
        Provider::Gemini => Arc::new(GeminiGateway::new(
            config.llm_api_key.clone(),
            config.chat_model.clone(),
        )),
    };
    info!(
        "Model gateway initialized (provider: {:?}, chat model: {})",
        config.provider, config.chat_model
    );

    // Build app state
    let state = AppState {
        gateway,
        config: config.clone(),
    };

    // Build router — CORS stays open to any origin, the front ends are
    // served from elsewhere.
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
