mod config;
mod errors;
mod generation;
mod llm_client;
mod models;
mod routes;
mod shaping;
mod share;
mod souvenir;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::{GeminiClient, TextGenerator};
use crate::routes::build_router;
use crate::souvenir::FontStore;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting qasida-api v{}", env!("CARGO_PKG_VERSION"));

    // Initialize the generation client. A missing credential is visible and
    // non-fatal: the service runs, /health reports it, and generation
    // requests return ConfigMissing until the key is provided.
    let llm: Option<Arc<dyn TextGenerator>> = match &config.gemini_api_key {
        Some(key) => {
            info!("Gemini client initialized");
            Some(Arc::new(GeminiClient::new(key.clone())))
        }
        None => {
            error!("GEMINI_API_KEY is not set — poem generation is disabled");
            None
        }
    };

    // Typeface resources are read once at startup and shared read-only.
    let fonts = Arc::new(FontStore::load(&config.amiri_font_path));

    let state = AppState {
        llm,
        config: config.clone(),
        fonts,
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
