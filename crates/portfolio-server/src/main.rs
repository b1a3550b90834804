//! Portfolio HTTP Server
//!
//! Serves the portfolio site, its JSON API and the Gemini-backed chatbot.

use std::sync::Arc;

use portfolio_core::TextGenerator;
use portfolio_runtime::GeminiProvider;
use portfolio_server::{AppState, ServerConfig, build_router};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment (before the filter reads RUST_LOG)
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env()?;

    // Initialize text provider
    let provider = Arc::new(GeminiProvider::from_config(config.gemini.clone())?);

    if config.chat.credential.is_usable() {
        match provider.health_check().await {
            Ok(true) => tracing::info!("✓ Connected to Gemini ({})", config.chat.generation.model),
            Ok(false) | Err(_) => {
                tracing::warn!("⚠ Gemini not reachable - chat will answer with the fallback text");
            }
        }
    } else {
        tracing::warn!("⚠ Chatbot not configured ({:?})", config.chat.credential);
        tracing::warn!("  Set GEMINI_API_KEY in .env");
    }

    let state = AppState::new(&config, provider);
    let app = build_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;

    tracing::info!("══════════════════════════════════════════════════");
    tracing::info!("🚀 portfolio server running on http://{}", config.bind_addr);
    tracing::info!("══════════════════════════════════════════════════");
    tracing::info!("  root: {}", config.paths.root.display());
    tracing::info!("  data: {}", config.paths.data_dir.display());
    tracing::info!("");
    tracing::info!("Endpoints:");
    tracing::info!("  GET  /                  - Landing page");
    tracing::info!("  GET  /health            - Health check");
    tracing::info!("  GET  /api/portfolio     - Portfolio data");
    tracing::info!("  GET  /api/projects      - All projects");
    tracing::info!("  GET  /api/projects/{{id}} - Single project");
    tracing::info!("  POST /api/chat          - Ask the chatbot");
    tracing::info!("");

    axum::serve(listener, app).await?;

    Ok(())
}
