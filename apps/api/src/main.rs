use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use interview_api::config::Config;
use interview_api::llm_client::LlmClient;
use interview_api::routes::build_router;
use interview_api::state::AppState;
use interview_api::store::FileSessionStore;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            let crate_name = env!("CARGO_PKG_NAME").replace('-', "_");
            EnvFilter::new(format!("{crate_name}={}", &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Interview Assistant API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize LLM client; a missing key is fine, every AI path degrades
    // to its deterministic fallback.
    let llm = LlmClient::new(config.gemini_api_key.clone(), config.gemini_model.clone());
    if llm.is_configured() {
        info!("Gemini key configured (model: {})", llm.model());
    } else {
        warn!("GEMINI_API_KEY not set — question generation and evaluation will use fallbacks");
    }

    // Initialize session store
    let store = Arc::new(FileSessionStore::new(config.sessions_file.clone()));
    info!("Session store: {}", config.sessions_file.display());

    let state = AppState {
        store,
        llm,
        config: config.clone(),
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
