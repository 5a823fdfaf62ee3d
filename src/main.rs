//! Einstein Chat - persona chatbot API
//!
//! Serves the JSON API behind a browser chat widget: a fixed persona
//! (Einstein, smart and mean) answered by the Google Gemini API. The
//! server holds no conversation state; the widget threads the displayed
//! history through every request.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod chat;
mod config;
mod conversation;
mod providers;
mod routes;

use chat::ChatChain;
use config::{Config, Persona};
use providers::gemini::GeminiProvider;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub chain: Arc<ChatChain>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "einstein_chat=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // A missing credential aborts here, before any port is bound.
    let config = Config::from_env()?;
    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;

    let persona = match config.persona_file {
        Some(ref path) => Persona::from_file(path).await?,
        None => Persona::einstein(),
    };

    let provider = GeminiProvider::new(
        config.gemini_api_key.clone(),
        persona.model.clone(),
        persona.temperature,
    );
    let chain = Arc::new(ChatChain::new(persona, Arc::new(provider)));

    let persona = chain.persona();
    tracing::info!(
        "🎭 Persona ready: {} ({} @ temperature {})",
        persona.name,
        persona.model,
        persona.temperature
    );

    let state = AppState { chain };

    let app = Router::new()
        .merge(routes::router())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    tracing::info!("🧠 Hi, I am Albert. Chat API running at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
