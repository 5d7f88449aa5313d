mod config;
mod error;
mod game;
mod models;
mod routes;
mod store;
mod utils;
mod websocket;

use std::sync::Arc;

use anyhow::Result;
use axum::{routing::get, Router};
use chrono::{DateTime, Utc};
use config::Config;
use dashmap::DashMap;
use models::GameMode;
use store::{JsonFileWordStore, WordStore};
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

/// Application state shared across all handlers
pub struct AppState {
    pub config: Config,
    pub store: Arc<dyn WordStore>,
    /// Games currently being played, for monitoring only.
    /// The engines themselves live with their connection.
    pub active_games: DashMap<Uuid, GameSession>,
}

impl AppState {
    pub fn new(config: Config, store: Arc<dyn WordStore>) -> Self {
        Self {
            config,
            store,
            active_games: DashMap::new(),
        }
    }
}

/// Bookkeeping for a running game
#[derive(Debug, Clone)]
pub struct GameSession {
    pub game_id: Uuid,
    pub connection_id: Uuid,
    pub mode: GameMode,
    pub started_at: DateTime<Utc>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "word_match_backend=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Word Match backend server...");

    // Load configuration
    let config = Config::from_env()?;
    tracing::info!("Configuration loaded");

    let store = JsonFileWordStore::new(&config.words.store_path);
    let word_count = store.load_words().await.len();
    tracing::info!(
        "Word list ready at {} ({} words)",
        store.path().display(),
        word_count
    );
    if word_count < config.game.round_size {
        tracing::warn!(
            "Only {} words available; games need at least {}",
            word_count,
            config.game.round_size
        );
    }

    // Create application state
    let state = Arc::new(AppState::new(config.clone(), Arc::new(store)));

    // Configure CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Serve frontend static files
    let frontend_service = ServeDir::new(&config.server.frontend_dir);

    // Build router
    let app = Router::new()
        // WebSocket endpoint
        .route("/ws", get(websocket::handle_websocket))
        // API routes
        .merge(routes::create_routes())
        .fallback_service(frontend_service)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let addr = config.server_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Server listening on {}", addr);
    tracing::info!("WebSocket endpoint: ws://{}/ws", addr);
    tracing::info!("Health check: http://{}/health", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// State backed by an in-memory word list
#[cfg(test)]
pub(crate) fn test_state(words: Vec<models::WordPair>) -> Arc<AppState> {
    let config = Config::from_vars(|_| None).expect("default config");
    Arc::new(AppState::new(
        config,
        Arc::new(store::MemoryWordStore::with_words(words)),
    ))
}
