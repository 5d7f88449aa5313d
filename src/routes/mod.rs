pub mod health;
pub mod words;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::AppState;

pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(health::health_check))
        .nest("/api", api_routes())
}

fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/words",
            get(words::list_words)
                .post(words::add_word)
                .delete(words::remove_word),
        )
        .route("/words/clear", post(words::clear_words))
}
