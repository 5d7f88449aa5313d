use crate::{models::WordPair, AppState};
use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

/// List the stored words (defaults when the user has none)
pub async fn list_words(State(state): State<Arc<AppState>>) -> Json<Vec<WordPair>> {
    Json(state.store.load_words().await)
}

/// Add a word pair; both sides are trimmed and lower-cased first
pub async fn add_word(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<WordPair>,
) -> Result<(StatusCode, Json<Vec<WordPair>>), StatusCode> {
    let pair = payload.normalized();
    if !pair.is_playable() {
        return Err(StatusCode::BAD_REQUEST);
    }

    tracing::info!("Adding word pair: {} -> {}", pair.foreign, pair.translation);

    state.store.add_word(pair).await.map_err(|e| {
        tracing::error!("Failed to add word: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    Ok((StatusCode::CREATED, Json(state.store.load_words().await)))
}

pub async fn remove_word(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<WordPair>,
) -> Result<Json<Vec<WordPair>>, StatusCode> {
    state.store.remove_word(&payload).await.map_err(|e| {
        tracing::error!("Failed to remove word: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    Ok(Json(state.store.load_words().await))
}

pub async fn clear_words(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<WordPair>>, StatusCode> {
    state.store.clear().await.map_err(|e| {
        tracing::error!("Failed to clear words: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    tracing::info!("Word list reset to defaults");
    Ok(Json(state.store.load_words().await))
}
