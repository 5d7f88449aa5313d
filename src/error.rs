use thiserror::Error;

use crate::models::Column;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Not enough words to start a game: {available} available, {required} required")]
    InsufficientWords { available: usize, required: usize },

    #[error("Invalid selection in {column} column at index {index}: {reason}")]
    InvalidSelection {
        column: Column,
        index: usize,
        reason: &'static str,
    },

    #[error("Invalid game settings: {0}")]
    InvalidSettings(&'static str),

    #[error("Game is already finished")]
    GameFinished,
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
