use serde::{Deserialize, Serialize};

use crate::game::{GameResult, RoundSnapshot};
use crate::models::{Column, Feedback, GameMode, WordPair};

/// Messages sent from client to server
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    StartGame {
        mode: GameMode,
        #[serde(default)]
        rounds: Option<u32>,
    },
    Press {
        column: Column,
        index: usize,
    },
    /// The client finished showing feedback for the last attempt
    FeedbackElapsed,
    LeaveGame,
}

/// Messages sent from server to client
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    GameStarted {
        game_id: String,
        mode: GameMode,
        total_rounds: u32,
        feedback_delay_ms: u64,
    },
    RoundState {
        snapshot: RoundSnapshot,
    },
    MatchResolved {
        feedback: Feedback,
        matched_pair: Option<WordPair>,
    },
    RoundComplete {
        round: u32,
        total_rounds: u32,
    },
    GameOver {
        result: GameResult,
    },
    Error {
        message: String,
    },
}
