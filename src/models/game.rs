use std::fmt;

use serde::{Deserialize, Serialize};

use super::PairId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameMode {
    /// A fixed number of rounds, each a fresh sample from the pool
    FixedRounds,
    /// One long round; every match releases the next pair from a backlog
    SlidingWindow,
}

/// How the foreign column reacts when a sliding window refills
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ForeignOrder {
    /// Surviving words stay put; the newcomer takes the vacated slot
    #[default]
    Stable,
    Reshuffle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Column {
    /// Foreign words
    Left,
    /// Translations
    Right,
}

impl Column {
    pub fn other(self) -> Self {
        match self {
            Column::Left => Column::Right,
            Column::Right => Column::Left,
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Column::Left => f.write_str("left"),
            Column::Right => f.write_str("right"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feedback {
    Correct,
    Incorrect,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundStatus {
    InProgress,
    RoundComplete,
    GameComplete,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSettings {
    pub round_size: usize,
    pub total_rounds: u32,
    pub mode: GameMode,
    /// Upper bound on how many pool pairs a sliding-window game plays through
    pub window_pool_size: usize,
    pub foreign_order: ForeignOrder,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            round_size: 6,
            total_rounds: 1,
            mode: GameMode::FixedRounds,
            window_pool_size: 20,
            foreign_order: ForeignOrder::Stable,
        }
    }
}

/// One word on the board
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub pair_id: PairId,
    pub text: String,
    pub disabled: bool,
}

/// Pending selection per column
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub left: Option<usize>,
    pub right: Option<usize>,
}

impl Selection {
    pub fn get(&self, column: Column) -> Option<usize> {
        match column {
            Column::Left => self.left,
            Column::Right => self.right,
        }
    }

    /// Select `index` in `column`, dropping anything pending elsewhere
    pub fn only(column: Column, index: usize) -> Self {
        match column {
            Column::Left => Self {
                left: Some(index),
                right: None,
            },
            Column::Right => Self {
                left: None,
                right: Some(index),
            },
        }
    }

    pub fn is_empty(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Highlight {
    Plain,
    Selected,
    Correct,
    Incorrect,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenView {
    pub text: String,
    pub disabled: bool,
    pub highlight: Highlight,
}
