use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Running counters for one game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scoreboard {
    /// Correct attempts
    pub score: u32,
    /// All resolved attempts
    pub total: u32,
    /// Distinct pairs matched over the whole game
    pub matched_count: u32,
    pub mistakes: u32,
    pub round_matched: u32,
    pub round_mistakes: u32,
    pub current_round: u32,
    pub total_rounds: u32,
}

impl Scoreboard {
    pub fn new(total_rounds: u32) -> Self {
        Self {
            score: 0,
            total: 0,
            matched_count: 0,
            mistakes: 0,
            round_matched: 0,
            round_mistakes: 0,
            current_round: 1,
            total_rounds,
        }
    }

    pub fn record_attempt(&mut self, correct: bool) {
        self.total += 1;
        if correct {
            self.score += 1;
            self.matched_count += 1;
            self.round_matched += 1;
        } else {
            self.mistakes += 1;
            self.round_mistakes += 1;
        }
    }

    pub fn advance_round(&mut self) {
        self.current_round += 1;
        self.round_matched = 0;
        self.round_mistakes = 0;
    }

    pub fn is_last_round(&self) -> bool {
        self.current_round >= self.total_rounds
    }

    pub fn to_result(&self) -> GameResult {
        GameResult {
            score: self.score,
            total: self.total,
            mistakes: self.mistakes,
            matched_count: self.matched_count,
            rounds_played: self.current_round,
            finished_at: Utc::now(),
        }
    }
}

/// Final tally handed over when a game completes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameResult {
    pub score: u32,
    pub total: u32,
    pub mistakes: u32,
    pub matched_count: u32,
    pub rounds_played: u32,
    pub finished_at: DateTime<Utc>,
}

impl GameResult {
    /// Percentage of attempts that were correct
    pub fn accuracy(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            (self.score as f64 / self.total as f64) * 100.0
        }
    }
}
