use anyhow::{Context, Result};
use rand::{rngs::StdRng, SeedableRng};
use serde::Deserialize;
use std::env;

use crate::models::{ForeignOrder, GameMode, GameSettings};

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub words: WordsConfig,
    pub game: GameConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub frontend_dir: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WordsConfig {
    pub store_path: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GameConfig {
    pub round_size: usize,
    pub default_rounds: u32,
    pub max_rounds: u32,
    pub window_pool_size: usize,
    pub feedback_delay_ms: u64,
    pub foreign_order: ForeignOrder,
    /// Fixed RNG seed, for reproducible games
    pub seed: Option<u64>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Build the config from any variable lookup
    pub fn from_vars<F>(var: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let server = ServerConfig {
            host: var("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: var("PORT")
                .unwrap_or_else(|| "3000".to_string())
                .parse()
                .context("PORT must be a number")?,
            frontend_dir: var("FRONTEND_DIR").unwrap_or_else(|| "../frontend".to_string()),
        };

        let words = WordsConfig {
            store_path: var("WORDS_PATH").unwrap_or_else(|| "./data/words.json".to_string()),
        };

        let game = GameConfig {
            round_size: var("ROUND_SIZE")
                .and_then(|v| v.parse::<usize>().ok())
                .filter(|&n| n > 0)
                .unwrap_or(6),
            default_rounds: var("DEFAULT_ROUNDS")
                .and_then(|v| v.parse::<u32>().ok())
                .filter(|&n| n > 0)
                .unwrap_or(1),
            max_rounds: var("MAX_ROUNDS")
                .and_then(|v| v.parse::<u32>().ok())
                .filter(|&n| n > 0)
                .unwrap_or(10),
            window_pool_size: var("WINDOW_POOL_SIZE")
                .and_then(|v| v.parse::<usize>().ok())
                .unwrap_or(20),
            feedback_delay_ms: var("FEEDBACK_DELAY_MS")
                .and_then(|v| v.parse::<u64>().ok())
                .unwrap_or(800),
            foreign_order: match var("FOREIGN_ORDER").as_deref() {
                Some("reshuffle") => ForeignOrder::Reshuffle,
                _ => ForeignOrder::Stable,
            },
            seed: var("GAME_SEED").and_then(|v| v.parse::<u64>().ok()),
        };

        Ok(Config {
            server,
            words,
            game,
        })
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl GameConfig {
    /// Settings for a new game; `rounds` is clamped to `1..=max_rounds`
    pub fn settings(&self, mode: GameMode, rounds: Option<u32>) -> GameSettings {
        let total_rounds = rounds
            .unwrap_or(self.default_rounds)
            .clamp(1, self.max_rounds.max(1));

        GameSettings {
            round_size: self.round_size,
            total_rounds,
            mode,
            window_pool_size: self.window_pool_size.max(self.round_size),
            foreign_order: self.foreign_order,
        }
    }

    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }
}
