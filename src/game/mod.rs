// Round engine modules

pub mod engine;
pub mod round;
pub mod scoreboard;
pub mod shuffle;
pub mod validator;

pub use engine::{RoundEngine, RoundSnapshot, SelectionOutcome};
pub use round::Round;
pub use scoreboard::{GameResult, Scoreboard};
pub use validator::MatchValidator;
