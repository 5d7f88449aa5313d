pub mod game;
pub mod word;

pub use game::{
    Column, Feedback, ForeignOrder, GameMode, GameSettings, Highlight, RoundStatus, Selection,
    Token, TokenView,
};
pub use word::{PairId, SampledPair, WordPair};
