pub mod default_words;

pub use default_words::default_words;
