pub mod json_file;
pub mod memory;

use async_trait::async_trait;

use crate::{error::StoreError, models::WordPair};

pub use json_file::JsonFileWordStore;
pub use memory::MemoryWordStore;

/// Where the user's word list lives.
///
/// Loading never fails: when nothing usable is stored, the built-in default
/// list is returned instead.
#[async_trait]
pub trait WordStore: Send + Sync {
    async fn load_words(&self) -> Vec<WordPair>;

    /// Append a pair; duplicates are allowed
    async fn add_word(&self, pair: WordPair) -> Result<(), StoreError>;

    /// Remove every entry equal to `pair`
    async fn remove_word(&self, pair: &WordPair) -> Result<(), StoreError>;

    /// Forget the stored list so the defaults come back
    async fn clear(&self) -> Result<(), StoreError>;
}
