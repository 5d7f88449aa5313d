use async_trait::async_trait;
use tokio::sync::RwLock;

use super::WordStore;
use crate::{error::StoreError, models::WordPair, utils::default_words};

/// Word list kept in process memory
#[derive(Default)]
pub struct MemoryWordStore {
    words: RwLock<Option<Vec<WordPair>>>,
}

impl MemoryWordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_words(words: Vec<WordPair>) -> Self {
        Self {
            words: RwLock::new(Some(words)),
        }
    }
}

#[async_trait]
impl WordStore for MemoryWordStore {
    async fn load_words(&self) -> Vec<WordPair> {
        let mut words = self.words.write().await;
        words
            .get_or_insert_with(default_words)
            .iter()
            .filter(|pair| pair.is_playable())
            .cloned()
            .collect()
    }

    async fn add_word(&self, pair: WordPair) -> Result<(), StoreError> {
        let mut words = self.words.write().await;
        words.get_or_insert_with(default_words).push(pair);
        Ok(())
    }

    async fn remove_word(&self, pair: &WordPair) -> Result<(), StoreError> {
        let mut words = self.words.write().await;
        words.get_or_insert_with(default_words).retain(|w| w != pair);
        Ok(())
    }

    async fn clear(&self) -> Result<(), StoreError> {
        *self.words.write().await = None;
        Ok(())
    }
}
