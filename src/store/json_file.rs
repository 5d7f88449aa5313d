use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::{fs, sync::Mutex};

use super::WordStore;
use crate::{error::StoreError, models::WordPair, utils::default_words};

/// Word list persisted as a JSON array on disk
pub struct JsonFileWordStore {
    path: PathBuf,
    /// Serialises read-modify-write cycles
    lock: Mutex<()>,
}

impl JsonFileWordStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `Ok(None)` when nothing has been saved yet
    async fn read(&self) -> Result<Option<Vec<WordPair>>, StoreError> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Ok(Some(serde_json::from_str(&content)?))
    }

    async fn write(&self, words: &[WordPair]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }

        let json = serde_json::to_string_pretty(words)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).await?;
        fs::rename(&tmp, &self.path).await?;
        Ok(())
    }

    /// Stored list, or the defaults when it is missing or unreadable
    async fn current(&self) -> Vec<WordPair> {
        match self.read().await {
            Ok(Some(words)) => words,
            Ok(None) => default_words(),
            Err(e) => {
                tracing::warn!(
                    "Failed to read word list from {}: {}. Using default words.",
                    self.path.display(),
                    e
                );
                default_words()
            }
        }
    }
}

#[async_trait]
impl WordStore for JsonFileWordStore {
    async fn load_words(&self) -> Vec<WordPair> {
        let _guard = self.lock.lock().await;

        let words = match self.read().await {
            Ok(Some(words)) => words,
            Ok(None) => {
                let defaults = default_words();
                if let Err(e) = self.write(&defaults).await {
                    tracing::warn!(
                        "Failed to save default words to {}: {}",
                        self.path.display(),
                        e
                    );
                }
                defaults
            }
            Err(e) => {
                tracing::warn!(
                    "Failed to read word list from {}: {}. Using default words.",
                    self.path.display(),
                    e
                );
                default_words()
            }
        };

        words.into_iter().filter(WordPair::is_playable).collect()
    }

    async fn add_word(&self, pair: WordPair) -> Result<(), StoreError> {
        let _guard = self.lock.lock().await;
        let mut words = self.current().await;
        words.push(pair);
        self.write(&words).await
    }

    async fn remove_word(&self, pair: &WordPair) -> Result<(), StoreError> {
        let _guard = self.lock.lock().await;
        let mut words = self.current().await;
        words.retain(|w| w != pair);
        self.write(&words).await
    }

    async fn clear(&self) -> Result<(), StoreError> {
        let _guard = self.lock.lock().await;
        match fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
