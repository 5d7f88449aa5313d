use serde::{Deserialize, Serialize};

/// A foreign word and its translation.
///
/// Older word lists were stored as `dutch`/`english`, so those field names
/// are still accepted when reading.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WordPair {
    #[serde(alias = "dutch")]
    pub foreign: String,
    #[serde(alias = "english")]
    pub translation: String,
}

impl WordPair {
    pub fn new(foreign: impl Into<String>, translation: impl Into<String>) -> Self {
        Self {
            foreign: foreign.into(),
            translation: translation.into(),
        }
    }

    /// Both sides carry text once surrounding whitespace is ignored
    pub fn is_playable(&self) -> bool {
        !self.foreign.trim().is_empty() && !self.translation.trim().is_empty()
    }

    /// Trimmed, lower-case copy used when a user adds a word
    pub fn normalized(&self) -> Self {
        Self {
            foreign: self.foreign.trim().to_lowercase(),
            translation: self.translation.trim().to_lowercase(),
        }
    }
}

/// Identity of a pool entry for the lifetime of one game.
///
/// Two entries with identical text still get different ids, so a foreign
/// word is only ever matched with the translation it was entered with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PairId(pub u32);

/// A pool entry tagged with its identity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampledPair {
    pub id: PairId,
    pub pair: WordPair,
}
