pub mod http;

use std::collections::HashSet;
use std::path::Path;

use async_trait::async_trait;
use thiserror::Error;
use tokio::fs;

pub use http::HttpDictionary;

#[derive(Debug, Error)]
pub enum DictionaryError {
    #[error("dictionary request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("dictionary returned status {0}")]
    Status(reqwest::StatusCode),

    #[error("dictionary response could not be parsed: {0}")]
    Parse(String),

    #[error("failed to read word list: {0}")]
    Io(#[from] std::io::Error),
}

/// Something that can say whether a word exists.
///
/// Errors are returned as-is; `game::WordValidator` decides what a failure
/// means for scoring.
#[async_trait]
pub trait Dictionary: Send + Sync {
    async fn lookup(&self, word: &str) -> Result<bool, DictionaryError>;
}

/// In-memory word set, loaded from a word list file
pub struct WordListDictionary {
    words: HashSet<String>,
}

impl WordListDictionary {
    /// Load dictionary from a file
    pub async fn load<P: AsRef<Path>>(path: P) -> Result<Self, DictionaryError> {
        let content = fs::read_to_string(path).await?;
        let dict = Self::from_words(content.lines());

        tracing::info!("Loaded {} words into dictionary", dict.len());

        Ok(dict)
    }

    /// Build from any list of words; blanks and single letters are skipped
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = words
            .into_iter()
            .map(|line| line.as_ref().trim().to_uppercase())
            .filter(|word| !word.is_empty() && word.len() >= 2)
            .collect();
        Self { words }
    }

    /// Create an empty dictionary
    pub fn empty() -> Self {
        Self {
            words: HashSet::new(),
        }
    }

    /// Check if a word exists in the dictionary
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(&word.to_uppercase())
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

#[async_trait]
impl Dictionary for WordListDictionary {
    async fn lookup(&self, word: &str) -> Result<bool, DictionaryError> {
        Ok(self.contains(word))
    }
}
