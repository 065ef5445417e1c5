use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::dictionary::Dictionary;

/// Outcome of checking one word
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Valid,
    Invalid,
    /// The dictionary could not be reached or answered nonsense
    Unavailable,
}

impl Verdict {
    pub fn is_valid(self) -> bool {
        matches!(self, Verdict::Valid)
    }
}

/// Fail-closed front for a dictionary: lookups never error, a failed lookup
/// simply doesn't count as a word.
#[derive(Clone)]
pub struct WordValidator {
    dictionary: Arc<dyn Dictionary>,
}

impl WordValidator {
    pub fn new(dictionary: Arc<dyn Dictionary>) -> Self {
        Self { dictionary }
    }

    pub async fn validate(&self, word: &str) -> Verdict {
        match self.dictionary.lookup(word).await {
            Ok(true) => Verdict::Valid,
            Ok(false) => Verdict::Invalid,
            Err(e) => {
                tracing::warn!("Dictionary lookup for {} failed, treating as invalid: {}", word, e);
                Verdict::Unavailable
            }
        }
    }

    /// Check if word exists in dictionary
    pub async fn is_valid_word(&self, word: &str) -> bool {
        self.validate(word).await.is_valid()
    }
}
