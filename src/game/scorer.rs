use futures::future::join_all;
use serde::{Deserialize, Serialize};

use super::{
    board::Position,
    extractor::{Direction, ExtractedWord},
    validator::{Verdict, WordValidator},
};
use crate::utils::letters::letter_value;

/// How one extracted word fared
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordOutcome {
    pub word: String,
    pub positions: Vec<Position>,
    pub direction: Direction,
    pub verdict: Verdict,
    /// Zero unless the word validated
    pub score: u32,
}

/// Result of scoring a whole move
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveScore {
    pub words: Vec<WordOutcome>,
    pub total: u32,
}

impl MoveScore {
    /// Reduce per-word verdicts, in extraction order, into a move score
    pub fn from_verdicts(words: &[ExtractedWord], verdicts: Vec<Verdict>) -> Self {
        let words: Vec<WordOutcome> = words
            .iter()
            .zip(verdicts)
            .map(|(word, verdict)| WordOutcome {
                word: word.text.clone(),
                positions: word.positions.clone(),
                direction: word.direction,
                verdict,
                score: if verdict.is_valid() {
                    Scorer::score_word(&word.text)
                } else {
                    0
                },
            })
            .collect();
        let total = words.iter().map(|w| w.score).sum();
        Self { words, total }
    }
}

pub struct Scorer;

impl Scorer {
    /// Sum of the fixed letter values. Characters outside A-Z count zero.
    pub fn score_word(word: &str) -> u32 {
        word.chars().filter_map(letter_value).sum()
    }

    /// Validate every word concurrently and add up the ones that pass.
    ///
    /// A word that fails validation (or whose lookup failed) contributes
    /// zero; the rest of the move still scores.
    pub async fn score_move(words: &[ExtractedWord], validator: &WordValidator) -> MoveScore {
        let verdicts = join_all(words.iter().map(|w| validator.validate(&w.text))).await;
        MoveScore::from_verdicts(words, verdicts)
    }
}
