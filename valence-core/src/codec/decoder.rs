//! Code-to-text decoder.
//!
//! Reverses an encoded sequence back into approximate human-readable
//! text for inspection and debugging. Codes are shifted back down by the
//! rank offset and resolved through the reverse vocabulary; anything
//! that misses (reserved codes included) renders as `?`. The classifier
//! never consumes this output.

use std::sync::Arc;

use crate::vocab::Vocabulary;
use valence_types::{Code, RANK_OFFSET};

/// Placeholder rendered for codes with no vocabulary word.
const MISSING: &str = "?";

/// Decoder from offset codes back to words.
#[derive(Debug, Clone)]
pub struct Decoder {
    vocab: Arc<Vocabulary>,
}

impl Decoder {
    /// Creates a decoder over a shared vocabulary.
    pub fn new(vocab: Arc<Vocabulary>) -> Self {
        Self { vocab }
    }

    /// Decodes a sequence into space-joined words.
    ///
    /// Reserved codes (below the rank offset) and ranks absent from the
    /// vocabulary both render as `?`.
    #[must_use]
    pub fn decode(&self, seq: &[Code]) -> String {
        let mut out = String::with_capacity(seq.len() * 5);

        for (i, &code) in seq.iter().enumerate() {
            if i > 0 {
                out.push(' ');
            }
            let word = code
                .checked_sub(RANK_OFFSET)
                .and_then(|rank| self.vocab.word(rank));
            out.push_str(word.unwrap_or(MISSING));
        }

        out
    }
}
