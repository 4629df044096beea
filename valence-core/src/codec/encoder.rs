//! Text-to-code encoder.
//!
//! Turns raw review text into the integer sequence the classifier was
//! trained on: lowercase, split on whitespace, look each token up in the
//! vocabulary, shift by the reserved-code offset. Unknown tokens encode
//! as `UNKNOWN + RANK_OFFSET`. No length bound is applied here; that is
//! the padding stage's job.

use std::sync::Arc;

use crate::analyzer::{for_each_token, TextNormalizer};
use crate::vocab::Vocabulary;
use valence_types::{Code, RANK_OFFSET, UNKNOWN};

/// Encoder from raw text to offset vocabulary codes.
///
/// Holds a shared read-only [`Vocabulary`] and a reusable normalization
/// buffer, so encoding a stream of texts allocates only for the output.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use valence_core::codec::Encoder;
/// use valence_core::vocab::Vocabulary;
///
/// let vocab = Vocabulary::from_ranked(
///     vec![("great".to_string(), 84), ("movie".to_string(), 17)],
///     10_000,
/// )
/// .unwrap();
/// let mut encoder = Encoder::new(Arc::new(vocab));
///
/// assert_eq!(encoder.encode("Great movie"), vec![87, 20]);
/// ```
#[derive(Debug)]
pub struct Encoder {
    vocab: Arc<Vocabulary>,
    normalizer: TextNormalizer,
    norm_buf: String,
}

impl Encoder {
    /// Creates an encoder over a shared vocabulary.
    pub fn new(vocab: Arc<Vocabulary>) -> Self {
        Self {
            vocab,
            normalizer: TextNormalizer::new(),
            norm_buf: String::with_capacity(256),
        }
    }

    /// Returns the shared vocabulary.
    #[inline(always)]
    #[must_use]
    pub fn vocab(&self) -> &Arc<Vocabulary> {
        &self.vocab
    }

    /// Encodes text into an existing buffer, one code per token.
    ///
    /// Clears the buffer before writing. Output order matches token
    /// order; empty text produces an empty buffer.
    pub fn encode_into(&mut self, text: &str, out: &mut Vec<Code>) {
        out.clear();

        let Self {
            vocab,
            normalizer,
            norm_buf,
        } = self;

        normalizer.normalize_into(text, norm_buf);
        for_each_token(norm_buf, |token| {
            let rank = vocab.rank(token).unwrap_or(UNKNOWN);
            out.push(rank + RANK_OFFSET);
        });
    }

    /// Encodes text into a fresh vector.
    #[must_use]
    pub fn encode(&mut self, text: &str) -> Vec<Code> {
        let mut out = Vec::new();
        self.encode_into(text, &mut out);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_vocab() -> Arc<Vocabulary> {
        let entries = vec![
            ("the".to_string(), 1),
            ("movie".to_string(), 17),
            ("great".to_string(), 84),
            ("was".to_string(), 9),
        ];
        Arc::new(Vocabulary::from_ranked(entries, 10_000).expect("should build vocab"))
    }

    #[test]
    fn known_words_offset_by_three() {
        let mut encoder = Encoder::new(test_vocab());
        assert_eq!(encoder.encode("great movie"), vec![87, 20]);
    }

    #[test]
    fn case_and_whitespace_normalized() {
        let mut encoder = Encoder::new(test_vocab());
        assert_eq!(encoder.encode("  GREAT   Movie "), vec![87, 20]);
    }

    #[test]
    fn unknown_words_encode_as_five() {
        let mut encoder = Encoder::new(test_vocab());
        assert_eq!(
            encoder.encode("zzyzx great zzyzx"),
            vec![UNKNOWN + RANK_OFFSET, 87, UNKNOWN + RANK_OFFSET]
        );
        assert_eq!(UNKNOWN + RANK_OFFSET, 5);
    }

    #[test]
    fn punctuation_defeats_lookup() {
        // "great!" is a different token than "great"; the vocabulary was
        // built without punctuation stripping, so the miss is intended.
        let mut encoder = Encoder::new(test_vocab());
        assert_eq!(encoder.encode("great!"), vec![5]);
    }

    #[test]
    fn empty_text_empty_sequence() {
        let mut encoder = Encoder::new(test_vocab());
        assert_eq!(encoder.encode(""), Vec::<Code>::new());
        assert_eq!(encoder.encode("   \t\n"), Vec::<Code>::new());
    }

    #[test]
    fn output_order_matches_token_order() {
        let mut encoder = Encoder::new(test_vocab());
        assert_eq!(encoder.encode("the movie was great"), vec![4, 20, 12, 87]);
    }

    #[test]
    fn encode_into_reuses_buffer() {
        let mut encoder = Encoder::new(test_vocab());
        let mut buf = Vec::with_capacity(16);

        encoder.encode_into("great movie", &mut buf);
        assert_eq!(buf, vec![87, 20]);

        encoder.encode_into("the", &mut buf);
        assert_eq!(buf, vec![4]);
    }

    #[test]
    fn no_length_bound_applied() {
        let mut encoder = Encoder::new(test_vocab());
        let text = "great ".repeat(1200);
        assert_eq!(encoder.encode(&text).len(), 1200);
    }
}
