//! Frequency-ranked word vocabulary.
//!
//! A bidirectional mapping between words and integer ranks, built once
//! from an external word-index document and read-only thereafter. Rank 1
//! is the most frequent word in the training corpus; only ranks up to a
//! configured cap are kept. The encoder shifts ranks by
//! [`RANK_OFFSET`](valence_types::RANK_OFFSET) so they never collide with
//! the reserved padding/start/unknown codes.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use rustc_hash::FxHashMap;
use thiserror::Error;
use tracing::debug;
use valence_types::Code;

/// Errors raised while constructing a [`Vocabulary`].
///
/// All of these are fatal to downstream components and surface
/// immediately at initialization; nothing retries.
#[derive(Debug, Error)]
pub enum VocabError {
    /// The backing word list could not be read.
    #[error("word list unavailable at {path}")]
    Unavailable {
        /// Path that failed to open or read.
        path: String,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// The word list is not a valid `{"word": rank}` document.
    #[error("malformed word list")]
    Malformed(#[from] serde_json::Error),
    /// The same word appeared twice in the source list.
    #[error("duplicate word in word list: {word:?}")]
    DuplicateWord {
        /// The repeated word.
        word: String,
    },
    /// Two words were assigned the same rank, breaking the bijection.
    #[error("rank {rank} assigned to both {first:?} and {second:?}")]
    DuplicateRank {
        /// The contested rank.
        rank: Code,
        /// Word already holding the rank.
        first: String,
        /// Word attempting to reuse it.
        second: String,
    },
}

/// Bidirectional word/rank mapping, immutable after construction.
///
/// The forward and reverse sides are exact structural inverses: every
/// kept word maps to a unique rank and back. Ranks are whatever the
/// source list assigns; no gap or density assumptions are made, so the
/// reverse side is a map rather than a dense array.
///
/// Share it via `Arc` between the encoder and decoder. No component
/// mutates it after construction, so concurrent readers are safe.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    forward: FxHashMap<Box<str>, Code>,
    reverse: FxHashMap<Code, Box<str>>,
    cap: usize,
}

impl Vocabulary {
    /// Builds a vocabulary from `(word, rank)` pairs.
    ///
    /// Entries with rank above `cap` are dropped. Duplicate words or
    /// ranks among the kept entries are rejected.
    ///
    /// # Errors
    ///
    /// Returns `VocabError::DuplicateWord` or `VocabError::DuplicateRank`
    /// when the source list is not a bijection.
    pub fn from_ranked<I>(entries: I, cap: usize) -> Result<Self, VocabError>
    where
        I: IntoIterator<Item = (String, Code)>,
    {
        let mut forward = FxHashMap::default();
        let mut reverse: FxHashMap<Code, Box<str>> = FxHashMap::default();

        for (word, rank) in entries {
            if rank as usize > cap {
                continue;
            }
            if let Some(first) = reverse.get(&rank) {
                return Err(VocabError::DuplicateRank {
                    rank,
                    first: first.to_string(),
                    second: word,
                });
            }
            let key: Box<str> = word.into_boxed_str();
            if forward.contains_key(&key) {
                return Err(VocabError::DuplicateWord {
                    word: key.into_string(),
                });
            }
            reverse.insert(rank, key.clone());
            forward.insert(key, rank);
        }

        debug!(words = forward.len(), cap, "vocabulary built");

        Ok(Self {
            forward,
            reverse,
            cap,
        })
    }

    /// Builds a vocabulary from a JSON word-index document.
    ///
    /// The expected shape is a single object mapping words to ranks:
    /// `{"the": 1, "and": 2, ...}`.
    ///
    /// # Errors
    ///
    /// Returns `VocabError::Malformed` if the document does not parse,
    /// plus the bijection errors of [`Vocabulary::from_ranked`].
    pub fn from_json_reader<R: Read>(reader: R, cap: usize) -> Result<Self, VocabError> {
        let entries: FxHashMap<String, Code> = serde_json::from_reader(reader)?;
        Self::from_ranked(entries, cap)
    }

    /// Loads a vocabulary from a JSON word-index file.
    ///
    /// # Errors
    ///
    /// Returns `VocabError::Unavailable` if the file cannot be opened,
    /// plus the errors of [`Vocabulary::from_json_reader`].
    pub fn load<P: AsRef<Path>>(path: P, cap: usize) -> Result<Self, VocabError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| VocabError::Unavailable {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_reader(BufReader::new(file), cap)
    }

    /// Looks up the rank of a word.
    #[inline(always)]
    #[must_use]
    pub fn rank(&self, word: &str) -> Option<Code> {
        self.forward.get(word).copied()
    }

    /// Looks up the word holding a rank.
    #[inline(always)]
    #[must_use]
    pub fn word(&self, rank: Code) -> Option<&str> {
        self.reverse.get(&rank).map(Box::as_ref)
    }

    /// Returns the number of words kept.
    #[inline(always)]
    #[must_use]
    pub fn len(&self) -> usize {
        self.forward.len()
    }

    /// Returns `true` if no words were kept.
    #[inline(always)]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }

    /// Returns the rank cap this vocabulary was built with.
    #[inline(always)]
    #[must_use]
    pub fn cap(&self) -> usize {
        self.cap
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ranked(pairs: &[(&str, Code)]) -> Vec<(String, Code)> {
        pairs.iter().map(|(w, r)| (w.to_string(), *r)).collect()
    }

    #[test]
    fn forward_and_reverse_agree() {
        let vocab =
            Vocabulary::from_ranked(ranked(&[("the", 1), ("movie", 17), ("great", 84)]), 10_000)
                .expect("should build vocab");

        assert_eq!(vocab.len(), 3);
        assert_eq!(vocab.rank("movie"), Some(17));
        assert_eq!(vocab.word(17), Some("movie"));
        assert_eq!(vocab.rank("great"), Some(84));
        assert_eq!(vocab.word(84), Some("great"));
        assert_eq!(vocab.rank("absent"), None);
        assert_eq!(vocab.word(2), None);
    }

    #[test]
    fn cap_drops_rare_words() {
        let vocab = Vocabulary::from_ranked(
            ranked(&[("common", 5), ("rare", 10_001), ("edge", 10_000)]),
            10_000,
        )
        .expect("should build vocab");

        assert_eq!(vocab.len(), 2);
        assert_eq!(vocab.rank("common"), Some(5));
        assert_eq!(vocab.rank("edge"), Some(10_000));
        assert_eq!(vocab.rank("rare"), None);
        assert_eq!(vocab.word(10_001), None);
    }

    #[test]
    fn duplicate_rank_rejected() {
        let err = Vocabulary::from_ranked(ranked(&[("one", 7), ("other", 7)]), 100)
            .expect_err("shared rank must fail");
        assert!(matches!(err, VocabError::DuplicateRank { rank: 7, .. }));
    }

    #[test]
    fn duplicate_word_rejected() {
        let err = Vocabulary::from_ranked(ranked(&[("same", 1), ("same", 2)]), 100)
            .expect_err("repeated word must fail");
        assert!(matches!(err, VocabError::DuplicateWord { .. }));
    }

    #[test]
    fn duplicates_outside_cap_are_ignored() {
        // The colliding entry is dropped by the cap before it can clash.
        let vocab = Vocabulary::from_ranked(ranked(&[("kept", 3), ("kept", 200)]), 100)
            .expect("should build vocab");
        assert_eq!(vocab.rank("kept"), Some(3));
    }

    #[test]
    fn loads_word_index_json() {
        let doc = br#"{"the": 1, "and": 2, "movie": 17, "obscure": 9999999}"#;
        let vocab = Vocabulary::from_json_reader(&doc[..], 10_000).expect("should parse");

        assert_eq!(vocab.len(), 3);
        assert_eq!(vocab.rank("the"), Some(1));
        assert_eq!(vocab.rank("obscure"), None);
        assert_eq!(vocab.cap(), 10_000);
    }

    #[test]
    fn malformed_json_rejected() {
        let doc = br#"["not", "an", "object"]"#;
        let err = Vocabulary::from_json_reader(&doc[..], 10_000)
            .expect_err("array document must fail");
        assert!(matches!(err, VocabError::Malformed(_)));
    }

    #[test]
    fn missing_file_is_unavailable() {
        let err = Vocabulary::load("/nonexistent/word_index.json", 10_000)
            .expect_err("missing file must fail");
        assert!(matches!(err, VocabError::Unavailable { .. }));
    }

    #[test]
    fn empty_list_builds_empty_vocab() {
        let vocab = Vocabulary::from_ranked(Vec::new(), 10_000).expect("should build vocab");
        assert!(vocab.is_empty());
        assert_eq!(vocab.rank("anything"), None);
    }
}
