//! Core types for the Valence sentiment pipeline.
//!
//! This crate provides the fundamental types that are shared across
//! the Valence ecosystem. Keeping types separate ensures:
//!
//! - **Stable wire contract**: the reserved-code protocol lives in one place
//! - **Cross-crate compatibility**: core and CLI share the same types
//! - **Clean boundaries**: no circular dependencies between crates

#![warn(missing_docs)]

use core::fmt;

/// One encoded word.
///
/// Codes are 32-bit unsigned integers. Real vocabulary ranks occupy
/// `RANK_OFFSET..` after offsetting; the values below `RANK_OFFSET`
/// carry reserved meanings.
pub type Code = u32;

/// Padding filler for sequences shorter than the model width.
pub const PAD: Code = 0;

/// Start-of-sequence marker.
///
/// Part of the code protocol the classifier was conditioned on. The
/// encoder never emits it for inference input, but the value is reserved
/// so real ranks can never collide with it.
pub const START: Code = 1;

/// Marker for words absent from the vocabulary.
pub const UNKNOWN: Code = 2;

/// Offset added to every vocabulary rank (and to `UNKNOWN`) at encode
/// time, so that ranks `1..=V` occupy codes `RANK_OFFSET..=V + 2` and
/// never collide with the reserved values.
pub const RANK_OFFSET: Code = 3;

/// Binary sentiment label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sentiment {
    /// Score strictly above the decision threshold.
    Positive,
    /// Score at or below the decision threshold.
    Negative,
}

impl Sentiment {
    /// Decision threshold for a classifier score.
    pub const THRESHOLD: f32 = 0.5;

    /// Maps a classifier score in [0, 1] to a label.
    ///
    /// The inequality is strict: a score of exactly 0.5 is `Negative`.
    #[inline(always)]
    #[must_use]
    pub fn from_score(score: f32) -> Self {
        if score > Self::THRESHOLD {
            Sentiment::Positive
        } else {
            Sentiment::Negative
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sentiment::Positive => write!(f, "Positive"),
            Sentiment::Negative => write!(f, "Negative"),
        }
    }
}

/// Result of one prediction: the label plus the raw score that produced it.
///
/// Created per inference call, never persisted.
#[derive(Debug, Clone, Copy)]
pub struct Prediction {
    /// Thresholded label.
    pub sentiment: Sentiment,
    /// Raw classifier score in [0, 1].
    pub score: f32,
}

impl Prediction {
    /// Creates a prediction by thresholding a raw score.
    #[inline(always)]
    #[must_use]
    pub fn from_score(score: f32) -> Self {
        Self {
            sentiment: Sentiment::from_score(score),
            score,
        }
    }
}

impl PartialEq for Prediction {
    fn eq(&self, other: &Self) -> bool {
        // Two predictions are equal if both label AND score are equal
        self.sentiment == other.sentiment && self.score == other.score
    }
}

impl fmt::Display for Prediction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:.4})", self.sentiment, self.score)
    }
}

/// Pipeline shape configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Vocabulary cap V: only ranks `1..=V` are kept at construction.
    pub vocab_cap: usize,
    /// Model input width L: every sequence is padded or truncated to
    /// exactly this many codes.
    pub max_len: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            vocab_cap: 10_000,
            max_len: 500,
        }
    }
}

impl PipelineConfig {
    /// Creates a configuration with explicit shape parameters.
    pub const fn new(vocab_cap: usize, max_len: usize) -> Self {
        Self { vocab_cap, max_len }
    }

    /// Largest code a classifier conditioned on this shape can see:
    /// the top rank V shifted past the reserved values.
    pub const fn max_code(&self) -> Code {
        self.vocab_cap as Code + UNKNOWN
    }
}

/// Errors that can occur when assembling a batch of sequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchShapeError {
    /// A row does not match the declared batch width.
    RowLength {
        /// Index of the offending row.
        row: usize,
        /// The declared batch width.
        expected: usize,
        /// The actual row length.
        got: usize,
    },
}

impl fmt::Display for BatchShapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BatchShapeError::RowLength { row, expected, got } => {
                write!(
                    f,
                    "row {} has length {} (batch width: {})",
                    row, got, expected
                )
            }
        }
    }
}

impl core::error::Error for BatchShapeError {}

/// A fixed-shape `(rows, width)` matrix of codes.
///
/// Rows are stored back to back in a single contiguous buffer, so the
/// batch hands a classifier one cache-friendly allocation rather than a
/// vector of vectors. Construction validates that every row matches the
/// declared width; once built, the shape cannot be violated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceBatch {
    data: Vec<Code>,
    width: usize,
}

impl SequenceBatch {
    /// Builds a batch from rows, validating each against `width`.
    ///
    /// # Errors
    ///
    /// Returns `BatchShapeError::RowLength` for the first row whose
    /// length differs from `width`.
    pub fn from_rows(rows: Vec<Vec<Code>>, width: usize) -> Result<Self, BatchShapeError> {
        let mut data = Vec::with_capacity(rows.len() * width);
        for (i, row) in rows.iter().enumerate() {
            if row.len() != width {
                return Err(BatchShapeError::RowLength {
                    row: i,
                    expected: width,
                    got: row.len(),
                });
            }
            data.extend_from_slice(row);
        }
        Ok(Self { data, width })
    }

    /// Builds a single-row batch. The width is the row's own length,
    /// so this cannot fail.
    #[must_use]
    pub fn single(row: Vec<Code>) -> Self {
        let width = row.len();
        Self { data: row, width }
    }

    /// Returns the number of rows.
    #[inline(always)]
    #[must_use]
    pub fn len(&self) -> usize {
        if self.width == 0 {
            0
        } else {
            self.data.len() / self.width
        }
    }

    /// Returns `true` if the batch has no rows.
    #[inline(always)]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the batch width (codes per row).
    #[inline(always)]
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns row `i`, or `None` if out of bounds.
    #[inline(always)]
    #[must_use]
    pub fn row(&self, i: usize) -> Option<&[Code]> {
        let start = i.checked_mul(self.width)?;
        let end = start.checked_add(self.width)?;
        self.data.get(start..end)
    }

    /// Iterates over rows in order.
    pub fn rows(&self) -> impl Iterator<Item = &[Code]> {
        self.data.chunks_exact(self.width.max(1))
    }

    /// Returns the flat backing storage, row-major.
    #[inline(always)]
    #[must_use]
    pub fn as_flat(&self) -> &[Code] {
        &self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_is_strict() {
        assert_eq!(Sentiment::from_score(0.5), Sentiment::Negative);
        assert_eq!(Sentiment::from_score(0.500001), Sentiment::Positive);
        assert_eq!(Sentiment::from_score(0.0), Sentiment::Negative);
        assert_eq!(Sentiment::from_score(1.0), Sentiment::Positive);
    }

    #[test]
    fn prediction_keeps_raw_score() {
        let p = Prediction::from_score(0.73);
        assert_eq!(p.sentiment, Sentiment::Positive);
        assert_eq!(p.score, 0.73);
    }

    #[test]
    fn prediction_display() {
        let p = Prediction::from_score(0.25);
        assert_eq!(format!("{p}"), "Negative (0.2500)");
    }

    #[test]
    fn reserved_codes_below_offset() {
        assert!(PAD < RANK_OFFSET);
        assert!(START < RANK_OFFSET);
        assert!(UNKNOWN < RANK_OFFSET);
    }

    #[test]
    fn default_config_matches_trained_shape() {
        let config = PipelineConfig::default();
        assert_eq!(config.vocab_cap, 10_000);
        assert_eq!(config.max_len, 500);
        assert_eq!(config.max_code(), 10_002);
    }

    #[test]
    fn batch_from_rows() {
        let batch = SequenceBatch::from_rows(vec![vec![1, 2, 3], vec![4, 5, 6]], 3)
            .expect("should build batch");
        assert_eq!(batch.len(), 2);
        assert_eq!(batch.width(), 3);
        assert_eq!(batch.row(0), Some(&[1, 2, 3][..]));
        assert_eq!(batch.row(1), Some(&[4, 5, 6][..]));
        assert_eq!(batch.row(2), None);
        assert_eq!(batch.as_flat(), &[1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn batch_rejects_ragged_rows() {
        let err = SequenceBatch::from_rows(vec![vec![1, 2, 3], vec![4, 5]], 3)
            .expect_err("ragged batch must fail");
        assert_eq!(
            err,
            BatchShapeError::RowLength {
                row: 1,
                expected: 3,
                got: 2
            }
        );
    }

    #[test]
    fn batch_empty() {
        let batch = SequenceBatch::from_rows(Vec::new(), 500).expect("should build batch");
        assert!(batch.is_empty());
        assert_eq!(batch.len(), 0);
    }

    #[test]
    fn batch_single_row() {
        let batch = SequenceBatch::single(vec![7, 8, 9, 10]);
        assert_eq!(batch.len(), 1);
        assert_eq!(batch.width(), 4);
        assert_eq!(batch.row(0), Some(&[7, 8, 9, 10][..]));
    }

    #[test]
    fn batch_rows_iterate_in_order() {
        let batch = SequenceBatch::from_rows(vec![vec![1, 2], vec![3, 4], vec![5, 6]], 2)
            .expect("should build batch");
        let rows: Vec<&[Code]> = batch.rows().collect();
        assert_eq!(rows, vec![&[1, 2][..], &[3, 4][..], &[5, 6][..]]);
    }

    #[test]
    fn shape_error_display() {
        let err = BatchShapeError::RowLength {
            row: 3,
            expected: 500,
            got: 7,
        };
        assert_eq!(format!("{err}"), "row 3 has length 7 (batch width: 500)");
    }
}
