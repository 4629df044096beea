//! Classifier seam.
//!
//! The scoring collaborator sits behind the [`Classifier`] trait: it
//! accepts a fixed-shape `(batch, width)` matrix of codes and returns
//! one score in [0, 1] per row. Construction of a concrete classifier
//! (loading persisted parameters, validating dimensions) is the
//! implementation's concern; the pipeline only relies on this shape
//! contract.

pub mod rnn;

pub use rnn::{RnnClassifier, RnnWeights};

use thiserror::Error;
use valence_types::{BatchShapeError, Code, SequenceBatch};

/// Errors raised by a classifier implementation.
///
/// All of these surface directly to the caller of `predict`; nothing is
/// retried internally.
#[derive(Debug, Error)]
pub enum ClassifierError {
    /// Persisted parameters could not be read.
    #[error("classifier parameters unavailable at {path}")]
    Unavailable {
        /// Path that failed to open or read.
        path: String,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// Persisted parameters did not deserialize.
    #[error("malformed classifier parameters")]
    Malformed(#[from] serde_json::Error),
    /// Parameter dimensions are internally inconsistent.
    #[error("classifier parameter {field} has dimension {got}, expected {expected}")]
    BadWeights {
        /// Name of the offending parameter.
        field: &'static str,
        /// Dimension required by the other parameters.
        expected: usize,
        /// Dimension actually found.
        got: usize,
    },
    /// The input batch violated the shape contract.
    #[error(transparent)]
    Shape(#[from] BatchShapeError),
    /// A code exceeded the classifier's input range.
    #[error("code {code} in row {row} exceeds classifier input range (max {limit})")]
    CodeOutOfRange {
        /// Row containing the offending code.
        row: usize,
        /// The offending code.
        code: Code,
        /// Largest code this classifier accepts.
        limit: Code,
    },
    /// The collaborator produced the wrong number of scores.
    #[error("classifier returned {got} scores for {expected} rows")]
    BadOutput {
        /// Number of rows submitted.
        expected: usize,
        /// Number of scores returned.
        got: usize,
    },
}

/// A scoring collaborator.
///
/// Implementations must return exactly one score per batch row, each in
/// [0, 1], in row order. An all-padding row is valid input, not an
/// error.
pub trait Classifier {
    /// Scores every row of the batch.
    ///
    /// # Errors
    ///
    /// Returns a [`ClassifierError`] if the batch violates the
    /// implementation's input range or the implementation cannot score.
    fn score_batch(&self, batch: &SequenceBatch) -> Result<Vec<f32>, ClassifierError>;
}
