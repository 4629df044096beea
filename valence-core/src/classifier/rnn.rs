//! Reference recurrent classifier.
//!
//! Forward-only inference for the trained sentiment network: an
//! embedding lookup, a single ReLU recurrent layer scanned across the
//! sequence, and a sigmoid output unit. Parameters live in a JSON
//! document so they can be exported from wherever training happened;
//! there is no training code here.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;
use valence_types::{Code, SequenceBatch};

use crate::classifier::{Classifier, ClassifierError};

/// Persisted network parameters.
///
/// Row-major nested vectors; shapes are validated when a classifier is
/// built, not when the document is parsed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RnnWeights {
    /// Embedding table, one row per input code: `(codes, embed)`.
    pub embedding: Vec<Vec<f32>>,
    /// Input-to-hidden kernel: `(hidden, embed)`.
    pub w_xh: Vec<Vec<f32>>,
    /// Hidden-to-hidden kernel: `(hidden, hidden)`.
    pub w_hh: Vec<Vec<f32>>,
    /// Hidden bias: `(hidden)`.
    pub b_h: Vec<f32>,
    /// Output kernel: `(hidden)`.
    pub w_out: Vec<f32>,
    /// Output bias.
    pub b_out: f32,
}

/// Embedding + SimpleRNN(ReLU) + Dense(sigmoid) scorer.
#[derive(Debug, Clone)]
pub struct RnnClassifier {
    weights: RnnWeights,
    embed_dim: usize,
    hidden_dim: usize,
}

impl RnnClassifier {
    /// Builds a classifier, validating every parameter dimension.
    ///
    /// # Errors
    ///
    /// Returns `ClassifierError::BadWeights` naming the first parameter
    /// whose dimension disagrees with the rest.
    pub fn from_weights(weights: RnnWeights) -> Result<Self, ClassifierError> {
        if weights.embedding.is_empty() {
            return Err(ClassifierError::BadWeights {
                field: "embedding",
                expected: 1,
                got: 0,
            });
        }
        let embed_dim = weights.embedding[0].len();
        for row in &weights.embedding {
            if row.len() != embed_dim {
                return Err(ClassifierError::BadWeights {
                    field: "embedding",
                    expected: embed_dim,
                    got: row.len(),
                });
            }
        }

        let hidden_dim = weights.w_xh.len();
        if hidden_dim == 0 {
            return Err(ClassifierError::BadWeights {
                field: "w_xh",
                expected: 1,
                got: 0,
            });
        }
        for row in &weights.w_xh {
            if row.len() != embed_dim {
                return Err(ClassifierError::BadWeights {
                    field: "w_xh",
                    expected: embed_dim,
                    got: row.len(),
                });
            }
        }

        if weights.w_hh.len() != hidden_dim {
            return Err(ClassifierError::BadWeights {
                field: "w_hh",
                expected: hidden_dim,
                got: weights.w_hh.len(),
            });
        }
        for row in &weights.w_hh {
            if row.len() != hidden_dim {
                return Err(ClassifierError::BadWeights {
                    field: "w_hh",
                    expected: hidden_dim,
                    got: row.len(),
                });
            }
        }

        if weights.b_h.len() != hidden_dim {
            return Err(ClassifierError::BadWeights {
                field: "b_h",
                expected: hidden_dim,
                got: weights.b_h.len(),
            });
        }
        if weights.w_out.len() != hidden_dim {
            return Err(ClassifierError::BadWeights {
                field: "w_out",
                expected: hidden_dim,
                got: weights.w_out.len(),
            });
        }

        debug!(
            codes = weights.embedding.len(),
            embed = embed_dim,
            hidden = hidden_dim,
            "rnn classifier ready"
        );

        Ok(Self {
            weights,
            embed_dim,
            hidden_dim,
        })
    }

    /// Loads a classifier from a JSON weights file.
    ///
    /// # Errors
    ///
    /// Returns `ClassifierError::Unavailable` if the file cannot be
    /// opened, `Malformed` if it does not parse, and the validation
    /// errors of [`RnnClassifier::from_weights`].
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ClassifierError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| ClassifierError::Unavailable {
            path: path.display().to_string(),
            source,
        })?;
        let weights: RnnWeights = serde_json::from_reader(BufReader::new(file))?;
        Self::from_weights(weights)
    }

    /// Largest code this classifier can embed.
    #[inline(always)]
    #[must_use]
    pub fn max_code(&self) -> Code {
        self.weights.embedding.len() as Code - 1
    }

    /// Embedding dimension.
    #[inline(always)]
    #[must_use]
    pub fn embed_dim(&self) -> usize {
        self.embed_dim
    }

    /// Hidden state dimension.
    #[inline(always)]
    #[must_use]
    pub fn hidden_dim(&self) -> usize {
        self.hidden_dim
    }

    fn score_row(&self, row_idx: usize, row: &[Code]) -> Result<f32, ClassifierError> {
        let w = &self.weights;
        let mut h = vec![0.0f32; self.hidden_dim];
        let mut next = vec![0.0f32; self.hidden_dim];

        for &code in row {
            let x = w
                .embedding
                .get(code as usize)
                .ok_or(ClassifierError::CodeOutOfRange {
                    row: row_idx,
                    code,
                    limit: self.max_code(),
                })?;

            for (i, out) in next.iter_mut().enumerate() {
                let pre = w.b_h[i] + dot(&w.w_xh[i], x) + dot(&w.w_hh[i], &h);
                *out = relu(pre);
            }
            std::mem::swap(&mut h, &mut next);
        }

        Ok(sigmoid(dot(&w.w_out, &h) + w.b_out))
    }
}

impl Classifier for RnnClassifier {
    fn score_batch(&self, batch: &SequenceBatch) -> Result<Vec<f32>, ClassifierError> {
        let mut scores = Vec::with_capacity(batch.len());
        for (i, row) in batch.rows().enumerate() {
            scores.push(self.score_row(i, row)?);
        }
        Ok(scores)
    }
}

#[inline(always)]
fn dot(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

#[inline(always)]
fn relu(x: f32) -> f32 {
    x.max(0.0)
}

#[inline(always)]
fn sigmoid(x: f32) -> f32 {
    1.0 / (1.0 + (-x).exp())
}
