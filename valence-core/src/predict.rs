//! Prediction facade.
//!
//! Composes encode, pad, classify, and threshold into a single
//! "text in, label out" call. Each prediction runs a fresh cycle; there
//! is no caching and no retry.

use std::sync::Arc;

use tracing::debug;
use valence_types::{Code, PipelineConfig, Prediction, SequenceBatch};

use crate::classifier::{Classifier, ClassifierError};
use crate::codec::{pad_to, Encoder};
use crate::vocab::Vocabulary;

/// Sentiment model: encoder, classifier, and decision rule in one place.
///
/// Generic over the classifier so tests and alternative backends can
/// slot in behind the same facade.
///
/// A score strictly above 0.5 is Positive; exactly 0.5 is Negative.
#[derive(Debug)]
pub struct SentimentModel<C> {
    encoder: Encoder,
    classifier: C,
    max_len: usize,
    seq_buf: Vec<Code>,
}

impl<C: Classifier> SentimentModel<C> {
    /// Creates a model from a shared vocabulary, a classifier, and the
    /// pipeline shape.
    pub fn new(vocab: Arc<Vocabulary>, classifier: C, config: PipelineConfig) -> Self {
        Self {
            encoder: Encoder::new(vocab),
            classifier,
            max_len: config.max_len,
            seq_buf: Vec::with_capacity(config.max_len),
        }
    }

    /// Predicts the sentiment of one review.
    ///
    /// # Errors
    ///
    /// Propagates the classifier's error unchanged, and returns
    /// `ClassifierError::BadOutput` if the collaborator does not produce
    /// exactly one score.
    pub fn predict(&mut self, text: &str) -> Result<Prediction, ClassifierError> {
        self.encoder.encode_into(text, &mut self.seq_buf);
        let row = pad_to(&self.seq_buf, self.max_len);
        let batch = SequenceBatch::single(row);

        let scores = self.classifier.score_batch(&batch)?;
        match scores.as_slice() {
            [score] => {
                let prediction = Prediction::from_score(*score);
                debug!(tokens = self.seq_buf.len(), score, "prediction");
                Ok(prediction)
            }
            _ => Err(ClassifierError::BadOutput {
                expected: 1,
                got: scores.len(),
            }),
        }
    }

    /// Predicts several reviews in one classifier call.
    ///
    /// # Errors
    ///
    /// Same error contract as [`SentimentModel::predict`], applied to
    /// the whole batch.
    pub fn predict_many(&mut self, texts: &[&str]) -> Result<Vec<Prediction>, ClassifierError> {
        let mut rows = Vec::with_capacity(texts.len());
        for text in texts {
            self.encoder.encode_into(text, &mut self.seq_buf);
            rows.push(pad_to(&self.seq_buf, self.max_len));
        }
        let batch = SequenceBatch::from_rows(rows, self.max_len)?;

        let scores = self.classifier.score_batch(&batch)?;
        if scores.len() != texts.len() {
            return Err(ClassifierError::BadOutput {
                expected: texts.len(),
                got: scores.len(),
            });
        }
        Ok(scores.into_iter().map(Prediction::from_score).collect())
    }

    /// Returns the classifier.
    #[inline(always)]
    pub fn classifier(&self) -> &C {
        &self.classifier
    }
}
