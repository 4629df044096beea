//! Valence: text-to-index encoding pipeline for binary sentiment
//! classification.
//!
//! The pipeline turns raw review text into the fixed-shape integer input
//! a trained classifier expects, and composes the whole flow behind one
//! call:
//!
//! ```text
//! raw text -> Encoder -> padding -> Classifier -> Prediction
//! ```
//!
//! - [`vocab::Vocabulary`]: frequency-ranked word/rank bijection,
//!   built once and shared read-only
//! - [`codec::Encoder`] / [`codec::Decoder`]: text to offset codes and
//!   back
//! - [`codec::pad_to`]: fixed-length normalization (left-pad with
//!   zeros, keep the tail on overflow)
//! - [`classifier::Classifier`]: the scoring collaborator seam, with a
//!   reference recurrent implementation in [`classifier::RnnClassifier`]
//! - [`predict::SentimentModel`]: the "text in, label out" facade
//!
//! The code protocol (reserved values 0/1/2, ranks shifted by 3) lives
//! in `valence-types` and is a hard compatibility contract with the
//! trained classifier: changing any part of it produces encodings the
//! network was never conditioned on.

pub mod analyzer;
pub mod classifier;
pub mod codec;
pub mod predict;
pub mod vocab;

pub use classifier::{Classifier, ClassifierError, RnnClassifier, RnnWeights};
pub use codec::{pad_to, Decoder, Encoder};
pub use predict::SentimentModel;
pub use vocab::{VocabError, Vocabulary};
