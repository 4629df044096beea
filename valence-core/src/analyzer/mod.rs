//! Text analysis pipeline.
//!
//! This module provides the text processing components:
//! - **Normalizer**: lowercases raw text and collapses whitespace
//! - **Tokenizer**: splits normalized text into word tokens

pub mod normalizer;
pub mod tokenizer;

pub use normalizer::TextNormalizer;
pub use tokenizer::{count_tokens, for_each_token};
