//! Sentiment Prediction Tool
//!
//! Scores one review against a trained recurrent sentiment model. The
//! tool loads the ranked word-index document and the exported network
//! parameters, runs the review through the full
//! encode / pad / classify pipeline, and prints the label with its raw
//! score.
//!
//! ## Usage
//!
//! ```bash
//! ./target/release/predict word_index.json weights.json "This movie was fantastic!"
//! ```
//!
//! ## Example Output
//!
//! ```text
//! Review    : This movie was fantastic!
//! Sentiment : Positive
//! Score     : 0.8731
//! ```
//!
//! Set `RUST_LOG=debug` to see pipeline internals (vocabulary size,
//! classifier dimensions, token counts).

use std::env;
use std::error::Error;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use valence_core::{RnnClassifier, SentimentModel, Vocabulary};
use valence_types::PipelineConfig;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 4 {
        eprintln!("Usage: predict <word_index.json> <weights.json> <review text...>");
        std::process::exit(1);
    }

    let review = args[3..].join(" ");

    if let Err(e) = run(&args[1], &args[2], &review) {
        eprintln!("error: {e}");
        let mut source = e.source();
        while let Some(cause) = source {
            eprintln!("  caused by: {cause}");
            source = cause.source();
        }
        std::process::exit(1);
    }
}

fn run(vocab_path: &str, weights_path: &str, review: &str) -> Result<(), Box<dyn Error>> {
    let config = PipelineConfig::default();

    let vocab = Arc::new(Vocabulary::load(vocab_path, config.vocab_cap)?);
    let classifier = RnnClassifier::load(weights_path)?;
    let mut model = SentimentModel::new(vocab, classifier, config);

    let prediction = model.predict(review)?;

    println!("Review    : {review}");
    println!("Sentiment : {}", prediction.sentiment);
    println!("Score     : {:.4}", prediction.score);

    Ok(())
}
