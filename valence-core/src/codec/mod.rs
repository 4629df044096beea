//! Encoding, padding, and decoding between text and code sequences.
//!
//! - **Encoder**: raw text to offset vocabulary codes
//! - **Padding**: fixed-length normalization (left-pad, keep-the-tail)
//! - **Decoder**: codes back to approximate text, for inspection

pub mod decoder;
pub mod encoder;
pub mod pad;

pub use decoder::Decoder;
pub use encoder::Encoder;
pub use pad::{pad_into, pad_to};
