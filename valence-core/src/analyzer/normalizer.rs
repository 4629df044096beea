use std::str;

#[inline(always)]
const fn is_ascii_ws(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r' | 0x0B | 0x0C)
}

/// Text normalizer for the encoding pipeline.
///
/// Performs the following operations:
/// - Converts all characters to lowercase (Unicode-aware)
/// - Collapses consecutive whitespace into single spaces
/// - Removes leading and trailing whitespace
///
/// Punctuation is left untouched. That is a deliberate policy: the
/// classifier's vocabulary was built over tokens produced exactly this
/// way, so "great!" must stay a distinct token from "great".
///
/// # Examples
///
/// ```
/// use valence_core::analyzer::TextNormalizer;
///
/// let normalizer = TextNormalizer::new();
/// assert_eq!(normalizer.normalize("  HELLO  WORLD  "), "hello world");
/// assert_eq!(normalizer.normalize("Great!"), "great!");
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct TextNormalizer;

impl TextNormalizer {
    /// Creates a new normalizer.
    pub const fn new() -> Self {
        Self
    }

    /// Normalizes text into an existing String buffer.
    ///
    /// Reuses the buffer's capacity if sufficient, growing only when
    /// necessary. Clears the buffer before writing.
    #[inline]
    pub fn normalize_into(&self, input: &str, out: &mut String) {
        out.clear();
        out.reserve(input.len());

        let bytes = input.as_bytes();
        let mut i = 0usize;
        let mut pending_space = false;

        while i < bytes.len() {
            let b = bytes[i];

            if b < 128 {
                if is_ascii_ws(b) {
                    pending_space = !out.is_empty();
                } else {
                    if pending_space {
                        out.push(' ');
                        pending_space = false;
                    }
                    out.push(b.to_ascii_lowercase() as char);
                }
                i += 1;
                continue;
            }

            // Multi-byte scalar: decode one char and lowercase via the
            // full Unicode mapping (may expand to several chars).
            let ch = str_at(bytes, i);
            i += ch.len_utf8();

            if ch.is_whitespace() {
                pending_space = !out.is_empty();
                continue;
            }

            if pending_space {
                out.push(' ');
                pending_space = false;
            }
            for lowered in ch.to_lowercase() {
                out.push(lowered);
            }
        }
    }

    /// Normalizes text and returns a new String.
    #[inline]
    pub fn normalize(&self, input: &str) -> String {
        let mut out = String::with_capacity(input.len());
        self.normalize_into(input, &mut out);
        out
    }
}

/// Decodes the char starting at byte offset `i`.
///
/// `i` must sit on a char boundary of valid UTF-8, which holds for every
/// offset reached by the scan above.
#[inline(always)]
fn str_at(bytes: &[u8], i: usize) -> char {
    // SAFETY: `bytes` comes from a `&str` and `i` is a char boundary,
    // so the remainder is valid UTF-8 and contains at least one char.
    unsafe {
        str::from_utf8_unchecked(&bytes[i..])
            .chars()
            .next()
            .unwrap_unchecked()
    }
}
