//! Streaming word splitter.
//!
//! Splits normalized text into word tokens for vocabulary lookup. Tokens
//! are slices of the input, emitted through a callback in input order,
//! so tokenization never allocates.
//!
//! The input is expected to come out of [`TextNormalizer`]: lowercase,
//! single ASCII spaces between words, no leading or trailing whitespace.
//! Stray empty segments are skipped rather than emitted, so the splitter
//! stays correct even on input that violates that contract.
//!
//! [`TextNormalizer`]: crate::analyzer::TextNormalizer

use core::str;
use memchr::memchr_iter;

/// Calls `emit` once per word token in `normalized`, left to right.
///
/// Words are maximal runs of non-space bytes. Empty input emits nothing.
///
/// # Example
///
/// ```
/// use valence_core::analyzer::for_each_token;
///
/// let mut tokens = Vec::new();
/// for_each_token("hello world", |t| tokens.push(t));
/// assert_eq!(tokens, ["hello", "world"]);
/// ```
#[inline(always)]
pub fn for_each_token<'n, F>(normalized: &'n str, mut emit: F)
where
    F: FnMut(&'n str),
{
    let bytes = normalized.as_bytes();
    let mut start = 0usize;

    for i in memchr_iter(b' ', bytes) {
        if start < i {
            // SAFETY: `normalized` is valid UTF-8. We split only on ASCII
            // space (0x20), which is never a continuation byte, so
            // `bytes[start..i]` is always a valid UTF-8 subslice.
            let token = unsafe { str::from_utf8_unchecked(&bytes[start..i]) };
            emit(token);
        }
        start = i + 1;
    }

    if start < bytes.len() {
        // SAFETY: same invariants as above. `start` was set to `i + 1`
        // after an ASCII space byte, so the tail is a valid UTF-8 subslice.
        let token = unsafe { str::from_utf8_unchecked(&bytes[start..]) };
        emit(token);
    }
}

/// Counts word tokens without emitting them.
#[inline(always)]
pub fn count_tokens(normalized: &str) -> usize {
    let mut n = 0usize;
    for_each_token(normalized, |_| n += 1);
    n
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(input: &str) -> Vec<&str> {
        let mut out = Vec::new();
        for_each_token(input, |t| out.push(t));
        out
    }

    #[test]
    fn single_word() {
        assert_eq!(collect("hello"), ["hello"]);
    }

    #[test]
    fn two_words() {
        assert_eq!(collect("hello world"), ["hello", "world"]);
    }

    #[test]
    fn empty_emits_nothing() {
        assert!(collect("").is_empty());
    }

    #[test]
    fn single_char_token() {
        assert_eq!(collect("a"), ["a"]);
    }

    #[test]
    fn punctuation_stays_attached() {
        assert_eq!(collect("great! movie."), ["great!", "movie."]);
    }

    #[test]
    fn stray_spaces_skipped() {
        assert_eq!(collect(" hello  world "), ["hello", "world"]);
    }

    #[test]
    fn emit_order_is_left_to_right() {
        let words = ["one", "two", "three", "four"];
        let input = words.join(" ");
        let mut i = 0usize;

        for_each_token(&input, |t| {
            assert_eq!(t, words[i]);
            i += 1;
        });

        assert_eq!(i, words.len());
    }

    #[test]
    fn tokens_are_slices_of_input() {
        let input = String::from("hello world");
        let base = input.as_ptr() as usize;
        let end = base + input.len();

        for_each_token(&input, |t| {
            let ptr = t.as_ptr() as usize;
            assert!(ptr >= base && ptr < end);
        });
    }

    #[test]
    fn non_ascii_tokens_preserved() {
        assert_eq!(collect("café こんにちは"), ["café", "こんにちは"]);
    }

    #[test]
    fn count_matches_emitted() {
        assert_eq!(count_tokens("the quick brown fox"), 4);
        assert_eq!(count_tokens(""), 0);
        assert_eq!(count_tokens("one"), 1);
    }
}
