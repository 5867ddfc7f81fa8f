//! Word splitting and validation.
//!
//! Text is split on the space character; runs of spaces never produce empty
//! words. A word is valid when it contains no control character (any code
//! point below the space character). Words are case and form sensitive: no
//! normalization is applied.
//!
//! # Examples
//!
//! ```
//! use pilum::analysis::tokenizer::{is_valid_word, split_into_words};
//!
//! let words: Vec<_> = split_into_words("  white cat  and hat ").collect();
//! assert_eq!(words, vec!["white", "cat", "and", "hat"]);
//!
//! assert!(is_valid_word("cat"));
//! assert!(!is_valid_word("c\u{12}at"));
//! ```

/// Split `text` into non-empty words separated by spaces.
///
/// The returned slices borrow from `text`.
pub fn split_into_words(text: &str) -> impl Iterator<Item = &str> {
    text.split(' ').filter(|word| !word.is_empty())
}

/// Check whether a word is free of control characters.
pub fn is_valid_word(word: &str) -> bool {
    !word.chars().any(is_control_char)
}

#[inline]
fn is_control_char(c: char) -> bool {
    c < ' '
}
