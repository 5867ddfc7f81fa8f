//! Stop word set.
//!
//! Stop words are excluded from both indexing and querying. The set is fixed
//! when the engine is constructed and never changes afterwards.
//!
//! # Examples
//!
//! ```
//! use pilum::analysis::stop_words::StopWordSet;
//!
//! let stop_words = StopWordSet::from_text("and  with in").unwrap();
//! assert_eq!(stop_words.len(), 3);
//! assert!(stop_words.contains("and"));
//! assert!(!stop_words.contains("cat"));
//!
//! assert!(StopWordSet::new(["in", "th\u{2}e"]).is_err());
//! ```

use ahash::AHashSet;

use crate::analysis::tokenizer::{is_valid_word, split_into_words};
use crate::error::{PilumError, Result};

/// Immutable set of words excluded from indexing and querying.
#[derive(Clone, Debug, Default)]
pub struct StopWordSet {
    words: AHashSet<String>,
}

impl StopWordSet {
    /// Create a stop word set from a collection of words.
    ///
    /// Empty strings are dropped and duplicates collapse. Fails with
    /// [`PilumError::InvalidToken`] if any word contains a control character.
    pub fn new<I, S>(words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = AHashSet::new();
        for word in words {
            let word = word.as_ref();
            if word.is_empty() {
                continue;
            }
            if !is_valid_word(word) {
                return Err(PilumError::invalid_token(format!(
                    "stop word {word:?} contains a control character"
                )));
            }
            set.insert(word.to_string());
        }
        Ok(StopWordSet { words: set })
    }

    /// Create a stop word set from space-separated text.
    pub fn from_text(text: &str) -> Result<Self> {
        Self::new(split_into_words(text))
    }

    /// Check if a word is a stop word.
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    /// Number of distinct stop words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Whether the set has no words.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Iterate over the stop words in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dedup_and_empty_words() {
        let set = StopWordSet::new(vec!["in", "", "the", "in"]).unwrap();
        assert_eq!(set.len(), 2);
        assert!(set.contains("in"));
        assert!(set.contains("the"));
        assert!(!set.contains(""));
    }

    #[test]
    fn test_invalid_stop_word() {
        let result = StopWordSet::new(vec!["in", "the\u{1}"]);
        assert!(matches!(result, Err(PilumError::InvalidToken(_))));
    }

    #[test]
    fn test_case_sensitive() {
        let set = StopWordSet::from_text("The").unwrap();
        assert!(set.contains("The"));
        assert!(!set.contains("the"));
    }

    #[test]
    fn test_empty_set() {
        let set = StopWordSet::default();
        assert!(set.is_empty());
        assert_eq!(set.iter().count(), 0);
    }
}
