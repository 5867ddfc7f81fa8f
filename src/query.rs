//! Parsed queries.
//!
//! A raw query is a space-separated list of words. Words prefixed with `-`
//! are minus words: a document containing any of them is excluded. All other
//! words are plus words and contribute to relevance. See [`parser`] for the
//! parsing rules.

pub mod parser;

/// A parsed query.
///
/// Words borrow from the raw query text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query<'a> {
    /// Words that contribute to relevance.
    pub plus_words: Vec<&'a str>,
    /// Words whose presence excludes a document.
    pub minus_words: Vec<&'a str>,
}

impl<'a> Query<'a> {
    /// Create an empty query.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the query has neither plus nor minus words.
    pub fn is_empty(&self) -> bool {
        self.plus_words.is_empty() && self.minus_words.is_empty()
    }

    /// Sort both word lists and drop repeated words.
    pub fn dedup(&mut self) {
        self.plus_words.sort_unstable();
        self.plus_words.dedup();
        self.minus_words.sort_unstable();
        self.minus_words.dedup();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dedup_sorts_and_removes_repeats() {
        let mut query = Query {
            plus_words: vec!["tail", "cat", "tail"],
            minus_words: vec!["dog", "dog"],
        };
        query.dedup();
        assert_eq!(query.plus_words, vec!["cat", "tail"]);
        assert_eq!(query.minus_words, vec!["dog"]);
    }

    #[test]
    fn test_empty_query() {
        assert!(Query::new().is_empty());
    }
}
