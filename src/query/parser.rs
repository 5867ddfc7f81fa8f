//! Query parser for converting raw query text into a [`Query`].
//!
//! Parsing rules:
//! - The text is split on spaces; empty text yields an empty query.
//! - A word starting with `-` is a minus word, with the prefix removed.
//! - A word that is exactly `-`, starts with `--`, or contains a control
//!   character fails with [`PilumError::InvalidQueryWord`].
//! - Stop words are silently dropped from both plus and minus words.
//!
//! # Examples
//!
//! ```
//! use pilum::analysis::stop_words::StopWordSet;
//! use pilum::query::parser::{ParseMode, QueryParser};
//!
//! let stop_words = StopWordSet::from_text("and with").unwrap();
//! let parser = QueryParser::new(&stop_words);
//!
//! let query = parser.parse("fluffy cat and -dog cat", ParseMode::Deduplicated).unwrap();
//! assert_eq!(query.plus_words, vec!["cat", "fluffy"]);
//! assert_eq!(query.minus_words, vec!["dog"]);
//!
//! assert!(parser.parse("cat --dog", ParseMode::Deduplicated).is_err());
//! ```

use crate::analysis::stop_words::StopWordSet;
use crate::analysis::tokenizer::{is_valid_word, split_into_words};
use crate::error::{PilumError, Result};
use crate::query::Query;

/// How repeated words are treated while parsing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ParseMode {
    /// Plus and minus words are sorted and deduplicated.
    #[default]
    Deduplicated,
    /// Words are kept in input order with repeats; the caller deduplicates.
    Raw,
}

/// A single classified query word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct QueryWord<'a> {
    data: &'a str,
    is_minus: bool,
    is_stop: bool,
}

/// Parser that classifies query words against a stop word set.
#[derive(Debug, Clone, Copy)]
pub struct QueryParser<'s> {
    stop_words: &'s StopWordSet,
}

impl<'s> QueryParser<'s> {
    /// Create a new query parser.
    pub fn new(stop_words: &'s StopWordSet) -> Self {
        QueryParser { stop_words }
    }

    /// Parse raw query text.
    pub fn parse<'q>(&self, text: &'q str, mode: ParseMode) -> Result<Query<'q>> {
        let mut query = Query::new();
        for word in split_into_words(text) {
            let query_word = self.parse_word(word)?;
            if query_word.is_stop {
                continue;
            }
            if query_word.is_minus {
                query.minus_words.push(query_word.data);
            } else {
                query.plus_words.push(query_word.data);
            }
        }

        if mode == ParseMode::Deduplicated {
            query.dedup();
        }
        Ok(query)
    }

    fn parse_word<'q>(&self, text: &'q str) -> Result<QueryWord<'q>> {
        if text.is_empty() {
            return Err(PilumError::invalid_query_word("Query word is empty"));
        }

        let (data, is_minus) = match text.strip_prefix('-') {
            Some(rest) => (rest, true),
            None => (text, false),
        };
        if data.is_empty() || data.starts_with('-') || !is_valid_word(data) {
            return Err(PilumError::invalid_query_word(format!(
                "Query word {text:?} is invalid"
            )));
        }

        Ok(QueryWord {
            data,
            is_minus,
            is_stop: self.stop_words.contains(data),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stop_words() -> StopWordSet {
        StopWordSet::from_text("in the").unwrap()
    }

    #[test]
    fn test_parse_plus_and_minus_words() {
        let stop_words = stop_words();
        let parser = QueryParser::new(&stop_words);
        let query = parser
            .parse("cat -city big", ParseMode::Deduplicated)
            .unwrap();
        assert_eq!(query.plus_words, vec!["big", "cat"]);
        assert_eq!(query.minus_words, vec!["city"]);
    }

    #[test]
    fn test_stop_words_dropped_from_both_sets() {
        let stop_words = stop_words();
        let parser = QueryParser::new(&stop_words);
        let query = parser.parse("cat in -the", ParseMode::Deduplicated).unwrap();
        assert_eq!(query.plus_words, vec!["cat"]);
        assert!(query.minus_words.is_empty());
    }

    #[test]
    fn test_empty_text() {
        let stop_words = stop_words();
        let parser = QueryParser::new(&stop_words);
        assert!(parser.parse("", ParseMode::Deduplicated).unwrap().is_empty());
        assert!(parser.parse("   ", ParseMode::Raw).unwrap().is_empty());
    }

    #[test]
    fn test_raw_mode_keeps_repeats() {
        let stop_words = stop_words();
        let parser = QueryParser::new(&stop_words);
        let query = parser.parse("tail cat tail -dog -dog", ParseMode::Raw).unwrap();
        assert_eq!(query.plus_words, vec!["tail", "cat", "tail"]);
        assert_eq!(query.minus_words, vec!["dog", "dog"]);
    }

    #[test]
    fn test_invalid_words() {
        let stop_words = stop_words();
        let parser = QueryParser::new(&stop_words);
        for text in ["-", "cat -", "--cat", "cat ---dog", "ca\u{3}t", "-do\u{1}g"] {
            assert!(
                matches!(
                    parser.parse(text, ParseMode::Deduplicated),
                    Err(PilumError::InvalidQueryWord(_))
                ),
                "expected {text:?} to be rejected"
            );
        }
    }

    #[test]
    fn test_hyphen_inside_word_is_allowed() {
        let stop_words = stop_words();
        let parser = QueryParser::new(&stop_words);
        let query = parser.parse("well-known -x-ray", ParseMode::Deduplicated).unwrap();
        assert_eq!(query.plus_words, vec!["well-known"]);
        assert_eq!(query.minus_words, vec!["x-ray"]);
    }
}
