//! Text analysis for the search engine.
//!
//! This module turns raw document and query text into validated tokens:
//!
//! - [`tokenizer`] - Splits text into words and checks word validity
//! - [`stop_words`] - The immutable set of words excluded from indexing and querying
//! - [`word_store`] - Append-only interner holding the canonical text of every indexed word

pub mod stop_words;
pub mod tokenizer;
pub mod word_store;
