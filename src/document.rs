//! Document identifiers, status tags, and ranked result rows.
//!
//! A document is identified by a non-negative [`DocId`] and carries a
//! [`DocumentStatus`] tag and an integer [`Rating`]. Search results are
//! returned as [`Document`] rows holding the id, the computed relevance, and
//! the stored rating.
//!
//! # Examples
//!
//! ```
//! use pilum::document::{Document, average_rating};
//!
//! assert_eq!(average_rating(&[2, 3, 4, -1]), 2);
//! assert_eq!(average_rating(&[]), 0);
//!
//! let doc = Document::new(1, 0.5, 4);
//! assert_eq!(doc.to_string(), "{ document_id = 1, relevance = 0.5, rating = 4 }");
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// Document identifier. Negative values are rejected on insertion.
pub type DocId = i64;

/// Average of the caller-supplied ratings of a document.
pub type Rating = i32;

/// Status tag attached to every document.
///
/// The engine never changes a status on its own; it is only used for
/// filtering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentStatus {
    #[default]
    Active,
    Irrelevant,
    Banned,
    Removed,
}

impl fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DocumentStatus::Active => "ACTIVE",
            DocumentStatus::Irrelevant => "IRRELEVANT",
            DocumentStatus::Banned => "BANNED",
            DocumentStatus::Removed => "REMOVED",
        };
        f.write_str(name)
    }
}

/// A ranked search result.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Document identifier.
    pub id: DocId,
    /// TF-IDF relevance for the query that produced this row.
    pub relevance: f64,
    /// Stored average rating.
    pub rating: Rating,
}

impl Document {
    /// Create a new result row.
    pub fn new(id: DocId, relevance: f64, rating: Rating) -> Self {
        Document {
            id,
            relevance,
            rating,
        }
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{ document_id = {}, relevance = {}, rating = {} }}",
            self.id, self.relevance, self.rating
        )
    }
}

/// Truncating integer average of `ratings`, or zero when there are none.
pub fn average_rating(ratings: &[Rating]) -> Rating {
    if ratings.is_empty() {
        return 0;
    }
    let sum: i64 = ratings.iter().map(|&r| i64::from(r)).sum();
    (sum / ratings.len() as i64) as Rating
}
