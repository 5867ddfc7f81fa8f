//! Error types for the Pilum library.
//!
//! Every fallible operation returns [`Result`], whose error side is the
//! [`PilumError`] enum. Errors are raised at the point of the offending call
//! and never retried internally: a malformed document or query is a caller
//! bug, not a transient condition.
//!
//! # Examples
//!
//! ```
//! use pilum::error::{PilumError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(PilumError::invalid_document("Negative document id -1"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

use crate::document::DocId;

/// The main error type for Pilum operations.
#[derive(Error, Debug)]
pub enum PilumError {
    /// Negative or already-present document id.
    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    /// A document or stop word contains a control character.
    #[error("Invalid token: {0}")]
    InvalidToken(String),

    /// A query word is empty, malformed, or contains a control character.
    #[error("Invalid query word: {0}")]
    InvalidQueryWord(String),

    /// The requested document id is not present in the engine.
    #[error("Unknown document: no document with id {0}")]
    UnknownDocument(DocId),

    /// Configuration values out of range.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Worker pool construction failed.
    #[error("Thread pool error: {0}")]
    ThreadPool(String),

    /// I/O errors (config file loading)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for operations that may fail with PilumError.
pub type Result<T> = std::result::Result<T, PilumError>;

impl PilumError {
    /// Create a new invalid document error.
    pub fn invalid_document<S: Into<String>>(msg: S) -> Self {
        PilumError::InvalidDocument(msg.into())
    }

    /// Create a new invalid token error.
    pub fn invalid_token<S: Into<String>>(msg: S) -> Self {
        PilumError::InvalidToken(msg.into())
    }

    /// Create a new invalid query word error.
    pub fn invalid_query_word<S: Into<String>>(msg: S) -> Self {
        PilumError::InvalidQueryWord(msg.into())
    }

    /// Create a new unknown document error.
    pub fn unknown_document(id: DocId) -> Self {
        PilumError::UnknownDocument(id)
    }

    /// Create a new invalid config error.
    pub fn invalid_config<S: Into<String>>(msg: S) -> Self {
        PilumError::InvalidConfig(msg.into())
    }

    /// Create a new thread pool error.
    pub fn thread_pool<S: Into<String>>(msg: S) -> Self {
        PilumError::ThreadPool(msg.into())
    }
}
