//! # Pilum
//!
//! An in-memory full-text retrieval engine for short documents.
//!
//! ## Features
//!
//! - TF-IDF relevance ranking with plus and minus query words
//! - Status and arbitrary predicate filtering
//! - Sequential and parallel ranking with identical results
//! - Sharded concurrent score accumulation
//! - Parallel batch query processing
//! - Duplicate document removal
//! - Sliding-window request statistics
//!
//! ## Example
//!
//! ```
//! use pilum::prelude::*;
//!
//! let mut engine = SearchEngine::from_stop_words_text("and with").unwrap();
//! engine.add_document(0, "white cat and yellow hat", DocumentStatus::Active, &[1, 2]).unwrap();
//! engine.add_document(1, "curly cat curly tail", DocumentStatus::Active, &[1, 2]).unwrap();
//! engine.add_document(2, "nasty dog with big eyes", DocumentStatus::Active, &[1, 2]).unwrap();
//!
//! let sequential = engine.find_top_documents("curly nasty cat").unwrap();
//! let parallel = engine
//!     .find_top_documents_with_policy(ExecutionPolicy::Parallel, "curly nasty cat", |_, status, _| {
//!         status == DocumentStatus::Active
//!     })
//!     .unwrap();
//! assert_eq!(sequential, parallel);
//! ```

pub mod analysis;
pub mod batch;
pub mod config;
pub mod document;
pub mod duplicates;
pub mod engine;
pub mod error;
pub mod index;
pub mod query;
pub mod request_queue;
pub mod search;

pub mod prelude {
    pub use crate::batch::{process_queries, process_queries_joined};
    pub use crate::config::EngineConfig;
    pub use crate::document::{DocId, Document, DocumentStatus, Rating};
    pub use crate::duplicates::remove_duplicates;
    pub use crate::engine::{DocumentMatch, SearchEngine};
    pub use crate::error::{PilumError, Result};
    pub use crate::request_queue::RequestQueue;
    pub use crate::search::ExecutionPolicy;
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
