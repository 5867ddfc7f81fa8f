//! Relevance ranking.
//!
//! - [`ranker`] - TF-IDF scoring of candidate documents, sequential or parallel
//! - [`accumulator`] - Shard-locked score map used by parallel ranking
//! - [`collector`] - Deterministic ordering and top-k cutoff of scored documents

pub mod accumulator;
pub mod collector;
pub mod ranker;

use serde::{Deserialize, Serialize};

/// Execution strategy for operations that have a parallel variant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExecutionPolicy {
    /// Run on the calling thread.
    #[default]
    Sequential,
    /// Fan the work out across the worker pool.
    Parallel,
}
