//! Configuration for the search engine.
//!
//! All limits that shape ranking and bookkeeping (result cap, relevance tie
//! window, accumulator shard count, request history window, worker pool size)
//! are injected through [`EngineConfig`] at construction time.
//!
//! # Example
//!
//! ```
//! use pilum::config::EngineConfig;
//!
//! let config = EngineConfig::default()
//!     .with_max_result_count(10)
//!     .with_request_window(60);
//! assert!(config.validate().is_ok());
//!
//! let config = EngineConfig::from_json_str(r#"{ "accumulator_shards": 8 }"#).unwrap();
//! assert_eq!(config.accumulator_shards, 8);
//! assert_eq!(config.max_result_count, 5);
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{PilumError, Result};

/// Default number of documents returned by a ranked query.
pub const DEFAULT_MAX_RESULT_COUNT: usize = 5;

/// Default window within which two relevance values are considered equal.
pub const DEFAULT_RELEVANCE_EPSILON: f64 = 1e-6;

/// Default number of shards in the concurrent relevance accumulator.
pub const DEFAULT_ACCUMULATOR_SHARDS: usize = 100;

/// Default number of requests retained by the request queue (one per minute of a day).
pub const DEFAULT_REQUEST_WINDOW: usize = 1440;

/// Configuration for [`SearchEngine`](crate::engine::SearchEngine).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Maximum number of documents returned by a ranked query.
    pub max_result_count: usize,

    /// Relevance values closer than this are ordered by rating instead.
    pub relevance_epsilon: f64,

    /// Number of independently locked shards used by parallel ranking.
    pub accumulator_shards: usize,

    /// Number of recent requests tracked by a request queue.
    pub request_window: usize,

    /// Thread pool size for parallel execution.
    /// If None, uses the number of CPU cores.
    pub thread_pool_size: Option<usize>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_result_count: DEFAULT_MAX_RESULT_COUNT,
            relevance_epsilon: DEFAULT_RELEVANCE_EPSILON,
            accumulator_shards: DEFAULT_ACCUMULATOR_SHARDS,
            request_window: DEFAULT_REQUEST_WINDOW,
            thread_pool_size: None,
        }
    }
}

impl EngineConfig {
    /// Parse a JSON configuration. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a JSON configuration from a file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Set the ranked result cap.
    pub fn with_max_result_count(mut self, count: usize) -> Self {
        self.max_result_count = count;
        self
    }

    /// Set the relevance tie window.
    pub fn with_relevance_epsilon(mut self, epsilon: f64) -> Self {
        self.relevance_epsilon = epsilon;
        self
    }

    /// Set the accumulator shard count.
    pub fn with_accumulator_shards(mut self, shards: usize) -> Self {
        self.accumulator_shards = shards;
        self
    }

    /// Set the request queue window.
    pub fn with_request_window(mut self, window: usize) -> Self {
        self.request_window = window;
        self
    }

    /// Run parallel work on a dedicated pool of `size` threads.
    pub fn with_thread_pool_size(mut self, size: usize) -> Self {
        self.thread_pool_size = Some(size);
        self
    }

    /// Check that every value is usable.
    pub fn validate(&self) -> Result<()> {
        if self.max_result_count == 0 {
            return Err(PilumError::invalid_config(
                "max_result_count must be greater than zero",
            ));
        }
        if !self.relevance_epsilon.is_finite() || self.relevance_epsilon < 0.0 {
            return Err(PilumError::invalid_config(format!(
                "relevance_epsilon must be a finite non-negative number, got {}",
                self.relevance_epsilon
            )));
        }
        if self.accumulator_shards == 0 {
            return Err(PilumError::invalid_config(
                "accumulator_shards must be greater than zero",
            ));
        }
        if self.request_window == 0 {
            return Err(PilumError::invalid_config(
                "request_window must be greater than zero",
            ));
        }
        if self.thread_pool_size == Some(0) {
            return Err(PilumError::invalid_config(
                "thread_pool_size must be greater than zero when set",
            ));
        }
        Ok(())
    }
}
