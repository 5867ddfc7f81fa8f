//! Sliding-window request statistics.
//!
//! [`RequestQueue`] runs queries against a [`SearchEngine`] and remembers the
//! most recent ones, together with whether they returned any document. It
//! tracks how many requests in the retained window came back empty. Once the
//! window is full, each new request evicts the oldest one.
//!
//! # Examples
//!
//! ```
//! use pilum::document::DocumentStatus;
//! use pilum::engine::SearchEngine;
//! use pilum::request_queue::RequestQueue;
//!
//! let mut engine = SearchEngine::from_stop_words_text("and in at").unwrap();
//! engine.add_document(1, "curly cat curly tail", DocumentStatus::Active, &[7, 2, 7]).unwrap();
//!
//! let mut queue = RequestQueue::with_capacity(&engine, 2);
//! queue.add_find_request("empty request").unwrap();
//! assert_eq!(queue.no_result_requests(), 1);
//!
//! queue.add_find_request("curly dog").unwrap();
//! queue.add_find_request("big collar").unwrap();
//! assert_eq!(queue.no_result_requests(), 1);
//! ```

use std::collections::VecDeque;

use crate::document::{DocId, Document, DocumentStatus, Rating};
use crate::engine::SearchEngine;
use crate::error::Result;

/// One remembered request.
#[derive(Debug, Clone, PartialEq, Eq)]
struct RequestRecord {
    query: String,
    has_results: bool,
}

/// Bounded history of recent find requests.
#[derive(Debug)]
pub struct RequestQueue<'e> {
    engine: &'e SearchEngine,
    requests: VecDeque<RequestRecord>,
    capacity: usize,
    no_result_requests: usize,
}

impl<'e> RequestQueue<'e> {
    /// Create a queue whose window is the engine's configured `request_window`.
    pub fn new(engine: &'e SearchEngine) -> Self {
        Self::with_capacity(engine, engine.config().request_window)
    }

    /// Create a queue retaining at most `capacity` requests (at least one).
    pub fn with_capacity(engine: &'e SearchEngine, capacity: usize) -> Self {
        let capacity = capacity.max(1);
        RequestQueue {
            engine,
            requests: VecDeque::with_capacity(capacity),
            capacity,
            no_result_requests: 0,
        }
    }

    /// Run a query for active documents and record it.
    pub fn add_find_request(&mut self, raw_query: &str) -> Result<Vec<Document>> {
        let result = self.engine.find_top_documents(raw_query)?;
        self.record(raw_query, &result);
        Ok(result)
    }

    /// Run a query for documents with `status` and record it.
    pub fn add_find_request_by_status(
        &mut self,
        raw_query: &str,
        status: DocumentStatus,
    ) -> Result<Vec<Document>> {
        let result = self.engine.find_top_documents_by_status(raw_query, status)?;
        self.record(raw_query, &result);
        Ok(result)
    }

    /// Run a query filtered by `predicate` and record it.
    pub fn add_find_request_with<P>(&mut self, raw_query: &str, predicate: P) -> Result<Vec<Document>>
    where
        P: Fn(DocId, DocumentStatus, Rating) -> bool + Sync,
    {
        let result = self.engine.find_top_documents_with(raw_query, predicate)?;
        self.record(raw_query, &result);
        Ok(result)
    }

    /// Number of retained requests that returned no document.
    pub fn no_result_requests(&self) -> usize {
        self.no_result_requests
    }

    /// Number of retained requests.
    pub fn len(&self) -> usize {
        self.requests.len()
    }

    /// Whether no request has been recorded.
    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    /// Maximum number of retained requests.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    fn record(&mut self, raw_query: &str, result: &[Document]) {
        let has_results = !result.is_empty();
        if !has_results {
            self.no_result_requests += 1;
        }
        self.requests.push_back(RequestRecord {
            query: raw_query.to_string(),
            has_results,
        });

        while self.requests.len() > self.capacity {
            if let Some(evicted) = self.requests.pop_front() {
                if !evicted.has_results {
                    self.no_result_requests -= 1;
                }
                tracing::trace!(query = %evicted.query, "request evicted from window");
            }
        }
    }
}
