//! Ordering and top-k cutoff of scored documents.
//!
//! Documents are ordered by relevance descending. Adjacent documents whose
//! relevance differs by less than the configured epsilon form a tie group,
//! ordered by rating descending and then by id ascending. The comparison is a
//! total order, so sequential and parallel ranking produce the same list even
//! when their floating point sums differ in the last bits.

use std::cmp::Ordering;

use crate::document::Document;

/// Collector that keeps the top N documents.
#[derive(Debug, Clone, Copy)]
pub struct TopDocsCollector {
    /// Maximum number of documents to keep.
    max_docs: usize,
    /// Relevance difference below which two documents tie.
    epsilon: f64,
}

impl TopDocsCollector {
    /// Create a new top docs collector.
    pub fn new(max_docs: usize, epsilon: f64) -> Self {
        TopDocsCollector { max_docs, epsilon }
    }

    /// Get the maximum number of documents to collect.
    pub fn max_docs(&self) -> usize {
        self.max_docs
    }

    /// Order `documents` and keep at most `max_docs` of them.
    pub fn collect(&self, mut documents: Vec<Document>) -> Vec<Document> {
        sort_documents(&mut documents, self.epsilon);
        documents.truncate(self.max_docs);
        documents
    }
}

/// Sort documents into result order.
pub fn sort_documents(documents: &mut [Document], epsilon: f64) {
    documents.sort_unstable_by(|a, b| {
        b.relevance
            .total_cmp(&a.relevance)
            .then_with(|| a.id.cmp(&b.id))
    });

    let mut start = 0;
    while start < documents.len() {
        let mut end = start + 1;
        while end < documents.len()
            && (documents[end - 1].relevance - documents[end].relevance).abs() < epsilon
        {
            end += 1;
        }
        if end - start > 1 {
            documents[start..end].sort_unstable_by(by_rating_then_id);
        }
        start = end;
    }
}

fn by_rating_then_id(a: &Document, b: &Document) -> Ordering {
    b.rating.cmp(&a.rating).then_with(|| a.id.cmp(&b.id))
}
