//! Duplicate document removal.
//!
//! Two documents are duplicates when they contain exactly the same set of
//! distinct words, whatever the word counts. Documents are scanned in
//! ascending id order and the lowest id of each word set is kept.

use std::collections::BTreeSet;

use ahash::AHashSet;

use crate::document::DocId;
use crate::engine::SearchEngine;

/// Ids of documents whose word set repeats that of a lower id, ascending.
pub fn find_duplicates(engine: &SearchEngine) -> Vec<DocId> {
    let mut seen: AHashSet<BTreeSet<&str>> = AHashSet::new();
    let mut duplicates = Vec::new();

    for id in engine {
        let words: BTreeSet<&str> = engine.word_frequencies(id).into_keys().collect();
        if !seen.insert(words) {
            duplicates.push(id);
        }
    }
    duplicates
}

/// Remove every duplicate document and return the removed ids, ascending.
///
/// Removal happens after the scan has finished.
pub fn remove_duplicates(engine: &mut SearchEngine) -> Vec<DocId> {
    let duplicates = find_duplicates(engine);
    for &id in &duplicates {
        tracing::info!(doc_id = id, "Found duplicate document id {id}");
        engine.remove_document(id);
    }
    duplicates
}
