//! In-memory inverted index.
//!
//! The index keeps two mirrored views of the same postings:
//!
//! ```text
//! word_to_doc_freqs[word][doc_id] = term_frequency
//! doc_to_word_freqs[doc_id][word] = term_frequency
//! ```
//!
//! plus per-document metadata ([`DocumentData`]). Both views are only
//! mutated by [`InvertedIndex::insert`] and [`InvertedIndex::remove`], which
//! keep them consistent. Words are referred to by [`WordId`] handles owned by
//! a [`WordStore`](crate::analysis::word_store::WordStore).

use std::collections::BTreeMap;
use std::collections::btree_map;
use std::iter::Copied;

use ahash::AHashMap;

use crate::analysis::word_store::WordId;
use crate::document::{DocId, DocumentStatus, Rating};
use crate::error::{PilumError, Result};

/// Term frequencies of one word across documents, ordered by document id.
pub type Postings = BTreeMap<DocId, f64>;

/// Term frequencies of the words of one document.
pub type WordFrequencies = BTreeMap<WordId, f64>;

/// Iterator over the ids of indexed documents in ascending order.
pub type DocumentIds<'a> = Copied<btree_map::Keys<'a, DocId, DocumentData>>;

/// Metadata stored for every indexed document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocumentData {
    pub rating: Rating,
    pub status: DocumentStatus,
}

/// Word to document postings and their per-document mirror.
#[derive(Debug, Default)]
pub struct InvertedIndex {
    word_to_doc_freqs: AHashMap<WordId, Postings>,
    doc_to_word_freqs: BTreeMap<DocId, WordFrequencies>,
    documents: BTreeMap<DocId, DocumentData>,
}

impl InvertedIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check that `id` can be used for a new document.
    pub fn ensure_insertable(&self, id: DocId) -> Result<()> {
        if id < 0 {
            return Err(PilumError::invalid_document(format!(
                "Negative document id {id}"
            )));
        }
        if self.documents.contains_key(&id) {
            return Err(PilumError::invalid_document(format!(
                "Document id {id} is already indexed"
            )));
        }
        Ok(())
    }

    /// Insert a document given its (stop word free) words in order.
    ///
    /// Term frequency of a word is its occurrence count divided by the total
    /// number of words. A document with no words is stored with empty
    /// frequencies and never matches any query.
    pub fn insert(&mut self, id: DocId, words: &[WordId], data: DocumentData) -> Result<()> {
        self.ensure_insertable(id)?;

        let mut counts: BTreeMap<WordId, usize> = BTreeMap::new();
        for &word in words {
            *counts.entry(word).or_insert(0) += 1;
        }

        let total = words.len() as f64;
        let mut frequencies = WordFrequencies::new();
        for (word, count) in counts {
            let term_freq = count as f64 / total;
            self.word_to_doc_freqs
                .entry(word)
                .or_default()
                .insert(id, term_freq);
            frequencies.insert(word, term_freq);
        }

        self.doc_to_word_freqs.insert(id, frequencies);
        self.documents.insert(id, data);
        Ok(())
    }

    /// Remove a document and all its postings.
    ///
    /// Returns the metadata of the removed document, or `None` if `id` was
    /// not indexed. Posting lists left empty are dropped.
    pub fn remove(&mut self, id: DocId) -> Option<DocumentData> {
        let data = self.documents.remove(&id)?;
        if let Some(frequencies) = self.doc_to_word_freqs.remove(&id) {
            for word in frequencies.keys() {
                if let Some(postings) = self.word_to_doc_freqs.get_mut(word) {
                    postings.remove(&id);
                    if postings.is_empty() {
                        self.word_to_doc_freqs.remove(word);
                    }
                }
            }
        }
        Some(data)
    }

    /// Whether `id` is indexed.
    pub fn contains(&self, id: DocId) -> bool {
        self.documents.contains_key(&id)
    }

    /// Number of indexed documents.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Whether the index holds no documents.
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Metadata of a document.
    pub fn document(&self, id: DocId) -> Option<DocumentData> {
        self.documents.get(&id).copied()
    }

    /// Ids of all indexed documents, ascending.
    pub fn document_ids(&self) -> DocumentIds<'_> {
        self.documents.keys().copied()
    }

    /// Postings of a word, if any document contains it.
    pub fn postings(&self, word: WordId) -> Option<&Postings> {
        self.word_to_doc_freqs.get(&word)
    }

    /// Word frequencies of a document.
    pub fn word_frequencies(&self, id: DocId) -> Option<&WordFrequencies> {
        self.doc_to_word_freqs.get(&id)
    }

    /// Whether a document contains a word.
    pub fn document_contains(&self, id: DocId, word: WordId) -> bool {
        self.doc_to_word_freqs
            .get(&id)
            .is_some_and(|frequencies| frequencies.contains_key(&word))
    }

    /// Inverse document frequency `ln(total / containing)` of a word.
    ///
    /// Returns `None` for words that appear in no document.
    pub fn inverse_document_freq(&self, word: WordId) -> Option<f64> {
        let containing = self.word_to_doc_freqs.get(&word)?.len();
        Some((self.documents.len() as f64 / containing as f64).ln())
    }

    /// Number of words with at least one posting.
    pub fn word_count(&self) -> usize {
        self.word_to_doc_freqs.len()
    }
}
