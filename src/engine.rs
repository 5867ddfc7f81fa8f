//! Search engine facade.
//!
//! [`SearchEngine`] ties together the stop word set, the word store, the
//! inverted index, the query parser and the ranker. It exposes document
//! mutation (`add_document`, `remove_document`) and read-only querying
//! (`find_top_documents*`, `match_document*`), each query operation having a
//! sequential and a parallel variant selected by [`ExecutionPolicy`].
//!
//! Mutation takes `&mut self` and querying takes `&self`, so the borrow
//! checker enforces that no query runs while the index changes. Any number
//! of queries may run concurrently through shared references.
//!
//! # Examples
//!
//! ```
//! use pilum::document::DocumentStatus;
//! use pilum::engine::SearchEngine;
//!
//! let mut engine = SearchEngine::from_stop_words_text("and with").unwrap();
//! engine.add_document(0, "white cat and yellow hat", DocumentStatus::Active, &[1, 2]).unwrap();
//! engine.add_document(1, "curly cat curly tail", DocumentStatus::Active, &[1, 2]).unwrap();
//!
//! let results = engine.find_top_documents("curly cat").unwrap();
//! assert_eq!(results[0].id, 1);
//!
//! let matched = engine.match_document("cat -hat", 1).unwrap();
//! assert_eq!(matched.words, vec!["cat"]);
//! ```

use std::collections::BTreeMap;
use std::sync::Arc;

use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::analysis::stop_words::StopWordSet;
use crate::analysis::tokenizer::{is_valid_word, split_into_words};
use crate::analysis::word_store::WordStore;
use crate::config::EngineConfig;
use crate::document::{DocId, Document, DocumentStatus, Rating, average_rating};
use crate::error::{PilumError, Result};
use crate::index::inverted::{DocumentData, DocumentIds, InvertedIndex, WordFrequencies};
use crate::query::parser::{ParseMode, QueryParser};
use crate::search::ExecutionPolicy;
use crate::search::collector::TopDocsCollector;
use crate::search::ranker::Ranker;

/// Outcome of matching a query against a single document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentMatch<'a> {
    /// Plus words of the query contained in the document, sorted and
    /// deduplicated. Empty when the document contains a minus word.
    pub words: Vec<&'a str>,
    /// Status of the document.
    pub status: DocumentStatus,
}

/// In-memory TF-IDF search engine.
pub struct SearchEngine {
    config: EngineConfig,
    stop_words: StopWordSet,
    words: WordStore,
    index: InvertedIndex,
    thread_pool: Arc<ThreadPool>,
}

impl SearchEngine {
    /// Create an engine with the given stop words and default configuration.
    pub fn new<I, S>(stop_words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::with_config(StopWordSet::new(stop_words)?, EngineConfig::default())
    }

    /// Create an engine from space-separated stop words.
    pub fn from_stop_words_text(text: &str) -> Result<Self> {
        Self::with_config(StopWordSet::from_text(text)?, EngineConfig::default())
    }

    /// Create an engine with an explicit configuration.
    pub fn with_config(stop_words: StopWordSet, config: EngineConfig) -> Result<Self> {
        config.validate()?;

        let thread_pool_size = config.thread_pool_size.unwrap_or_else(num_cpus::get);
        let thread_pool = ThreadPoolBuilder::new()
            .num_threads(thread_pool_size)
            .thread_name(|i| format!("pilum-search-{i}"))
            .build()
            .map_err(|e| PilumError::thread_pool(format!("Failed to create thread pool: {e}")))?;

        Ok(SearchEngine {
            config,
            stop_words,
            words: WordStore::new(),
            index: InvertedIndex::new(),
            thread_pool: Arc::new(thread_pool),
        })
    }

    /// Engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Stop words fixed at construction.
    pub fn stop_words(&self) -> &StopWordSet {
        &self.stop_words
    }

    /// Add a document.
    ///
    /// Fails with [`PilumError::InvalidDocument`] if `id` is negative or
    /// already present, and with [`PilumError::InvalidToken`] if a word
    /// contains a control character. Nothing is indexed when it fails.
    pub fn add_document(
        &mut self,
        id: DocId,
        text: &str,
        status: DocumentStatus,
        ratings: &[Rating],
    ) -> Result<()> {
        self.index.ensure_insertable(id)?;

        let mut kept = Vec::new();
        for word in split_into_words(text) {
            if !is_valid_word(word) {
                return Err(PilumError::invalid_token(format!(
                    "Word {word:?} in document {id} contains a control character"
                )));
            }
            if !self.stop_words.contains(word) {
                kept.push(word);
            }
        }

        let word_ids: Vec<_> = kept.iter().map(|word| self.words.intern(word)).collect();
        let data = DocumentData {
            rating: average_rating(ratings),
            status,
        };
        self.index.insert(id, &word_ids, data)?;

        tracing::debug!(
            doc_id = id,
            words = word_ids.len(),
            rating = data.rating,
            %status,
            "document added"
        );
        Ok(())
    }

    /// Remove a document. Returns `false` if `id` was not indexed.
    ///
    /// Interned words stay in the word store.
    pub fn remove_document(&mut self, id: DocId) -> bool {
        let removed = self.index.remove(id).is_some();
        if removed {
            tracing::debug!(doc_id = id, "document removed");
        }
        removed
    }

    /// Top documents with status [`DocumentStatus::Active`].
    pub fn find_top_documents(&self, raw_query: &str) -> Result<Vec<Document>> {
        self.find_top_documents_by_status(raw_query, DocumentStatus::Active)
    }

    /// Top documents with the given status.
    pub fn find_top_documents_by_status(
        &self,
        raw_query: &str,
        status: DocumentStatus,
    ) -> Result<Vec<Document>> {
        self.find_top_documents_with(raw_query, move |_, document_status, _| {
            document_status == status
        })
    }

    /// Top documents admitted by `predicate`, ranked sequentially.
    pub fn find_top_documents_with<P>(&self, raw_query: &str, predicate: P) -> Result<Vec<Document>>
    where
        P: Fn(DocId, DocumentStatus, Rating) -> bool + Sync,
    {
        self.find_top_documents_with_policy(ExecutionPolicy::Sequential, raw_query, predicate)
    }

    /// Top documents admitted by `predicate`, ranked with the given policy.
    ///
    /// At most `max_result_count` documents are returned, ordered by
    /// relevance descending and by rating descending within the relevance
    /// epsilon.
    pub fn find_top_documents_with_policy<P>(
        &self,
        policy: ExecutionPolicy,
        raw_query: &str,
        predicate: P,
    ) -> Result<Vec<Document>>
    where
        P: Fn(DocId, DocumentStatus, Rating) -> bool + Sync,
    {
        let query = self.parser().parse(raw_query, ParseMode::Deduplicated)?;
        let ranker = Ranker::new(&self.index, &self.words, self.config.accumulator_shards);

        let matched = match policy {
            ExecutionPolicy::Sequential => ranker.find_all_documents(&query, &predicate, policy)?,
            ExecutionPolicy::Parallel => {
                self.install(|| ranker.find_all_documents(&query, &predicate, policy))?
            }
        };
        let candidates = matched.len();

        let collector =
            TopDocsCollector::new(self.config.max_result_count, self.config.relevance_epsilon);
        let top = collector.collect(matched);

        tracing::debug!(?policy, candidates, returned = top.len(), "query ranked");
        Ok(top)
    }

    /// Match a query against one document, sequentially.
    pub fn match_document(&self, raw_query: &str, id: DocId) -> Result<DocumentMatch<'_>> {
        self.match_document_with_policy(ExecutionPolicy::Sequential, raw_query, id)
    }

    /// Match a query against one document with the given policy.
    ///
    /// Fails with [`PilumError::UnknownDocument`] if `id` is not indexed.
    /// Both policies return the same result.
    pub fn match_document_with_policy(
        &self,
        policy: ExecutionPolicy,
        raw_query: &str,
        id: DocId,
    ) -> Result<DocumentMatch<'_>> {
        let data = self
            .index
            .document(id)
            .ok_or_else(|| PilumError::unknown_document(id))?;

        let words = match policy {
            ExecutionPolicy::Sequential => self.match_words_sequential(raw_query, id)?,
            ExecutionPolicy::Parallel => {
                self.install(|| self.match_words_parallel(raw_query, id))?
            }
        };

        Ok(DocumentMatch {
            words,
            status: data.status,
        })
    }

    fn match_words_sequential(&self, raw_query: &str, id: DocId) -> Result<Vec<&str>> {
        let query = self.parser().parse(raw_query, ParseMode::Deduplicated)?;

        let excluded = query
            .minus_words
            .iter()
            .any(|word| self.document_contains(id, word));
        if excluded {
            return Ok(Vec::new());
        }

        Ok(query
            .plus_words
            .iter()
            .filter_map(|word| self.contained_word(id, word))
            .collect())
    }

    fn match_words_parallel(&self, raw_query: &str, id: DocId) -> Result<Vec<&str>> {
        let query = self.parser().parse(raw_query, ParseMode::Raw)?;

        let excluded = query
            .minus_words
            .par_iter()
            .any(|word| self.document_contains(id, word));
        if excluded {
            return Ok(Vec::new());
        }

        let mut words: Vec<&str> = query
            .plus_words
            .par_iter()
            .filter_map(|word| self.contained_word(id, word))
            .collect();
        words.par_sort_unstable();
        words.dedup();
        Ok(words)
    }

    fn document_contains(&self, id: DocId, word: &str) -> bool {
        self.words
            .lookup(word)
            .is_some_and(|word_id| self.index.document_contains(id, word_id))
    }

    /// Interned text of `word` if document `id` contains it.
    fn contained_word(&self, id: DocId, word: &str) -> Option<&str> {
        let word_id = self.words.lookup(word)?;
        self.index
            .document_contains(id, word_id)
            .then(|| self.words.resolve(word_id))
    }

    /// Number of indexed documents.
    pub fn document_count(&self) -> usize {
        self.index.len()
    }

    /// Ids of all indexed documents, ascending.
    pub fn document_ids(&self) -> DocumentIds<'_> {
        self.index.document_ids()
    }

    /// Status and rating of a document.
    pub fn document_data(&self, id: DocId) -> Option<DocumentData> {
        self.index.document(id)
    }

    /// Term frequency of every word of a document, keyed by word text.
    ///
    /// Empty for documents that are not indexed.
    pub fn word_frequencies(&self, id: DocId) -> BTreeMap<&str, f64> {
        self.index
            .word_frequencies(id)
            .map(|frequencies| self.resolve_frequencies(frequencies))
            .unwrap_or_default()
    }

    fn resolve_frequencies(&self, frequencies: &WordFrequencies) -> BTreeMap<&str, f64> {
        frequencies
            .iter()
            .map(|(&word_id, &freq)| (self.words.resolve(word_id), freq))
            .collect()
    }

    /// Number of distinct words ever interned, including words of removed
    /// documents.
    pub fn interned_word_count(&self) -> usize {
        self.words.len()
    }

    fn parser(&self) -> QueryParser<'_> {
        QueryParser::new(&self.stop_words)
    }

    /// Run `op` on the engine's worker pool.
    pub(crate) fn install<OP, R>(&self, op: OP) -> R
    where
        OP: FnOnce() -> R + Send,
        R: Send,
    {
        self.thread_pool.install(op)
    }
}

impl<'a> IntoIterator for &'a SearchEngine {
    type Item = DocId;
    type IntoIter = DocumentIds<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.document_ids()
    }
}

impl std::fmt::Debug for SearchEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchEngine")
            .field("documents", &self.index.len())
            .field("stop_words", &self.stop_words.len())
            .field("config", &self.config)
            .finish()
    }
}
