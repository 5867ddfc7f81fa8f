//! TF-IDF ranking.
//!
//! For every plus word present in the index the ranker computes
//! `idf = ln(total_documents / documents_containing_word)` and adds
//! `term_frequency * idf` to the score of each containing document admitted
//! by the predicate. Every document containing a minus word is then dropped,
//! whatever its score. The remaining documents become result rows.
//!
//! The sequential path accumulates into a plain ordered map. The parallel
//! path spreads plus and minus words, and the postings of each word, across
//! the worker pool and accumulates into a [`ConcurrentAccumulator`]; minus
//! words are only applied after every plus word contribution has landed.

use std::collections::BTreeMap;

use rayon::prelude::*;

use crate::analysis::word_store::{WordId, WordStore};
use crate::document::{DocId, Document, DocumentStatus, Rating};
use crate::error::Result;
use crate::index::inverted::{InvertedIndex, Postings};
use crate::query::Query;
use crate::search::ExecutionPolicy;
use crate::search::accumulator::ConcurrentAccumulator;

/// Scores every candidate document of a query.
#[derive(Debug, Clone, Copy)]
pub struct Ranker<'a> {
    index: &'a InvertedIndex,
    words: &'a WordStore,
    shard_count: usize,
}

impl<'a> Ranker<'a> {
    /// Create a ranker over an index. `shard_count` sizes the accumulator of
    /// the parallel path.
    pub fn new(index: &'a InvertedIndex, words: &'a WordStore, shard_count: usize) -> Self {
        Ranker {
            index,
            words,
            shard_count,
        }
    }

    /// Score all documents matching `query` and admitted by `predicate`.
    ///
    /// The query must be deduplicated. Rows come out in ascending id order.
    pub fn find_all_documents<P>(
        &self,
        query: &Query<'_>,
        predicate: &P,
        policy: ExecutionPolicy,
    ) -> Result<Vec<Document>>
    where
        P: Fn(DocId, DocumentStatus, Rating) -> bool + Sync,
    {
        let relevance = match policy {
            ExecutionPolicy::Sequential => self.accumulate_sequential(query, predicate),
            ExecutionPolicy::Parallel => self.accumulate_parallel(query, predicate)?,
        };
        Ok(self.into_documents(relevance))
    }

    fn accumulate_sequential<P>(&self, query: &Query<'_>, predicate: &P) -> BTreeMap<DocId, f64>
    where
        P: Fn(DocId, DocumentStatus, Rating) -> bool,
    {
        let mut relevance: BTreeMap<DocId, f64> = BTreeMap::new();

        for (word, postings) in self.resolve(&query.plus_words) {
            let Some(idf) = self.index.inverse_document_freq(word) else {
                continue;
            };
            for (&doc_id, &term_freq) in postings {
                if self.admits(predicate, doc_id) {
                    *relevance.entry(doc_id).or_insert(0.0) += term_freq * idf;
                }
            }
        }

        for (_, postings) in self.resolve(&query.minus_words) {
            for doc_id in postings.keys() {
                relevance.remove(doc_id);
            }
        }

        relevance
    }

    fn accumulate_parallel<P>(
        &self,
        query: &Query<'_>,
        predicate: &P,
    ) -> Result<BTreeMap<DocId, f64>>
    where
        P: Fn(DocId, DocumentStatus, Rating) -> bool + Sync,
    {
        let accumulator = ConcurrentAccumulator::<DocId, f64>::new(self.shard_count)?;

        query.plus_words.par_iter().for_each(|word| {
            let Some((word, postings)) = self.resolve_word(word) else {
                return;
            };
            let Some(idf) = self.index.inverse_document_freq(word) else {
                return;
            };
            postings.par_iter().for_each(|(&doc_id, &term_freq)| {
                if self.admits(predicate, doc_id) {
                    *accumulator.access(doc_id) += term_freq * idf;
                }
            });
        });

        query.minus_words.par_iter().for_each(|word| {
            if let Some((_, postings)) = self.resolve_word(word) {
                postings.keys().for_each(|doc_id| {
                    accumulator.erase(doc_id);
                });
            }
        });

        Ok(accumulator.into_map())
    }

    fn admits<P>(&self, predicate: &P, doc_id: DocId) -> bool
    where
        P: Fn(DocId, DocumentStatus, Rating) -> bool,
    {
        self.index
            .document(doc_id)
            .is_some_and(|data| predicate(doc_id, data.status, data.rating))
    }

    fn resolve_word(&self, word: &str) -> Option<(WordId, &'a Postings)> {
        let id = self.words.lookup(word)?;
        let postings = self.index.postings(id)?;
        Some((id, postings))
    }

    fn resolve<'w>(
        &'w self,
        words: &'w [&str],
    ) -> impl Iterator<Item = (WordId, &'a Postings)> + 'w {
        words.iter().filter_map(|word| self.resolve_word(word))
    }

    fn into_documents(&self, relevance: BTreeMap<DocId, f64>) -> Vec<Document> {
        relevance
            .into_iter()
            .filter_map(|(doc_id, relevance)| {
                self.index
                    .document(doc_id)
                    .map(|data| Document::new(doc_id, relevance, data.rating))
            })
            .collect()
    }
}
