//! Batch query processing.
//!
//! Independent queries are evaluated in parallel on the engine's worker pool.
//! Each query is ranked on its own; output order always follows input order.

use rayon::prelude::*;

use crate::document::Document;
use crate::engine::SearchEngine;
use crate::error::Result;

/// Run every query for active documents. `result[i]` answers `queries[i]`.
///
/// Fails with the error of the first invalid query.
pub fn process_queries<S>(engine: &SearchEngine, queries: &[S]) -> Result<Vec<Vec<Document>>>
where
    S: AsRef<str> + Sync,
{
    let results = engine.install(|| {
        queries
            .par_iter()
            .map(|query| engine.find_top_documents(query.as_ref()))
            .collect::<Result<Vec<_>>>()
    })?;

    tracing::debug!(queries = queries.len(), "batch processed");
    Ok(results)
}

/// Run every query and concatenate the results in query order.
///
/// Documents of different queries are not re-ranked against each other.
pub fn process_queries_joined<S>(engine: &SearchEngine, queries: &[S]) -> Result<Vec<Document>>
where
    S: AsRef<str> + Sync,
{
    let results = process_queries(engine, queries)?;
    Ok(results.into_iter().flatten().collect())
}
