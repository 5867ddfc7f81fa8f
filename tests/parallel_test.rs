//! Integration tests comparing sequential and parallel execution, batch
//! processing and duplicate removal.

use std::sync::Arc;
use std::thread;

use pilum::analysis::stop_words::StopWordSet;
use pilum::prelude::*;

const WORDS: [&str; 16] = [
    "cat", "dog", "bird", "curly", "fluffy", "big", "small", "tail", "collar", "city", "roof",
    "white", "black", "nasty", "pigeon", "eyes",
];

/// Deterministic corpus where document `i` draws words from a simple
/// linear congruential sequence.
fn corpus_engine(documents: i64, config: EngineConfig) -> SearchEngine {
    let stop_words = StopWordSet::from_text("and with in the").unwrap();
    let mut engine = SearchEngine::with_config(stop_words, config).unwrap();
    let mut state: u64 = 17;
    for id in 0..documents {
        let length = 3 + (id as usize % 9);
        let mut text = Vec::with_capacity(length);
        for _ in 0..length {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            text.push(WORDS[(state >> 33) as usize % WORDS.len()]);
        }
        let status = if id % 5 == 0 {
            DocumentStatus::Irrelevant
        } else {
            DocumentStatus::Active
        };
        let rating = (id % 11) as i32 - 5;
        engine
            .add_document(id, &text.join(" "), status, &[rating, rating + 2])
            .unwrap();
    }
    engine
}

#[test]
fn test_sequential_and_parallel_ranking_agree() {
    let engine = corpus_engine(500, EngineConfig::default().with_max_result_count(20));
    let queries = [
        "cat dog",
        "curly fluffy tail -collar",
        "big small white black nasty pigeon",
        "eyes -cat -dog",
        "roof city bird and with",
    ];

    for query in queries {
        let sequential = engine
            .find_top_documents_with_policy(ExecutionPolicy::Sequential, query, |_, _, _| true)
            .unwrap();
        let parallel = engine
            .find_top_documents_with_policy(ExecutionPolicy::Parallel, query, |_, _, _| true)
            .unwrap();

        let ids = |docs: &[Document]| docs.iter().map(|d| d.id).collect::<Vec<_>>();
        assert_eq!(ids(&sequential), ids(&parallel), "query {query:?}");
        for (a, b) in sequential.iter().zip(&parallel) {
            assert!((a.relevance - b.relevance).abs() < 1e-9);
            assert_eq!(a.rating, b.rating);
        }
    }
}

#[test]
fn test_sequential_and_parallel_matching_agree() {
    let engine = corpus_engine(100, EngineConfig::default());
    for id in &engine {
        for query in ["cat curly cat tail", "dog -roof", "bird bird eyes -nasty"] {
            let sequential = engine
                .match_document_with_policy(ExecutionPolicy::Sequential, query, id)
                .unwrap();
            let parallel = engine
                .match_document_with_policy(ExecutionPolicy::Parallel, query, id)
                .unwrap();
            assert_eq!(sequential, parallel);
        }
    }
}

#[test]
fn test_shard_count_does_not_change_results() {
    let one = corpus_engine(200, EngineConfig::default().with_accumulator_shards(1));
    let many = corpus_engine(200, EngineConfig::default().with_accumulator_shards(37));

    let query = "cat curly big -nasty";
    let a = one
        .find_top_documents_with_policy(ExecutionPolicy::Parallel, query, |_, _, _| true)
        .unwrap();
    let b = many
        .find_top_documents_with_policy(ExecutionPolicy::Parallel, query, |_, _, _| true)
        .unwrap();
    assert_eq!(
        a.iter().map(|d| d.id).collect::<Vec<_>>(),
        b.iter().map(|d| d.id).collect::<Vec<_>>()
    );
}

#[test]
fn test_concurrent_queries_through_shared_engine() {
    let engine = Arc::new(corpus_engine(300, EngineConfig::default()));
    let expected = engine.find_top_documents("fluffy tail -dog").unwrap();

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let engine = Arc::clone(&engine);
            thread::spawn(move || {
                let policy = if i % 2 == 0 {
                    ExecutionPolicy::Sequential
                } else {
                    ExecutionPolicy::Parallel
                };
                engine
                    .find_top_documents_with_policy(policy, "fluffy tail -dog", |_, status, _| {
                        status == DocumentStatus::Active
                    })
                    .unwrap()
            })
        })
        .collect();

    for handle in handles {
        let found = handle.join().unwrap();
        assert_eq!(
            found.iter().map(|d| d.id).collect::<Vec<_>>(),
            expected.iter().map(|d| d.id).collect::<Vec<_>>()
        );
    }
}

#[test]
fn test_process_queries() {
    let mut engine = SearchEngine::from_stop_words_text("and with").unwrap();
    let texts = [
        "funny pet and nasty rat",
        "funny pet with curly hair",
        "funny pet and not very nasty rat",
        "pet with rat and rat and rat",
        "nasty rat with curly hair",
    ];
    for (id, text) in texts.iter().enumerate() {
        engine
            .add_document(id as DocId + 1, text, DocumentStatus::Active, &[1, 2])
            .unwrap();
    }

    let queries = ["nasty rat -not", "not very funny nasty pet", "curly hair"];
    let results = process_queries(&engine, &queries).unwrap();
    assert_eq!(
        results.iter().map(Vec::len).collect::<Vec<_>>(),
        vec![3, 5, 2]
    );
    for (query, result) in queries.iter().zip(&results) {
        assert_eq!(result, &engine.find_top_documents(query).unwrap());
    }

    let joined = process_queries_joined(&engine, &queries).unwrap();
    assert_eq!(joined.len(), 10);
    assert_eq!(joined, results.concat());

    assert!(process_queries(&engine, &["ok", "--bad"]).is_err());
}

#[test]
fn test_remove_duplicates() {
    let mut engine = SearchEngine::from_stop_words_text("and with").unwrap();
    let documents = [
        (1, "funny pet and nasty rat"),
        (2, "funny pet with curly hair"),
        (3, "funny pet with curly hair"),
        (4, "funny pet and curly hair"),
        (5, "funny funny pet and nasty nasty rat"),
        (6, "funny pet and not very nasty rat"),
        (7, "very nasty rat and not very funny pet"),
        (8, "pet with rat and rat and rat"),
        (9, "nasty rat with curly hair"),
    ];
    for (id, text) in documents {
        engine
            .add_document(id, text, DocumentStatus::Active, &[1, 2])
            .unwrap();
    }
    assert_eq!(engine.document_count(), 9);

    let removed = remove_duplicates(&mut engine);
    assert_eq!(removed, vec![3, 4, 5, 7]);
    assert_eq!(engine.document_count(), 5);
    assert_eq!((&engine).into_iter().collect::<Vec<_>>(), vec![1, 2, 6, 8, 9]);

    assert!(remove_duplicates(&mut engine).is_empty());
}
