//! Integration tests for the request queue window.

use pilum::prelude::*;

fn engine() -> SearchEngine {
    let mut engine = SearchEngine::from_stop_words_text("and in at").unwrap();
    engine
        .add_document(1, "curly cat curly tail", DocumentStatus::Active, &[7, 2, 7])
        .unwrap();
    engine
        .add_document(2, "curly dog and fancy collar", DocumentStatus::Active, &[1, 2, 3])
        .unwrap();
    engine
        .add_document(3, "big cat fancy collar ", DocumentStatus::Active, &[1, 2, 8])
        .unwrap();
    engine
        .add_document(4, "big dog sparrow Eugene", DocumentStatus::Active, &[1, 3, 2])
        .unwrap();
    engine
        .add_document(5, "big dog sparrow Vasiliy", DocumentStatus::Active, &[1, 1, 1])
        .unwrap();
    engine
}

#[test]
fn test_day_of_requests() {
    let engine = engine();
    let mut queue = RequestQueue::new(&engine);
    assert_eq!(queue.capacity(), 1440);

    for _ in 0..1439 {
        queue.add_find_request("empty request").unwrap();
    }
    assert_eq!(queue.no_result_requests(), 1439);

    queue.add_find_request("curly dog").unwrap();
    assert_eq!(queue.no_result_requests(), 1439);
    assert_eq!(queue.len(), 1440);

    queue.add_find_request("big collar").unwrap();
    assert_eq!(queue.no_result_requests(), 1438);

    queue.add_find_request("sparrow").unwrap();
    assert_eq!(queue.no_result_requests(), 1437);
    assert_eq!(queue.len(), 1440);
}

#[test]
fn test_first_empty_request_evicted() {
    let engine = engine();
    let mut queue = RequestQueue::new(&engine);

    queue.add_find_request("nothing here").unwrap();
    for _ in 0..1440 {
        queue.add_find_request("curly").unwrap();
    }
    assert_eq!(queue.no_result_requests(), 0);
    assert_eq!(queue.len(), 1440);
}

#[test]
fn test_window_from_config() {
    let config = EngineConfig::default().with_request_window(3);
    let stop_words = pilum::analysis::stop_words::StopWordSet::default();
    let mut engine = SearchEngine::with_config(stop_words, config).unwrap();
    engine
        .add_document(1, "cat", DocumentStatus::Banned, &[])
        .unwrap();

    let mut queue = RequestQueue::new(&engine);
    assert_eq!(queue.capacity(), 3);
    assert!(queue.is_empty());

    queue.add_find_request("cat").unwrap();
    assert_eq!(queue.no_result_requests(), 1);
    queue
        .add_find_request_by_status("cat", DocumentStatus::Banned)
        .unwrap();
    queue
        .add_find_request_with("cat", |id, _, _| id == 1)
        .unwrap();
    assert_eq!(queue.no_result_requests(), 1);

    queue.add_find_request("dog").unwrap();
    assert_eq!(queue.len(), 3);
    assert_eq!(queue.no_result_requests(), 1);
}

#[test]
fn test_failed_request_not_recorded() {
    let engine = engine();
    let mut queue = RequestQueue::with_capacity(&engine, 10);

    assert!(queue.add_find_request("--curly").is_err());
    assert!(queue.is_empty());
    assert_eq!(queue.no_result_requests(), 0);
}
