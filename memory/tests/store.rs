//! Integration tests for the in-memory event store.
//!
//! Covers the append-only ordering invariant, incremental loads, global
//! ordering, and the optimistic-concurrency race where exactly one of two
//! competing writers may win.

#![allow(clippy::expect_used, clippy::panic)] // Panics: tests fail loudly on broken invariants

use chrono::Utc;
use factstore_core::event::SerializedEvent;
use factstore_core::event_store::{EventStore, EventStoreError};
use factstore_core::stream::{StreamId, Version};
use factstore_memory::InMemoryEventStore;
use std::sync::Arc;
use tokio::sync::Barrier;

fn event(event_type: &str) -> SerializedEvent {
    SerializedEvent::new(event_type.to_string(), vec![0xAB], Utc::now(), None)
}

#[tokio::test]
async fn n_appends_yield_versions_one_through_n() {
    let store = InMemoryEventStore::new();
    let id = StreamId::new("account-1");

    let mut current = Version::INITIAL;
    for i in 0..5 {
        current = store
            .append_event(id.clone(), current, event(&format!("E{i}.v1")))
            .await
            .expect("append should succeed");
    }

    let events = store.load_events(id).await.expect("load should succeed");
    assert_eq!(events.len(), 5);
    let versions: Vec<u64> = events.iter().map(|e| e.version.value()).collect();
    assert_eq!(versions, vec![1, 2, 3, 4, 5]);
}

#[tokio::test]
async fn load_events_after_returns_strictly_newer_events() {
    let store = InMemoryEventStore::new();
    let id = StreamId::new("account-1");

    let mut current = Version::INITIAL;
    for i in 0..4 {
        current = store
            .append_event(id.clone(), current, event(&format!("E{i}.v1")))
            .await
            .expect("append should succeed");
    }

    let tail = store
        .load_events_after(id.clone(), Version::new(2))
        .await
        .expect("load should succeed");
    let versions: Vec<u64> = tail.iter().map(|e| e.version.value()).collect();
    assert_eq!(versions, vec![3, 4]);

    // An exclusive bound of INITIAL is a full load.
    let all = store
        .load_events_after(id.clone(), Version::INITIAL)
        .await
        .expect("load should succeed");
    assert_eq!(all.len(), 4);

    // A bound at or past the head yields nothing.
    let none = store
        .load_events_after(id, Version::new(4))
        .await
        .expect("load should succeed");
    assert!(none.is_empty());
}

#[tokio::test]
async fn load_all_preserves_interleaved_append_order() {
    let store = InMemoryEventStore::new();
    let a = StreamId::new("account-a");
    let b = StreamId::new("account-b");

    store
        .append_event(a.clone(), Version::INITIAL, event("A1.v1"))
        .await
        .expect("append should succeed");
    store
        .append_event(b.clone(), Version::INITIAL, event("B1.v1"))
        .await
        .expect("append should succeed");
    store
        .append_event(b.clone(), Version::new(1), event("B2.v1"))
        .await
        .expect("append should succeed");
    store
        .append_event(a, Version::new(1), event("A2.v1"))
        .await
        .expect("append should succeed");

    let all = store.load_all_events().await.expect("load should succeed");
    let order: Vec<&str> = all.iter().map(|e| e.event_type.as_str()).collect();
    assert_eq!(order, vec!["A1.v1", "B1.v1", "B2.v1", "A2.v1"]);

    for (index, recorded) in all.iter().enumerate() {
        assert_eq!(recorded.position, index as u64);
    }
}

#[tokio::test]
async fn racing_appends_with_same_expected_version_have_one_winner() {
    let store = InMemoryEventStore::new();
    let id = StreamId::new("account-1");
    let barrier = Arc::new(Barrier::new(2));

    let mut tasks = Vec::new();
    for writer in 0..2 {
        let store = store.clone();
        let id = id.clone();
        let barrier = Arc::clone(&barrier);
        tasks.push(tokio::spawn(async move {
            // Both writers observed the stream at INITIAL before appending.
            barrier.wait().await;
            store
                .append_event(id, Version::INITIAL, event(&format!("W{writer}.v1")))
                .await
        }));
    }

    let mut successes = 0;
    let mut conflicts = 0;
    for task in tasks {
        match task.await.expect("task should not panic") {
            Ok(version) => {
                assert_eq!(version, Version::new(1));
                successes += 1;
            },
            Err(EventStoreError::ConcurrencyConflict { expected, actual, .. }) => {
                assert_eq!(expected, Version::INITIAL);
                assert_eq!(actual, Version::new(1));
                conflicts += 1;
            },
            Err(other) => panic!("unexpected error: {other}"),
        }
    }

    assert_eq!(successes, 1);
    assert_eq!(conflicts, 1);
    assert_eq!(store.len().await, 1);
}

#[tokio::test]
async fn failed_append_leaves_no_trace_in_any_view() {
    let store = InMemoryEventStore::new();
    let id = StreamId::new("account-1");

    store
        .append_event(id.clone(), Version::INITIAL, event("A.v1"))
        .await
        .expect("append should succeed");

    let refused = store
        .append_event(id.clone(), Version::new(7), event("B.v1"))
        .await;
    assert!(refused.is_err());

    assert_eq!(store.len().await, 1);
    let stream = store.load_events(id).await.expect("load should succeed");
    assert_eq!(stream.len(), 1);
    let all = store.load_all_events().await.expect("load should succeed");
    assert_eq!(all.len(), 1);
}
