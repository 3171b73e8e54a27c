//! The in-memory event store.

use factstore_core::event::{RecordedEvent, SerializedEvent};
use factstore_core::event_store::{EventStore, EventStoreError};
use factstore_core::stream::{StreamId, Version};
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use tokio::sync::RwLock;

/// The log proper: global append order plus a per-stream index into it.
#[derive(Debug, Default)]
struct Log {
    /// Every recorded event, in global append order. `position` on each
    /// event equals its index here.
    events: Vec<RecordedEvent>,
    /// Indices into `events`, per stream, in version order.
    streams: HashMap<StreamId, Vec<usize>>,
    /// Position the next appended event will receive.
    next_position: u64,
}

impl Log {
    /// Current version of a stream: the version of its last event,
    /// `Version::INITIAL` if it has none.
    fn stream_version(&self, stream_id: &StreamId) -> Version {
        self.streams
            .get(stream_id)
            .and_then(|indices| indices.last())
            .map_or(Version::INITIAL, |&index| self.events[index].version)
    }
}

/// Append-only in-memory event log with optimistic concurrency control.
///
/// All state lives behind a single `RwLock`; the write lock is the one
/// synchronization point the compare-and-append needs. Loads take the read
/// lock and copy events out, so replay and projection folds never hold the
/// lock.
///
/// Cloning is cheap and every clone shares the same log.
#[derive(Clone, Debug, Default)]
pub struct InMemoryEventStore {
    log: Arc<RwLock<Log>>,
}

impl InMemoryEventStore {
    /// Create a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of events across all streams.
    ///
    /// Useful for assertions in tests.
    pub async fn len(&self) -> usize {
        self.log.read().await.events.len()
    }

    /// Whether the store holds no events at all.
    pub async fn is_empty(&self) -> bool {
        self.log.read().await.events.is_empty()
    }

    /// Current version of a stream (`Version::INITIAL` for an unknown
    /// stream).
    pub async fn stream_version(&self, stream_id: &StreamId) -> Version {
        self.log.read().await.stream_version(stream_id)
    }
}

impl EventStore for InMemoryEventStore {
    fn append_event(
        &self,
        stream_id: StreamId,
        expected_version: Version,
        event: SerializedEvent,
    ) -> Pin<Box<dyn Future<Output = Result<Version, EventStoreError>> + Send + '_>> {
        Box::pin(async move {
            let mut log = self.log.write().await;

            let actual = log.stream_version(&stream_id);
            if actual != expected_version {
                tracing::warn!(
                    stream = %stream_id,
                    expected = %expected_version,
                    %actual,
                    "append refused: concurrency conflict"
                );
                return Err(EventStoreError::ConcurrencyConflict {
                    stream_id,
                    expected: expected_version,
                    actual,
                });
            }

            let version = expected_version.next();
            let position = log.next_position;
            let recorded = RecordedEvent {
                stream_id: stream_id.clone(),
                version,
                position,
                event_type: event.event_type,
                data: event.data,
                timestamp: event.timestamp,
                metadata: event.metadata,
            };

            tracing::debug!(
                stream = %stream_id,
                %version,
                position,
                event_type = %recorded.event_type,
                "event appended"
            );

            let index = log.events.len();
            log.events.push(recorded);
            log.streams.entry(stream_id).or_default().push(index);
            log.next_position = position + 1;

            Ok(version)
        })
    }

    fn load_events(
        &self,
        stream_id: StreamId,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<RecordedEvent>, EventStoreError>> + Send + '_>>
    {
        Box::pin(async move {
            let log = self.log.read().await;
            let events = log
                .streams
                .get(&stream_id)
                .map(|indices| indices.iter().map(|&index| log.events[index].clone()).collect())
                .unwrap_or_default();
            Ok(events)
        })
    }

    fn load_events_after(
        &self,
        stream_id: StreamId,
        after: Version,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<RecordedEvent>, EventStoreError>> + Send + '_>>
    {
        Box::pin(async move {
            let log = self.log.read().await;
            let events = log
                .streams
                .get(&stream_id)
                .map(|indices| {
                    indices
                        .iter()
                        .map(|&index| &log.events[index])
                        .filter(|event| event.version > after)
                        .cloned()
                        .collect()
                })
                .unwrap_or_default();
            Ok(events)
        })
    }

    fn load_all_events(
        &self,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<RecordedEvent>, EventStoreError>> + Send + '_>>
    {
        Box::pin(async move { Ok(self.log.read().await.events.clone()) })
    }
}
