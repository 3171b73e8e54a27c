//! Event store trait and related types.
//!
//! The event store is the single source of truth: an append-only,
//! per-stream ordered log of immutable events with optimistic concurrency
//! control. It has no knowledge of event meaning; it is a pure
//! ordered-append primitive keyed by stream id.
//!
//! # Design
//!
//! The trait is deliberately minimal:
//!
//! - Append one event to a stream, guarded by an expected version
//! - Load a stream (fully or after a known version) for replay
//! - Load the global log for cross-stream projections and audit
//!
//! No event is ever removed or reordered, and enforcement of the version
//! invariant happens at append time, not at read time.
//!
//! # Implementations
//!
//! `InMemoryEventStore` (in `factstore-memory`) is the in-process
//! implementation. The trait keeps `Send` futures and owned arguments so a
//! persistent backend can slot in later with `append`/`load` as its only
//! suspension points.
//!
//! # Example
//!
//! ```no_run
//! use factstore_core::event_store::{EventStore, EventStoreError};
//! use factstore_core::stream::{StreamId, Version};
//! use factstore_core::event::SerializedEvent;
//!
//! async fn example<S: EventStore>(store: &S, event: SerializedEvent) -> Result<(), EventStoreError> {
//!     let stream_id = StreamId::new("account-1");
//!
//!     // First append to a fresh stream
//!     let v1 = store.append_event(stream_id.clone(), Version::INITIAL, event).await?;
//!     assert_eq!(v1, Version::new(1));
//!
//!     // Replay the stream
//!     let events = store.load_events(stream_id).await?;
//!     assert_eq!(events.len(), 1);
//!     Ok(())
//! }
//! ```

use crate::event::{RecordedEvent, SerializedEvent};
use crate::stream::{StreamId, Version};
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

/// Errors that can occur during event store operations.
#[derive(Error, Debug)]
pub enum EventStoreError {
    /// Optimistic concurrency conflict: the expected version does not match
    /// the stream's current version.
    ///
    /// Another writer appended between the caller's load and this append.
    /// Nothing was written; the caller may reload and retry.
    #[error("Concurrency conflict on stream {stream_id}: expected version {expected}, found {actual}")]
    ConcurrencyConflict {
        /// The stream where the conflict occurred.
        stream_id: StreamId,
        /// The version the caller expected the stream to be at.
        expected: Version,
        /// The stream's actual current version.
        actual: Version,
    },

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// I/O error. Unused by the in-memory store; reserved for persistent
    /// backends.
    #[error("I/O error: {0}")]
    IoError(String),
}

/// Append-only event log with optimistic concurrency control.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`; the store is the only shared
/// mutable resource in the system and is typically held as
/// `Arc<dyn EventStore>`.
///
/// # Atomicity
///
/// `append_event` must be atomic with respect to the compare-and-append of
/// `expected_version`: of two concurrent appends to the same stream with the
/// same expected version, exactly one succeeds and the other observes
/// [`EventStoreError::ConcurrencyConflict`].
///
/// # Dyn Compatibility
///
/// Methods return explicit `Pin<Box<dyn Future>>` instead of `async fn` so
/// the trait stays usable as a trait object.
pub trait EventStore: Send + Sync {
    /// Append one event to a stream, guarded by the expected version.
    ///
    /// Succeeds only if the stream's current version equals
    /// `expected_version` (use [`Version::INITIAL`] for a stream that must
    /// not exist yet). On success the event is stamped with version
    /// `expected_version.next()` and its global position, and the new
    /// stream version is returned.
    ///
    /// # Errors
    ///
    /// - `ConcurrencyConflict`: version mismatch, nothing appended
    /// - `IoError`: backend failure (persistent implementations only)
    fn append_event(
        &self,
        stream_id: StreamId,
        expected_version: Version,
        event: SerializedEvent,
    ) -> Pin<Box<dyn Future<Output = Result<Version, EventStoreError>> + Send + '_>>;

    /// Load all events of a stream, in version order.
    ///
    /// A stream that has never been written yields an empty vector, not an
    /// error: new streams start empty.
    ///
    /// # Errors
    ///
    /// - `IoError`: backend failure (persistent implementations only)
    fn load_events(
        &self,
        stream_id: StreamId,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<RecordedEvent>, EventStoreError>> + Send + '_>>;

    /// Load the events of a stream with version strictly greater than
    /// `after`, in version order.
    ///
    /// Intended for incremental replay and projection catch-up:
    /// `load_events_after(id, Version::INITIAL)` is equivalent to
    /// `load_events(id)`.
    ///
    /// # Errors
    ///
    /// - `IoError`: backend failure (persistent implementations only)
    fn load_events_after(
        &self,
        stream_id: StreamId,
        after: Version,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<RecordedEvent>, EventStoreError>> + Send + '_>>;

    /// Load every event across all streams, in global append order.
    ///
    /// Used by global projections and audit. Positions on the returned
    /// events are strictly increasing.
    ///
    /// # Errors
    ///
    /// - `IoError`: backend failure (persistent implementations only)
    fn load_all_events(
        &self,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<RecordedEvent>, EventStoreError>> + Send + '_>>;
}
