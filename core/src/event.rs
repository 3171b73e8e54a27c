//! Event trait and envelope types.
//!
//! Events are immutable facts: once appended to a stream they are never
//! updated or deleted (a correction is a new compensating event, never a
//! rewrite of history). This module defines the [`Event`] trait for domain
//! payloads, the [`SerializedEvent`] handed to the store for appending, and
//! the [`RecordedEvent`] envelope the store hands back.
//!
//! # Encoding
//!
//! Payloads are encoded with `bincode`: compact, fast, and lossless for the
//! closed set of event kinds a domain declares. The envelope keeps the
//! `event_type` string alongside the bytes so a persistent backend could
//! route payloads to the right deserializer.
//!
//! # Example
//!
//! ```
//! use factstore_core::event::Event;
//! use serde::{Serialize, Deserialize};
//!
//! #[derive(Clone, Debug, Serialize, Deserialize)]
//! enum AccountEvent {
//!     AccountOpened { owner: String },
//!     AccountClosed,
//! }
//!
//! impl Event for AccountEvent {
//!     fn event_type(&self) -> &'static str {
//!         match self {
//!             AccountEvent::AccountOpened { .. } => "AccountOpened.v1",
//!             AccountEvent::AccountClosed => "AccountClosed.v1",
//!         }
//!     }
//! }
//! ```

use crate::stream::{StreamId, Version};
use chrono::{DateTime, Utc};
use serde::{Serialize, de::DeserializeOwned};
use std::fmt;
use thiserror::Error;

/// Error types for event encoding and decoding.
#[derive(Error, Debug)]
pub enum EventError {
    /// Failed to serialize an event payload to bytes.
    #[error("Failed to serialize event: {0}")]
    SerializationError(String),

    /// Failed to deserialize an event payload from bytes.
    #[error("Failed to deserialize event: {0}")]
    DeserializationError(String),

    /// Unknown event type encountered during deserialization.
    #[error("Unknown event type: {0}")]
    UnknownEventType(String),
}

/// A domain event: an immutable record of a state change that has already
/// happened.
///
/// # Event Naming Convention
///
/// `event_type()` returns a stable identifier with a version suffix so event
/// schemas can evolve over time:
///
/// - `"AccountOpened.v1"`
/// - `"MoneyDeposited.v1"`
///
/// # Thread Safety
///
/// Events must be `Send + Sync + 'static` so they can cross task boundaries
/// and live inside the event store.
pub trait Event: Send + Sync + 'static {
    /// Returns the stable event type identifier for this event.
    fn event_type(&self) -> &'static str;

    /// Serialize this event's payload to bincode bytes.
    ///
    /// # Errors
    ///
    /// Returns `EventError::SerializationError` if the payload cannot be
    /// serialized, which is rare with bincode.
    fn to_bytes(&self) -> Result<Vec<u8>, EventError>
    where
        Self: Serialize,
    {
        bincode::serialize(self).map_err(|e| EventError::SerializationError(e.to_string()))
    }

    /// Deserialize an event payload from bincode bytes.
    ///
    /// # Errors
    ///
    /// Returns `EventError::DeserializationError` if the bytes are corrupted
    /// or belong to a different event type.
    fn from_bytes(bytes: &[u8]) -> Result<Self, EventError>
    where
        Self: DeserializeOwned + Sized,
    {
        bincode::deserialize(bytes).map_err(|e| EventError::DeserializationError(e.to_string()))
    }
}

/// An event ready to be appended, before the store has stamped its place in
/// the log.
///
/// The command handler creates this at validation time, capturing the
/// payload bytes and a wall-clock timestamp. The timestamp is informational:
/// it is not guaranteed to be monotonic and never participates in ordering
/// (versions do that).
#[derive(Clone, Debug)]
pub struct SerializedEvent {
    /// The event type identifier (e.g. `"AccountOpened.v1"`).
    pub event_type: String,

    /// The bincode-serialized payload.
    pub data: Vec<u8>,

    /// Wall-clock creation time.
    pub timestamp: DateTime<Utc>,

    /// Optional metadata (correlation ids, the acting user, and so on).
    pub metadata: Option<serde_json::Value>,
}

impl SerializedEvent {
    /// Create a new serialized event from raw parts.
    #[must_use]
    pub const fn new(
        event_type: String,
        data: Vec<u8>,
        timestamp: DateTime<Utc>,
        metadata: Option<serde_json::Value>,
    ) -> Self {
        Self {
            event_type,
            data,
            timestamp,
            metadata,
        }
    }

    /// Serialize a typed event into an appendable envelope.
    ///
    /// # Errors
    ///
    /// Returns `EventError::SerializationError` if the payload cannot be
    /// serialized.
    ///
    /// # Examples
    ///
    /// ```
    /// use factstore_core::event::{Event, SerializedEvent};
    /// use chrono::Utc;
    /// # use serde::{Serialize, Deserialize};
    /// # #[derive(Clone, Debug, Serialize, Deserialize)]
    /// # enum AccountEvent { AccountClosed }
    /// # impl Event for AccountEvent {
    /// #     fn event_type(&self) -> &'static str { "AccountClosed.v1" }
    /// # }
    ///
    /// let event = AccountEvent::AccountClosed;
    /// let serialized = SerializedEvent::from_event(&event, Utc::now(), None).unwrap();
    /// assert_eq!(serialized.event_type, "AccountClosed.v1");
    /// ```
    pub fn from_event<E: Event + Serialize>(
        event: &E,
        timestamp: DateTime<Utc>,
        metadata: Option<serde_json::Value>,
    ) -> Result<Self, EventError> {
        Ok(Self {
            event_type: event.event_type().to_string(),
            data: event.to_bytes()?,
            timestamp,
            metadata,
        })
    }
}

impl fmt::Display for SerializedEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SerializedEvent {{ type: {}, size: {} bytes }}",
            self.event_type,
            self.data.len()
        )
    }
}

/// An event as recorded in the store.
///
/// On top of the serialized payload this carries where the event sits in the
/// log: the owning stream, the 1-based per-stream `version` stamped at append
/// time, and the 0-based global `position` in append order across all
/// streams. Recorded events are immutable; no field changes after the append
/// that created them.
#[derive(Clone, Debug)]
pub struct RecordedEvent {
    /// The stream this event belongs to.
    pub stream_id: StreamId,

    /// 1-based sequence number within the stream. Strictly increasing, no
    /// gaps.
    pub version: Version,

    /// 0-based position in the global append order, used by cross-stream
    /// projections as a checkpoint key.
    pub position: u64,

    /// The event type identifier.
    pub event_type: String,

    /// The bincode-serialized payload.
    pub data: Vec<u8>,

    /// Wall-clock creation time (informational only).
    pub timestamp: DateTime<Utc>,

    /// Optional metadata carried through from the append.
    pub metadata: Option<serde_json::Value>,
}

impl RecordedEvent {
    /// Decode the payload back into its typed event.
    ///
    /// # Errors
    ///
    /// Returns `EventError::DeserializationError` if the bytes do not decode
    /// as `E`, which indicates the caller picked the wrong domain type for
    /// this stream.
    pub fn decode<E: Event + DeserializeOwned>(&self) -> Result<E, EventError> {
        E::from_bytes(&self.data)
    }
}

impl fmt::Display for RecordedEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "RecordedEvent {{ stream: {}, version: {}, type: {} }}",
            self.stream_id, self.version, self.event_type
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
    enum TestEvent {
        Created { id: String, value: i32 },
        Updated { id: String, new_value: i32 },
    }

    impl Event for TestEvent {
        fn event_type(&self) -> &'static str {
            match self {
                TestEvent::Created { .. } => "TestEvent.Created.v1",
                TestEvent::Updated { .. } => "TestEvent.Updated.v1",
            }
        }
    }

    #[test]
    fn event_type_returns_correct_identifier() {
        let event = TestEvent::Created {
            id: "test-1".to_string(),
            value: 42,
        };
        assert_eq!(event.event_type(), "TestEvent.Created.v1");
    }

    #[test]
    #[allow(clippy::expect_used)] // Panics: Test will fail if serialization fails
    fn payload_roundtrip() {
        let event = TestEvent::Created {
            id: "test-1".to_string(),
            value: 42,
        };

        let bytes = event.to_bytes().expect("serialization should succeed");
        let decoded = TestEvent::from_bytes(&bytes).expect("deserialization should succeed");

        assert_eq!(event, decoded);
    }

    #[test]
    #[allow(clippy::expect_used)] // Panics: Test will fail if serialization fails
    fn serialized_event_from_event() {
        let event = TestEvent::Updated {
            id: "test-1".to_string(),
            new_value: 100,
        };
        let metadata = serde_json::json!({ "correlation_id": "corr-456" });

        let serialized = SerializedEvent::from_event(&event, Utc::now(), Some(metadata.clone()))
            .expect("serialization should succeed");

        assert_eq!(serialized.event_type, "TestEvent.Updated.v1");
        assert!(!serialized.data.is_empty());
        assert_eq!(serialized.metadata, Some(metadata));
    }

    #[test]
    #[allow(clippy::expect_used)] // Panics: Test will fail if serialization fails
    fn recorded_event_decodes_back_to_payload() {
        let event = TestEvent::Created {
            id: "test-1".to_string(),
            value: 7,
        };
        let serialized = SerializedEvent::from_event(&event, Utc::now(), None)
            .expect("serialization should succeed");

        let recorded = RecordedEvent {
            stream_id: StreamId::new("test-1"),
            version: Version::new(1),
            position: 0,
            event_type: serialized.event_type,
            data: serialized.data,
            timestamp: serialized.timestamp,
            metadata: serialized.metadata,
        };

        let decoded: TestEvent = recorded.decode().expect("decode should succeed");
        assert_eq!(decoded, event);
    }

    #[test]
    fn serialized_event_display() {
        let serialized = SerializedEvent::new(
            "TestEvent.v1".to_string(),
            vec![1, 2, 3, 4, 5],
            Utc::now(),
            None,
        );

        let display = format!("{serialized}");
        assert!(display.contains("TestEvent.v1"));
        assert!(display.contains("5 bytes"));
    }
}
