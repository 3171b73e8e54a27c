//! Projections: rebuildable read models folded from the event log.
//!
//! Projections are the query side of CQRS. They fold the same event stream
//! the aggregates replay, but accumulate derived fields that validation
//! never needs (running totals, transaction counts). A projection has no
//! identity of its own beyond what folding produces: it may be discarded
//! and rebuilt from the log at any time without losing information, because
//! the log is authoritative.
//!
//! Projections never feed back into command validation — they are pure
//! consumers of the stream.

use crate::event::{EventError, RecordedEvent};
use serde::de::DeserializeOwned;

use crate::event::Event;

/// A read model folded from recorded events.
///
/// `project` receives both the envelope (for stream id, version, position)
/// and the decoded payload. Like [`Aggregate::apply`](crate::aggregate::Aggregate::apply)
/// it must be deterministic and exhaustive over the event enum.
///
/// A projection fed incrementally (e.g. from
/// [`EventStore::load_events_after`](crate::event_store::EventStore::load_events_after)
/// or repeated `load_all_events` sweeps) must converge to the same value as
/// a full rebuild; implementations that can see an event twice are expected
/// to filter duplicates by envelope position.
pub trait Projection: Default {
    /// The event type this projection folds.
    type Event: Event + DeserializeOwned;

    /// Fold one decoded event into the read model.
    fn project(&mut self, recorded: &RecordedEvent, event: &Self::Event);

    /// Decode a recorded event and fold it in.
    ///
    /// # Errors
    ///
    /// Returns `EventError::DeserializationError` if the payload does not
    /// decode as `Self::Event`.
    fn apply_recorded(&mut self, recorded: &RecordedEvent) -> Result<(), EventError> {
        let event: Self::Event = recorded.decode()?;
        self.project(recorded, &event);
        Ok(())
    }

    /// Rebuild the read model from scratch by folding `events` in order.
    ///
    /// # Errors
    ///
    /// Returns `EventError::DeserializationError` if any payload does not
    /// decode as `Self::Event`.
    fn rebuild(events: &[RecordedEvent]) -> Result<Self, EventError> {
        let mut projection = Self::default();
        for recorded in events {
            projection.apply_recorded(recorded)?;
        }
        Ok(projection)
    }
}
