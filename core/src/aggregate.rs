//! Aggregate state and replay.
//!
//! An aggregate is the current state of one domain entity, derived by
//! folding its event stream from a canonical zero value. The state is
//! ephemeral: every command handling cycle re-derives it from the log, and
//! there is no cached "live" aggregate that commands mutate directly.

use crate::event::{Event, EventError, RecordedEvent};
use crate::stream::Version;
use serde::{Serialize, de::DeserializeOwned};

/// Domain state that can be rebuilt by folding events.
///
/// `Default` supplies the canonical zero value (unset owner, zero balance,
/// not closed — domain-dependent). `apply` folds one event into the state
/// and must be a pure, deterministic function of state and event: no I/O,
/// no randomness, no clock reads. Re-folding the same event prefix must
/// always yield the same state.
///
/// `apply` takes every variant of the domain's event enum; the exhaustive
/// `match` the compiler demands is what guarantees no event kind is ever
/// silently skipped during replay.
///
/// # Example
///
/// ```
/// use factstore_core::aggregate::Aggregate;
/// use factstore_core::event::Event;
/// use serde::{Serialize, Deserialize};
///
/// #[derive(Clone, Debug, Serialize, Deserialize)]
/// enum CounterEvent {
///     Incremented { by: u64 },
/// }
///
/// impl Event for CounterEvent {
///     fn event_type(&self) -> &'static str { "Incremented.v1" }
/// }
///
/// #[derive(Debug, Default, PartialEq)]
/// struct Counter {
///     value: u64,
/// }
///
/// impl Aggregate for Counter {
///     type Event = CounterEvent;
///
///     fn apply(&mut self, event: &CounterEvent) {
///         match event {
///             CounterEvent::Incremented { by } => self.value += by,
///         }
///     }
/// }
/// ```
pub trait Aggregate: Default {
    /// The closed set of event kinds this aggregate folds.
    type Event: Event + Serialize + DeserializeOwned;

    /// Fold one event into the state.
    fn apply(&mut self, event: &Self::Event);
}

/// An aggregate rebuilt from its event stream, together with the version of
/// the last event folded into it.
///
/// The version is [`Version::INITIAL`] for an empty stream and otherwise
/// equals the stored version of the last replayed event. Command handlers
/// pass it back to the store as the expected version, which is what turns a
/// stale read into a detectable conflict instead of a lost update.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Replayed<A: Aggregate> {
    /// The reconstructed domain state.
    pub state: A,

    /// Version of the last folded event (`Version::INITIAL` if none).
    pub version: Version,
}

impl<A: Aggregate> Replayed<A> {
    /// Rebuild state by folding the zero value through `events` in order.
    ///
    /// This is the only sanctioned way to obtain current state. Replay is
    /// deterministic: the same slice always yields the same result.
    ///
    /// # Errors
    ///
    /// Returns `EventError::DeserializationError` if a payload does not
    /// decode as `A::Event` — the stream belongs to a different domain or
    /// the stored bytes are corrupt.
    pub fn replay(events: &[RecordedEvent]) -> Result<Self, EventError> {
        let mut state = A::default();
        let mut version = Version::INITIAL;

        for recorded in events {
            let event: A::Event = recorded.decode()?;
            state.apply(&event);
            version = recorded.version;
        }

        Ok(Self { state, version })
    }

    /// Whether the stream had no events (the aggregate does not exist yet).
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.version.is_initial()
    }
}

impl<A: Aggregate> Default for Replayed<A> {
    fn default() -> Self {
        Self {
            state: A::default(),
            version: Version::INITIAL,
        }
    }
}
