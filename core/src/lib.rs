//! # Factstore Core
//!
//! Core traits and types for an event-sourced aggregate store.
//!
//! The write side is a cycle: a command is validated against state replayed
//! from the log, and on success exactly one new event is appended. The read
//! side folds the same log into rebuildable projections.
//!
//! ## Core Concepts
//!
//! - **Event**: immutable fact describing a state transition for one
//!   aggregate instance ([`event`])
//! - **Event store**: append-only, per-stream ordered log with optimistic
//!   concurrency control; the single source of truth ([`event_store`])
//! - **Aggregate**: ephemeral state derived by folding a stream in order
//!   ([`aggregate`])
//! - **Projection**: denormalized read model folded from the same log,
//!   rebuildable at any time ([`projection`])
//!
//! ## Data Flow
//!
//! ```text
//! Command ──▶ load stream ──▶ replay ──▶ validate ──▶ append(expected_version)
//!                                                          │
//!             projections ◀── load_all / load_after ◀──────┘
//! ```
//!
//! Rejected commands leave the log untouched; a lost append race surfaces
//! as a typed conflict the caller may retry.
//!
//! Domain crates (e.g. `factstore-ledger`) supply the event enum, the
//! aggregate fold, and the command validation rules on top of these
//! abstractions.

// Re-export commonly used types
pub use chrono::{DateTime, Utc};
pub use serde::{Deserialize, Serialize};

pub mod aggregate;
pub mod environment;
pub mod event;
pub mod event_store;
pub mod projection;
pub mod stream;

pub use aggregate::{Aggregate, Replayed};
pub use environment::{Clock, SystemClock};
pub use event::{Event, EventError, RecordedEvent, SerializedEvent};
pub use event_store::{EventStore, EventStoreError};
pub use projection::Projection;
pub use stream::{StreamId, Version};
