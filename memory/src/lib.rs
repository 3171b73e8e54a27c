//! # Factstore Memory
//!
//! In-memory implementation of the factstore [`EventStore`] plus a
//! deterministic [`FixedClock`] for tests.
//!
//! [`InMemoryEventStore`] keeps the whole log in process memory behind one
//! `tokio::sync::RwLock`. Holding the write lock across the
//! compare-and-append makes the version check atomic: two concurrent
//! appends racing on the same expected version cannot both win. The store
//! is cheap to clone (`Arc` inside) and deterministic, which also makes it
//! the event store of choice in tests.
//!
//! ## Example
//!
//! ```
//! use factstore_memory::InMemoryEventStore;
//! use factstore_core::event::SerializedEvent;
//! use factstore_core::event_store::EventStore;
//! use factstore_core::stream::{StreamId, Version};
//! use chrono::Utc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = InMemoryEventStore::new();
//! let event = SerializedEvent::new("Opened.v1".to_string(), vec![1, 2, 3], Utc::now(), None);
//!
//! let version = store
//!     .append_event(StreamId::new("account-1"), Version::INITIAL, event)
//!     .await?;
//! assert_eq!(version, Version::new(1));
//! # Ok(())
//! # }
//! ```

mod clock;
mod store;

pub use clock::{FixedClock, test_clock};
pub use store::InMemoryEventStore;

// Re-exported so store consumers don't need a direct factstore-core
// dependency for the common types.
pub use factstore_core::event_store::EventStore;
