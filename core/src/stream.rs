//! Stream identity and versioning.
//!
//! Every aggregate instance owns exactly one event stream, identified by a
//! [`StreamId`]. Positions within a stream are tracked by [`Version`]: the
//! first event of a stream carries version 1, and versions increase strictly
//! with no gaps. [`Version::INITIAL`] (0) denotes a stream that has no
//! events yet.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error type for `StreamId` parsing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid stream ID: {0}")]
pub struct ParseStreamIdError(String);

/// Unique identifier for an event stream (one aggregate instance).
///
/// A stream id is opaque to the store and stable for the aggregate's whole
/// lifetime, e.g. `"account-7f3a"`.
///
/// # Validation
///
/// `FromStr` rejects empty input and should be used for external data.
/// `new()` and the `From` impls skip validation and are meant for
/// application-controlled ids.
///
/// # Examples
///
/// ```
/// use factstore_core::stream::StreamId;
///
/// let id = StreamId::new("account-7f3a");
/// assert_eq!(id.as_str(), "account-7f3a");
///
/// let parsed: StreamId = "account-7f3a".parse().unwrap();
/// assert_eq!(parsed, id);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StreamId(String);

impl StreamId {
    /// Create a new `StreamId` from a string.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the stream id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert the `StreamId` into its inner `String`.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for StreamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for StreamId {
    type Err = ParseStreamIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(ParseStreamIdError("Stream ID cannot be empty".to_string()));
        }
        Ok(Self(s.to_string()))
    }
}

impl From<String> for StreamId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for StreamId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for StreamId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Per-stream version number used for optimistic concurrency control.
///
/// A `Version` is either the version stamped on an event (1-based within its
/// stream) or the current version of a whole stream (the version of its last
/// event, [`Version::INITIAL`] if the stream is empty).
///
/// Appending compares the caller's expected version against the stream's
/// current version; a mismatch means another writer got there first and the
/// append is refused. This detects lost updates without holding a lock over
/// the whole read-validate-write cycle.
///
/// # Examples
///
/// ```
/// use factstore_core::stream::Version;
///
/// let empty = Version::INITIAL;
/// assert!(empty.is_initial());
/// assert_eq!(empty.next(), Version::new(1));
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Version(u64);

impl Version {
    /// The version of a stream with no events.
    pub const INITIAL: Self = Self(0);

    /// Create a new `Version` with the given value.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Get the version number.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }

    /// Get the next version (current + 1).
    ///
    /// # Overflow Behavior
    ///
    /// Plain addition. Exhausting `u64::MAX` events on a single stream is
    /// not a realistic concern.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }

    /// Check whether this is the initial version (stream has no events).
    #[must_use]
    pub const fn is_initial(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for Version {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl From<Version> for u64 {
    fn from(version: Version) -> Self {
        version.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod stream_id_tests {
        use super::*;

        #[test]
        fn new_creates_stream_id() {
            let id = StreamId::new("account-1");
            assert_eq!(id.as_str(), "account-1");
        }

        #[test]
        fn from_string_and_str() {
            assert_eq!(StreamId::from("account-1").as_str(), "account-1");
            assert_eq!(StreamId::from("account-2".to_string()).as_str(), "account-2");
        }

        #[test]
        #[allow(clippy::expect_used)] // Panics: Test will fail if parse fails
        fn parse_from_str() {
            let id: StreamId = "account-1".parse().expect("parse should succeed");
            assert_eq!(id, StreamId::new("account-1"));
        }

        #[test]
        fn parse_empty_string_fails() {
            assert!("".parse::<StreamId>().is_err());
        }

        #[test]
        fn display() {
            assert_eq!(format!("{}", StreamId::new("account-1")), "account-1");
        }

        #[test]
        fn into_inner() {
            assert_eq!(StreamId::new("account-1").into_inner(), "account-1");
        }
    }

    mod version_tests {
        use super::*;

        #[test]
        fn initial_version_means_empty_stream() {
            assert_eq!(Version::INITIAL, Version::new(0));
            assert!(Version::INITIAL.is_initial());
            assert!(!Version::new(1).is_initial());
        }

        #[test]
        fn next_version() {
            assert_eq!(Version::INITIAL.next(), Version::new(1));
            assert_eq!(Version::new(41).next(), Version::new(42));
        }

        #[test]
        fn version_ordering() {
            assert!(Version::new(1) < Version::new(2));
            assert!(Version::new(3) > Version::new(1));
        }

        #[test]
        fn version_from_u64_roundtrip() {
            let version = Version::from(42_u64);
            assert_eq!(version.value(), 42);
            let num: u64 = version.into();
            assert_eq!(num, 42);
        }

        #[test]
        fn display() {
            assert_eq!(format!("{}", Version::new(7)), "7");
        }
    }
}
