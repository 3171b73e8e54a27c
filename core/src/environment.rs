//! Injected dependencies.
//!
//! The only ambient dependency the core needs is time. The command handler
//! stamps event timestamps through the [`Clock`] trait rather than calling
//! `Utc::now()` directly, so tests can pin time and replay stays
//! deterministic.

use chrono::{DateTime, Utc};

/// Abstracts time operations for testability.
///
/// Production code uses [`SystemClock`]; tests use a fixed clock (see
/// `factstore-memory`).
pub trait Clock: Send + Sync {
    /// Get the current time.
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock [`Clock`] backed by the system time.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_clock_advances() {
        let clock = SystemClock;
        let earlier = clock.now();
        let later = clock.now();
        assert!(later >= earlier);
    }
}
