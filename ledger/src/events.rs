//! The closed set of account events.

use crate::types::Money;
use factstore_core::event::Event;
use serde::{Deserialize, Serialize};

/// Everything that can happen to a bank account.
///
/// One variant per fact; the enum is the closed set the aggregate and the
/// projections fold exhaustively. Adding a variant forces every fold to
/// handle it at compile time.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum AccountEvent {
    /// The account was opened with an owner and an initial balance.
    AccountOpened {
        /// Account holder name.
        owner: String,
        /// Opening balance (validated non-negative).
        initial_balance: Money,
    },

    /// Money was deposited.
    MoneyDeposited {
        /// Deposited amount (validated strictly positive).
        amount: Money,
    },

    /// Money was withdrawn.
    MoneyWithdrawn {
        /// Withdrawn amount (validated strictly positive and covered).
        amount: Money,
    },

    /// The account was closed.
    ///
    /// The final balance is informational: closing does not zero the
    /// aggregate's balance, it only flips the closed flag.
    AccountClosed {
        /// Balance at the time of closing.
        final_balance: Money,
    },
}

impl Event for AccountEvent {
    fn event_type(&self) -> &'static str {
        match self {
            AccountEvent::AccountOpened { .. } => "AccountOpened.v1",
            AccountEvent::MoneyDeposited { .. } => "MoneyDeposited.v1",
            AccountEvent::MoneyWithdrawn { .. } => "MoneyWithdrawn.v1",
            AccountEvent::AccountClosed { .. } => "AccountClosed.v1",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_types_are_versioned() {
        let event = AccountEvent::AccountOpened {
            owner: "Alice Johnson".to_string(),
            initial_balance: Money::from_dollars(10),
        };
        assert_eq!(event.event_type(), "AccountOpened.v1");

        let event = AccountEvent::AccountClosed {
            final_balance: Money::ZERO,
        };
        assert_eq!(event.event_type(), "AccountClosed.v1");
    }

    #[test]
    #[allow(clippy::expect_used)] // Panics: Test will fail if serialization fails
    fn payload_roundtrip() {
        let event = AccountEvent::MoneyDeposited {
            amount: Money::from_cents(250),
        };
        let bytes = event.to_bytes().expect("serialization should succeed");
        let decoded = AccountEvent::from_bytes(&bytes).expect("deserialization should succeed");
        assert_eq!(decoded, event);
    }
}
