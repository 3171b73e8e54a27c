//! The bank-account aggregate.

use crate::events::AccountEvent;
use crate::types::Money;
use factstore_core::aggregate::Aggregate;

/// Current state of one account, derived purely by folding its events.
///
/// The zero value (`Default`) represents a non-existent account: empty
/// owner, zero balance, not closed. Whether the account exists at all is a
/// property of the stream (any events yet?), which the command handler
/// reads off [`Replayed::version`](factstore_core::aggregate::Replayed).
///
/// Lifecycle: NonExistent → Open → Closed. Closed is terminal; deposits and
/// withdrawals are only legal while open. The fold itself does not enforce
/// those rules — validation does, before an event is appended — the fold
/// only records facts.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BankAccount {
    /// Account holder name, set by the opening event.
    pub owner: String,
    /// Current balance.
    pub balance: Money,
    /// Whether the account has been closed.
    pub closed: bool,
}

impl Aggregate for BankAccount {
    type Event = AccountEvent;

    fn apply(&mut self, event: &AccountEvent) {
        match event {
            AccountEvent::AccountOpened {
                owner,
                initial_balance,
            } => {
                self.owner = owner.clone();
                self.balance = *initial_balance;
                self.closed = false;
            },
            AccountEvent::MoneyDeposited { amount } => {
                self.balance = self.balance.saturating_add(*amount);
            },
            AccountEvent::MoneyWithdrawn { amount } => {
                self.balance = self.balance.saturating_sub(*amount);
            },
            AccountEvent::AccountClosed { .. } => {
                // Balance is left as-is; closed is an independent flag.
                self.closed = true;
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fold(events: &[AccountEvent]) -> BankAccount {
        let mut account = BankAccount::default();
        for event in events {
            account.apply(event);
        }
        account
    }

    #[test]
    fn zero_value_is_nonexistent_account() {
        let account = BankAccount::default();
        assert!(account.owner.is_empty());
        assert_eq!(account.balance, Money::ZERO);
        assert!(!account.closed);
    }

    #[test]
    fn open_then_deposit_then_withdraw() {
        let account = fold(&[
            AccountEvent::AccountOpened {
                owner: "Alice Johnson".to_string(),
                initial_balance: Money::from_dollars(10),
            },
            AccountEvent::MoneyDeposited {
                amount: Money::from_cents(250),
            },
            AccountEvent::MoneyWithdrawn {
                amount: Money::from_cents(500),
            },
        ]);

        assert_eq!(account.owner, "Alice Johnson");
        assert_eq!(account.balance, Money::from_cents(750));
        assert!(!account.closed);
    }

    #[test]
    fn closing_flips_flag_without_zeroing_balance() {
        let account = fold(&[
            AccountEvent::AccountOpened {
                owner: "Bob Smith".to_string(),
                initial_balance: Money::from_dollars(5),
            },
            AccountEvent::AccountClosed {
                final_balance: Money::from_dollars(5),
            },
        ]);

        assert!(account.closed);
        assert_eq!(account.balance, Money::from_dollars(5));
    }

    #[test]
    fn fold_is_deterministic() {
        let events = [
            AccountEvent::AccountOpened {
                owner: "Alice Johnson".to_string(),
                initial_balance: Money::from_dollars(10),
            },
            AccountEvent::MoneyDeposited {
                amount: Money::from_cents(123),
            },
        ];
        assert_eq!(fold(&events), fold(&events));
    }
}
