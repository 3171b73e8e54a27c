//! Account read models.
//!
//! Both summaries here are derived views: they can be thrown away and
//! rebuilt from the log at any time, and they are never consulted during
//! command validation.

use crate::events::AccountEvent;
use crate::types::Money;
use factstore_core::event::{EventError, RecordedEvent};
use factstore_core::projection::Projection;
use factstore_core::stream::StreamId;
use std::collections::HashMap;

/// Denormalized summary of one account.
///
/// Carries the running totals validation never needs: lifetime deposits
/// (the opening balance counts as the first deposit), lifetime withdrawals,
/// and the number of recorded transactions.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AccountSummary {
    /// The account's stream id, set by the first folded event.
    pub account_id: Option<StreamId>,
    /// Account holder name.
    pub owner: String,
    /// Current balance.
    pub balance: Money,
    /// Lifetime deposits, including the opening balance.
    pub total_deposits: Money,
    /// Lifetime withdrawals.
    pub total_withdrawals: Money,
    /// Number of events folded into this summary.
    pub transaction_count: u64,
    /// Whether the account has been closed.
    pub closed: bool,
}

impl Projection for AccountSummary {
    type Event = AccountEvent;

    fn project(&mut self, recorded: &RecordedEvent, event: &AccountEvent) {
        if self.account_id.is_none() {
            self.account_id = Some(recorded.stream_id.clone());
        }

        match event {
            AccountEvent::AccountOpened {
                owner,
                initial_balance,
            } => {
                self.owner = owner.clone();
                self.balance = *initial_balance;
                self.total_deposits = *initial_balance;
            },
            AccountEvent::MoneyDeposited { amount } => {
                self.balance = self.balance.saturating_add(*amount);
                self.total_deposits = self.total_deposits.saturating_add(*amount);
            },
            AccountEvent::MoneyWithdrawn { amount } => {
                self.balance = self.balance.saturating_sub(*amount);
                self.total_withdrawals = self.total_withdrawals.saturating_add(*amount);
            },
            AccountEvent::AccountClosed { .. } => {
                self.closed = true;
            },
        }
        self.transaction_count += 1;
    }
}

/// Cross-account read model over the whole ledger.
///
/// Keyed by stream id with a global-position checkpoint, so it can be fed
/// either a full [`load_all_events`](factstore_core::event_store::EventStore::load_all_events)
/// sweep or incremental tails: events at or below the checkpoint are
/// silently skipped, which makes absorption idempotent — any interleaving
/// of full and incremental feeds converges to the same value as one full
/// rebuild.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LedgerSummaries {
    accounts: HashMap<StreamId, AccountSummary>,
    /// Global position of the last absorbed event.
    checkpoint: Option<u64>,
}

impl LedgerSummaries {
    /// Create an empty ledger view.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold a batch of recorded events into the view, skipping any the
    /// checkpoint has already seen.
    ///
    /// # Errors
    ///
    /// Returns `EventError::DeserializationError` if a payload does not
    /// decode as an [`AccountEvent`].
    pub fn absorb(&mut self, events: &[RecordedEvent]) -> Result<(), EventError> {
        for recorded in events {
            if self.checkpoint.is_some_and(|seen| recorded.position <= seen) {
                continue;
            }
            let event: AccountEvent = recorded.decode()?;
            self.accounts
                .entry(recorded.stream_id.clone())
                .or_default()
                .project(recorded, &event);
            self.checkpoint = Some(recorded.position);
        }
        Ok(())
    }

    /// Rebuild the whole view from scratch.
    ///
    /// # Errors
    ///
    /// Returns `EventError::DeserializationError` if a payload does not
    /// decode as an [`AccountEvent`].
    pub fn rebuild(events: &[RecordedEvent]) -> Result<Self, EventError> {
        let mut summaries = Self::new();
        summaries.absorb(events)?;
        Ok(summaries)
    }

    /// Summary for one account, if any of its events have been absorbed.
    #[must_use]
    pub fn get(&self, account_id: &StreamId) -> Option<&AccountSummary> {
        self.accounts.get(account_id)
    }

    /// Number of accounts in the view.
    #[must_use]
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    /// Whether the view has absorbed no accounts yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Iterate over all account summaries.
    pub fn iter(&self) -> impl Iterator<Item = (&StreamId, &AccountSummary)> {
        self.accounts.iter()
    }

    /// Global position of the last absorbed event, if any.
    #[must_use]
    pub const fn checkpoint(&self) -> Option<u64> {
        self.checkpoint
    }
}
