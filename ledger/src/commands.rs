//! Commands and the command handler.
//!
//! A command is an intent, not a fact: it is never stored, and a rejected
//! command leaves the log untouched. Every command kind goes through the
//! same cycle — load the stream, replay it, validate against the replayed
//! state, append exactly one new event guarded by the replayed version.

use crate::account::BankAccount;
use crate::events::AccountEvent;
use crate::types::Money;
use factstore_core::aggregate::Replayed;
use factstore_core::environment::Clock;
use factstore_core::event::{Event, EventError, SerializedEvent};
use factstore_core::event_store::{EventStore, EventStoreError};
use factstore_core::stream::{StreamId, Version};
use std::sync::Arc;
use thiserror::Error;

/// A request to change an account. May be accepted or rejected.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AccountCommand {
    /// Open a new account.
    Open {
        /// Target account id; must not have any events yet.
        account_id: StreamId,
        /// Account holder name.
        owner: String,
        /// Opening balance; must not be negative.
        initial_balance: Money,
    },

    /// Deposit money into an open account.
    Deposit {
        /// Target account id.
        account_id: StreamId,
        /// Amount; must be strictly positive.
        amount: Money,
    },

    /// Withdraw money from an open account.
    Withdraw {
        /// Target account id.
        account_id: StreamId,
        /// Amount; must be strictly positive and covered by the balance.
        amount: Money,
    },

    /// Close an open account.
    Close {
        /// Target account id.
        account_id: StreamId,
    },
}

impl AccountCommand {
    /// The account this command targets.
    #[must_use]
    pub const fn account_id(&self) -> &StreamId {
        match self {
            AccountCommand::Open { account_id, .. }
            | AccountCommand::Deposit { account_id, .. }
            | AccountCommand::Withdraw { account_id, .. }
            | AccountCommand::Close { account_id } => account_id,
        }
    }
}

/// Why a command was rejected.
///
/// Every variant is a recoverable, caller-facing condition; nothing here
/// aborts the process and no failure path leaves a partial write behind.
#[derive(Error, Debug)]
pub enum CommandError {
    /// The command targets an account that has never been opened.
    #[error("Account {0} not found")]
    NotFound(StreamId),

    /// `Open` targets an account that already has events.
    #[error("Account {0} already exists")]
    AlreadyExists(StreamId),

    /// The amount is zero, negative, or would overflow the balance.
    #[error("Invalid amount: {0}")]
    InvalidAmount(Money),

    /// Withdrawal exceeds the current balance.
    #[error("Insufficient funds: balance {balance} < requested {requested}")]
    InsufficientFunds {
        /// Balance at validation time.
        balance: Money,
        /// Requested withdrawal amount.
        requested: Money,
    },

    /// Operation attempted on a closed account.
    #[error("Account {0} is closed")]
    Closed(StreamId),

    /// Another writer appended between replay and append. The whole cycle
    /// may be retried by the caller; the handler never retries itself.
    #[error("Concurrent update on account {stream_id}: expected version {expected}, found {actual}")]
    Conflict {
        /// The contested account stream.
        stream_id: StreamId,
        /// The version this handler replayed.
        expected: Version,
        /// The version the store actually held.
        actual: Version,
    },

    /// Event store failure other than a version conflict.
    #[error("Event store error: {0}")]
    Store(#[source] EventStoreError),

    /// A stored payload failed to decode during replay.
    #[error("Event codec error: {0}")]
    Codec(#[from] EventError),
}

/// Validates commands against replayed state and appends the resulting
/// events.
///
/// Owns nothing but handles to its dependencies: the event store is the
/// single source of truth and the clock stamps event timestamps. There is
/// no cached aggregate anywhere — every `handle` call re-derives state from
/// the log.
#[derive(Clone)]
pub struct CommandHandler {
    store: Arc<dyn EventStore>,
    clock: Arc<dyn Clock>,
}

impl CommandHandler {
    /// Create a handler over the given store and clock.
    #[must_use]
    pub fn new(store: Arc<dyn EventStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// Handle one command: load, replay, validate, append.
    ///
    /// On success returns the account's new stream version. On rejection
    /// the log is untouched. A lost append race surfaces as
    /// [`CommandError::Conflict`]; retry policy belongs to the caller.
    ///
    /// # Errors
    ///
    /// Any [`CommandError`]; see the per-variant documentation.
    #[tracing::instrument(skip_all, fields(account = %command.account_id()))]
    pub async fn handle(&self, command: AccountCommand) -> Result<Version, CommandError> {
        let account_id = command.account_id().clone();

        let events = self
            .store
            .load_events(account_id.clone())
            .await
            .map_err(CommandError::Store)?;
        let current: Replayed<BankAccount> = Replayed::replay(&events)?;

        let event = Self::decide(&current, &command)?;

        tracing::debug!(
            event_type = %event.event_type(),
            expected_version = %current.version,
            "command accepted"
        );

        let serialized = SerializedEvent::from_event(&event, self.clock.now(), None)?;
        match self
            .store
            .append_event(account_id, current.version, serialized)
            .await
        {
            Ok(version) => Ok(version),
            Err(EventStoreError::ConcurrencyConflict {
                stream_id,
                expected,
                actual,
            }) => Err(CommandError::Conflict {
                stream_id,
                expected,
                actual,
            }),
            Err(other) => Err(CommandError::Store(other)),
        }
    }

    /// Replay an account's current state on demand.
    ///
    /// This is the read the write path itself uses; presentation layers
    /// wanting denormalized data should prefer the projections.
    ///
    /// # Errors
    ///
    /// [`CommandError::Store`] on a load failure, [`CommandError::Codec`]
    /// if a stored payload does not decode.
    pub async fn current_state(
        &self,
        account_id: StreamId,
    ) -> Result<Replayed<BankAccount>, CommandError> {
        let events = self
            .store
            .load_events(account_id)
            .await
            .map_err(CommandError::Store)?;
        Ok(Replayed::replay(&events)?)
    }

    /// Kind-specific business rules. Pure: no I/O, no clock.
    fn decide(
        current: &Replayed<BankAccount>,
        command: &AccountCommand,
    ) -> Result<AccountEvent, CommandError> {
        match command {
            AccountCommand::Open {
                account_id,
                owner,
                initial_balance,
            } => {
                if !current.version.is_initial() {
                    return Err(CommandError::AlreadyExists(account_id.clone()));
                }
                if initial_balance.is_negative() {
                    return Err(CommandError::InvalidAmount(*initial_balance));
                }
                Ok(AccountEvent::AccountOpened {
                    owner: owner.clone(),
                    initial_balance: *initial_balance,
                })
            },

            AccountCommand::Deposit { account_id, amount } => {
                if !amount.is_positive() {
                    return Err(CommandError::InvalidAmount(*amount));
                }
                if current.version.is_initial() {
                    return Err(CommandError::NotFound(account_id.clone()));
                }
                if current.state.closed {
                    return Err(CommandError::Closed(account_id.clone()));
                }
                if current.state.balance.checked_add(*amount).is_none() {
                    return Err(CommandError::InvalidAmount(*amount));
                }
                Ok(AccountEvent::MoneyDeposited { amount: *amount })
            },

            AccountCommand::Withdraw { account_id, amount } => {
                if !amount.is_positive() {
                    return Err(CommandError::InvalidAmount(*amount));
                }
                if current.version.is_initial() {
                    return Err(CommandError::NotFound(account_id.clone()));
                }
                if current.state.closed {
                    return Err(CommandError::Closed(account_id.clone()));
                }
                if current.state.balance < *amount {
                    return Err(CommandError::InsufficientFunds {
                        balance: current.state.balance,
                        requested: *amount,
                    });
                }
                Ok(AccountEvent::MoneyWithdrawn { amount: *amount })
            },

            AccountCommand::Close { account_id } => {
                if current.version.is_initial() {
                    return Err(CommandError::NotFound(account_id.clone()));
                }
                if current.state.closed {
                    return Err(CommandError::Closed(account_id.clone()));
                }
                Ok(AccountEvent::AccountClosed {
                    final_balance: current.state.balance,
                })
            },
        }
    }
}
