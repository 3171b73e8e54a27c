//! # Factstore Ledger
//!
//! Bank-account ledger domain on top of the factstore core: the closed set
//! of [`AccountEvent`]s, the [`BankAccount`] aggregate fold, the validating
//! [`CommandHandler`], and rebuildable account summaries.
//!
//! ## Lifecycle
//!
//! ```text
//! NonExistent ──Open──▶ Open ──Close──▶ Closed (terminal)
//!                        │ ▲
//!                 Deposit/Withdraw
//! ```
//!
//! ## Example
//!
//! ```
//! use factstore_ledger::{AccountCommand, CommandHandler, Money};
//! use factstore_core::environment::SystemClock;
//! use factstore_core::stream::StreamId;
//! use factstore_memory::InMemoryEventStore;
//! use std::sync::Arc;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let handler = CommandHandler::new(
//!     Arc::new(InMemoryEventStore::new()),
//!     Arc::new(SystemClock),
//! );
//!
//! handler
//!     .handle(AccountCommand::Open {
//!         account_id: StreamId::new("account-1"),
//!         owner: "Alice Johnson".to_string(),
//!         initial_balance: Money::from_dollars(10),
//!     })
//!     .await?;
//!
//! let current = handler.current_state(StreamId::new("account-1")).await?;
//! assert_eq!(current.state.balance, Money::from_dollars(10));
//! # Ok(())
//! # }
//! ```

pub mod account;
pub mod commands;
pub mod events;
pub mod projection;
pub mod types;

pub use account::BankAccount;
pub use commands::{AccountCommand, CommandError, CommandHandler};
pub use events::AccountEvent;
pub use projection::{AccountSummary, LedgerSummaries};
pub use types::Money;
