//! Walkthrough of the ledger domain: open accounts, move money, hit the
//! business rules, close an account, and fold the log into summaries.
//!
//! Run with:
//!
//! ```sh
//! cargo run -p factstore-ledger --example teller
//! ```

use factstore_core::environment::SystemClock;
use factstore_core::event_store::EventStore;
use factstore_core::stream::StreamId;
use factstore_ledger::{AccountCommand, CommandHandler, LedgerSummaries, Money};
use factstore_memory::InMemoryEventStore;
use std::sync::Arc;
use tracing::info;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let store = InMemoryEventStore::new();
    let handler = CommandHandler::new(Arc::new(store.clone()), Arc::new(SystemClock));

    let alice = StreamId::new("account-alice");
    let bob = StreamId::new("account-bob");

    // Open two accounts and move some money around.
    handler
        .handle(AccountCommand::Open {
            account_id: alice.clone(),
            owner: "Alice Johnson".to_string(),
            initial_balance: Money::from_dollars(10),
        })
        .await?;
    handler
        .handle(AccountCommand::Open {
            account_id: bob.clone(),
            owner: "Bob Smith".to_string(),
            initial_balance: Money::from_dollars(5),
        })
        .await?;
    handler
        .handle(AccountCommand::Deposit {
            account_id: alice.clone(),
            amount: Money::from_cents(250),
        })
        .await?;
    handler
        .handle(AccountCommand::Withdraw {
            account_id: bob.clone(),
            amount: Money::from_dollars(1),
        })
        .await?;

    // Business rules reject bad intents without touching the log.
    if let Err(error) = handler
        .handle(AccountCommand::Withdraw {
            account_id: bob.clone(),
            amount: Money::from_dollars(100),
        })
        .await
    {
        info!(%error, "withdrawal rejected");
    }

    handler
        .handle(AccountCommand::Close {
            account_id: bob.clone(),
        })
        .await?;

    if let Err(error) = handler
        .handle(AccountCommand::Deposit {
            account_id: bob.clone(),
            amount: Money::from_cents(50),
        })
        .await
    {
        info!(%error, "deposit to closed account rejected");
    }

    // The log is authoritative: replay Alice's account and fold the whole
    // ledger into summaries.
    let current = handler.current_state(alice.clone()).await?;
    info!(
        account = %alice,
        balance = %current.state.balance,
        version = %current.version,
        "replayed state"
    );

    let all_events = store.load_all_events().await?;
    info!(total_events = all_events.len(), "full event log");
    for recorded in &all_events {
        info!(
            position = recorded.position,
            stream = %recorded.stream_id,
            version = %recorded.version,
            event_type = %recorded.event_type,
            at = %recorded.timestamp,
            "event"
        );
    }

    let summaries = LedgerSummaries::rebuild(&all_events)?;
    for (account_id, summary) in summaries.iter() {
        info!(
            account = %account_id,
            owner = %summary.owner,
            balance = %summary.balance,
            deposits = %summary.total_deposits,
            withdrawals = %summary.total_withdrawals,
            transactions = summary.transaction_count,
            closed = summary.closed,
            "account summary"
        );
    }

    Ok(())
}
