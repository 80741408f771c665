//! Offline-tolerant transaction submission.
//!
//! Submitting a transaction tries the backend once; if that fails the
//! entry is estimated locally and parked in the offline queue instead
//! of being dropped. Queued entries carry negative ids until a later
//! sync replaces them with server-assigned ones.

use tracing::warn;

use verdant_core::{carbon, NewTransaction, Transaction};
use verdant_store::{enqueue_transaction, queued_transactions, CacheStore};

use crate::api::ApiClient;
use crate::status::ServerStatus;

/// Submit a transaction, falling back to the offline queue on failure.
/// Infallible: the caller always gets a transaction to display.
pub async fn submit_transaction<S: CacheStore + ?Sized>(
    store: &S,
    status: &ServerStatus,
    client: &ApiClient,
    new_tx: NewTransaction,
) -> Transaction {
    match client.add_transaction(&new_tx).await {
        Ok(tx) => {
            status.mark_online();
            tx
        }
        Err(err) => {
            warn!(error = %err, "transaction submit failed, queueing offline");
            status.mark_offline();
            queue_locally(store, new_tx)
        }
    }
}

/// Build a locally-estimated transaction and append it to the queue.
fn queue_locally<S: CacheStore + ?Sized>(store: &S, new_tx: NewTransaction) -> Transaction {
    let (carbon, impact) = carbon::estimate(&new_tx);
    let queued_so_far = match queued_transactions(store) {
        Ok(queue) => queue.len() as i64,
        Err(err) => {
            warn!(error = %err, "offline queue unreadable, starting fresh");
            0
        }
    };

    let tx = Transaction {
        id: -(queued_so_far + 1),
        description: new_tx.description,
        amount: new_tx.amount,
        carbon,
        category: new_tx.category,
        date: new_tx.date,
        impact,
    };

    if let Err(err) = enqueue_transaction(store, tx.clone()) {
        warn!(error = %err, "failed to persist queued transaction");
    }
    tx
}
