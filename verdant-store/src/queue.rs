//! Offline transaction queue.
//!
//! Transactions submitted while the backend is unreachable are appended
//! here so they are not lost. Draining the queue back to the server is a
//! caller concern (typically on the next successful sync).

use crate::{CacheStore, StoreExt};
use verdant_core::{DatasetKey, StoreError, Transaction};

/// Transactions currently waiting for the backend.
pub fn queued_transactions<S: CacheStore + ?Sized>(
    store: &S,
) -> Result<Vec<Transaction>, StoreError> {
    let entry = store.get_entry::<Vec<Transaction>>(&DatasetKey::offline_transactions())?;
    Ok(entry.map(|e| e.value).unwrap_or_default())
}

/// Append a transaction to the offline queue.
pub fn enqueue_transaction<S: CacheStore + ?Sized>(
    store: &S,
    tx: Transaction,
) -> Result<(), StoreError> {
    let mut queue = queued_transactions(store)?;
    queue.push(tx);
    store.put_entry(&DatasetKey::offline_transactions(), &queue)
}
