//! User-triggered reset actions.
//!
//! Resets are the only way cached data dies; nothing is evicted by time.
//! The offline transaction queue can be preserved across a full reset so a
//! "regenerate my randomized data" action does not drop pending writes.

use crate::CacheStore;
use verdant_core::{all_keys, DatasetKey, StoreError};

/// Remove a single dataset from the store.
pub fn reset_dataset<S: CacheStore + ?Sized>(
    store: &S,
    key: &DatasetKey,
) -> Result<(), StoreError> {
    store.remove(&key.storage_key())
}

/// Remove every Verdant dataset. With `preserve_offline_queue`, pending
/// offline transactions survive the reset.
pub fn reset_all<S: CacheStore + ?Sized>(
    store: &S,
    preserve_offline_queue: bool,
) -> Result<(), StoreError> {
    let offline = DatasetKey::offline_transactions();
    for key in all_keys() {
        if preserve_offline_queue && key == offline {
            continue;
        }
        store.remove(&key.storage_key())?;
    }
    Ok(())
}
