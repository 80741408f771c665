//! Verdant Store - Cache Store Trait and Implementations
//!
//! Defines the injectable key-value store the data layer caches into, in
//! place of any ambient global. Components receive a store handle; tests
//! substitute [`MemoryStore`], deployments use [`FileStore`].
//!
//! Semantics: at most one entry per key, newest write wins, no expiry.
//! Entries live until an explicit reset removes them.

use chrono::Utc;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use verdant_core::{DatasetKey, StoreError, Timestamp};

pub mod file;
pub mod memory;
pub mod queue;
pub mod reset;

pub use file::FileStore;
pub use memory::MemoryStore;
pub use queue::{enqueue_transaction, queued_transactions};
pub use reset::{reset_all, reset_dataset};

/// Envelope persisted for every cached dataset value.
///
/// `stored_at` is informational (display and debugging); no expiry is
/// derived from it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry<T> {
    pub value: T,
    pub stored_at: Timestamp,
}

/// Pluggable key-value store backend.
///
/// Implementations must be `Send + Sync`; callers rely on last-writer-wins
/// for concurrent writes to the same key. Removing a missing key is not an
/// error.
pub trait CacheStore: Send + Sync {
    /// Get the raw serialized value for a key.
    fn get_raw(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Set the raw serialized value for a key, replacing any previous value.
    fn set_raw(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Remove a key. A no-op when the key is absent.
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// Typed dataset access layered over any [`CacheStore`].
pub trait StoreExt: CacheStore {
    /// Read the cache entry for a dataset, if one exists.
    ///
    /// A corrupt entry surfaces as `StoreError::Serde`; the resilient
    /// fetch path treats that the same as a miss.
    fn get_entry<T: DeserializeOwned>(
        &self,
        key: &DatasetKey,
    ) -> Result<Option<CacheEntry<T>>, StoreError> {
        match self.get_raw(&key.storage_key())? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    /// Write a dataset value, stamping it with the current time.
    fn put_entry<T: Serialize>(&self, key: &DatasetKey, value: &T) -> Result<(), StoreError> {
        let entry = CacheEntry {
            value,
            stored_at: Utc::now(),
        };
        let raw = serde_json::to_string(&entry)?;
        self.set_raw(&key.storage_key(), &raw)
    }
}

impl<S: CacheStore + ?Sized> StoreExt for S {}
