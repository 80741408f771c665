//! Offline-resilient dataset fetching.
//!
//! [`ResilientSource::fetch`] is the single data path every dashboard
//! surface goes through. The ordering is fixed: a valid cached value is
//! returned without touching the network; otherwise one timeout-bounded
//! network attempt runs; any failure falls back to a synthesized value.
//! Whatever is shown is written back to the cache, and the call itself
//! never fails.

use async_trait::async_trait;
use chrono::Utc;
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use verdant_core::{DatasetKey, FetchError, Timestamp};
use verdant_store::{CacheStore, StoreExt};

use crate::config::DEFAULT_TIMEOUT_MS;
use crate::status::ServerStatus;

/// Where a fetched value actually came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// Fresh from the backend this call.
    Network,
    /// Previously stored value, served without a network attempt.
    Cache,
    /// Generated locally because nothing cached and the network failed.
    Synthetic,
}

/// A value plus the provenance the UI needs for its data-source badge.
#[derive(Debug, Clone)]
pub struct FetchResult<T> {
    value: T,
    origin: Origin,
    /// When the value was obtained: network/synthetic values are stamped
    /// now, cached values keep their original store time.
    as_of: Timestamp,
}

impl<T> FetchResult<T> {
    fn network(value: T) -> Self {
        Self {
            value,
            origin: Origin::Network,
            as_of: Utc::now(),
        }
    }

    fn cached(value: T, stored_at: Timestamp) -> Self {
        Self {
            value,
            origin: Origin::Cache,
            as_of: stored_at,
        }
    }

    fn synthetic(value: T) -> Self {
        Self {
            value,
            origin: Origin::Synthetic,
            as_of: Utc::now(),
        }
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn into_value(self) -> T {
        self.value
    }

    pub fn origin(&self) -> Origin {
        self.origin
    }

    pub fn as_of(&self) -> Timestamp {
        self.as_of
    }

    /// True only for values fetched from the backend this call.
    pub fn is_live(&self) -> bool {
        self.origin == Origin::Network
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> FetchResult<U> {
        FetchResult {
            value: f(self.value),
            origin: self.origin,
            as_of: self.as_of,
        }
    }
}

/// How to fetch a remote dataset. Implemented by the endpoint adapters
/// in `api`; tests substitute hand-rolled fakes.
#[async_trait]
pub trait RemoteSource<T>: Send + Sync {
    async fn fetch(&self) -> Result<T, FetchError>;
}

/// Everything the resilient path needs to know about one dataset:
/// where it lives in the cache, how to fabricate it, and what counts
/// as a usable value.
pub struct DatasetSpec<T> {
    key: DatasetKey,
    synthesize: Box<dyn Fn() -> T + Send + Sync>,
    validate: Box<dyn Fn(&T) -> bool + Send + Sync>,
}

impl<T> DatasetSpec<T> {
    pub fn new(key: DatasetKey, synthesize: impl Fn() -> T + Send + Sync + 'static) -> Self {
        Self {
            key,
            synthesize: Box::new(synthesize),
            validate: Box::new(|_| true),
        }
    }

    pub fn with_validate(mut self, validate: impl Fn(&T) -> bool + Send + Sync + 'static) -> Self {
        self.validate = Box::new(validate);
        self
    }

    pub fn key(&self) -> &DatasetKey {
        &self.key
    }
}

/// Tuning for the resilient path. Only the network bound for now.
#[derive(Debug, Clone)]
pub struct SourceConfig {
    pub timeout: Duration,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
        }
    }
}

impl SourceConfig {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Cache-first, network-second, synthetic-last dataset fetcher.
pub struct ResilientSource<S: CacheStore + ?Sized> {
    store: Arc<S>,
    status: ServerStatus,
    config: SourceConfig,
}

impl<S: CacheStore + ?Sized> ResilientSource<S> {
    pub fn new(store: Arc<S>, status: ServerStatus, config: SourceConfig) -> Self {
        Self {
            store,
            status,
            config,
        }
    }

    pub fn status(&self) -> &ServerStatus {
        &self.status
    }

    /// Fetch one dataset. Infallible: every exit path produces a value.
    pub async fn fetch<T, R>(&self, spec: &DatasetSpec<T>, remote: &R) -> FetchResult<T>
    where
        T: Serialize + DeserializeOwned,
        R: RemoteSource<T>,
    {
        // Step 1: a valid cached value wins outright, no network attempt.
        match self.store.get_entry::<T>(&spec.key) {
            Ok(Some(entry)) if (spec.validate)(&entry.value) => {
                debug!(dataset = %spec.key, "serving cached value");
                return FetchResult::cached(entry.value, entry.stored_at);
            }
            Ok(Some(_)) => {
                warn!(dataset = %spec.key, "cached value failed validation, refetching");
            }
            Ok(None) => {}
            // A corrupt or unreadable entry is a miss, not a failure.
            Err(err) => {
                warn!(dataset = %spec.key, error = %err, "cache read failed, treating as miss");
            }
        }

        // Step 2: one network attempt, bounded by the configured timeout.
        match tokio::time::timeout(self.config.timeout, remote.fetch()).await {
            Ok(Ok(value)) if (spec.validate)(&value) => {
                self.status.mark_online();
                self.write_back(&spec.key, &value);
                return FetchResult::network(value);
            }
            Ok(Ok(_)) => {
                // The server answered, so connectivity is fine even
                // though the payload is unusable.
                self.status.mark_online();
                warn!(dataset = %spec.key, "network value failed validation");
            }
            Ok(Err(err)) => {
                self.status.mark_offline();
                warn!(dataset = %spec.key, error = %err, "network fetch failed");
            }
            Err(_) => {
                self.status.mark_offline();
                warn!(
                    dataset = %spec.key,
                    timeout_ms = self.config.timeout.as_millis() as u64,
                    "network fetch timed out"
                );
            }
        }

        // Step 3: fabricate, and cache what we are about to show.
        let value = (spec.synthesize)();
        self.write_back(&spec.key, &value);
        FetchResult::synthetic(value)
    }

    fn write_back<T: Serialize>(&self, key: &DatasetKey, value: &T) {
        if let Err(err) = self.store.put_entry(key, value) {
            warn!(dataset = %key, error = %err, "cache write-back failed");
        }
    }
}
