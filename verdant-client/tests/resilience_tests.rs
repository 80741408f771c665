//! End-to-end behavior of the resilient fetch path against fake remotes.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use verdant_client::{
    chart_series, DatasetSpec, FixedEntropy, Origin, RemoteSource, ResilientSource, ServerStatus,
    SourceConfig, SERIES_LEN,
};
use verdant_core::{ChartPoint, DatasetKey, FetchError};
use verdant_store::{CacheEntry, CacheStore, MemoryStore, StoreExt};

// ============================================================================
// FAKE REMOTES
// ============================================================================

/// Always succeeds with a fixed payload, counting calls.
struct CountingRemote {
    value: Vec<ChartPoint>,
    calls: AtomicUsize,
}

impl CountingRemote {
    fn new(value: Vec<ChartPoint>) -> Self {
        Self {
            value,
            calls: AtomicUsize::new(0),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RemoteSource<Vec<ChartPoint>> for CountingRemote {
    async fn fetch(&self) -> Result<Vec<ChartPoint>, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.value.clone())
    }
}

/// Always fails with a connection error.
struct FailingRemote;

#[async_trait]
impl RemoteSource<Vec<ChartPoint>> for FailingRemote {
    async fn fetch(&self) -> Result<Vec<ChartPoint>, FetchError> {
        Err(FetchError::Network("connection refused".to_string()))
    }
}

/// Succeeds, but only after a delay longer than any test timeout.
struct SlowRemote {
    delay: Duration,
    value: Vec<ChartPoint>,
}

#[async_trait]
impl RemoteSource<Vec<ChartPoint>> for SlowRemote {
    async fn fetch(&self) -> Result<Vec<ChartPoint>, FetchError> {
        tokio::time::sleep(self.delay).await;
        Ok(self.value.clone())
    }
}

// ============================================================================
// HELPERS
// ============================================================================

fn live_points() -> Vec<ChartPoint> {
    vec![
        ChartPoint {
            month: "May".to_string(),
            footprint: 2.6,
            target: 2.1,
        },
        ChartPoint {
            month: "Jun".to_string(),
            footprint: 2.4,
            target: 2.0,
        },
    ]
}

fn chart_spec() -> DatasetSpec<Vec<ChartPoint>> {
    DatasetSpec::new(DatasetKey::chart_data(), || {
        chart_series(&mut FixedEntropy::new(vec![0.5]))
    })
    .with_validate(|points: &Vec<ChartPoint>| !points.is_empty())
}

fn source(store: Arc<MemoryStore>) -> ResilientSource<MemoryStore> {
    ResilientSource::new(
        store,
        ServerStatus::new(),
        SourceConfig::default().with_timeout(Duration::from_millis(200)),
    )
}

// ============================================================================
// TESTS
// ============================================================================

#[tokio::test]
async fn network_success_is_live_and_cached() {
    let store = Arc::new(MemoryStore::new());
    let source = source(store.clone());
    let remote = CountingRemote::new(live_points());

    let result = source.fetch(&chart_spec(), &remote).await;

    assert_eq!(result.origin(), Origin::Network);
    assert!(result.is_live());
    assert_eq!(result.value(), &live_points());
    assert!(source.status().is_online());

    // The shown value must be in the cache afterwards.
    let entry: CacheEntry<Vec<ChartPoint>> = store
        .get_entry(&DatasetKey::chart_data())
        .unwrap()
        .unwrap();
    assert_eq!(entry.value, live_points());
}

#[tokio::test]
async fn valid_cache_short_circuits_the_network() {
    let store = Arc::new(MemoryStore::new());
    store
        .put_entry(&DatasetKey::chart_data(), &live_points())
        .unwrap();

    let source = source(store);
    let remote = CountingRemote::new(vec![]);

    let result = source.fetch(&chart_spec(), &remote).await;

    assert_eq!(result.origin(), Origin::Cache);
    assert!(!result.is_live());
    assert_eq!(result.value(), &live_points());
    assert_eq!(remote.calls(), 0, "cache hit must not touch the network");
}

#[tokio::test]
async fn network_failure_synthesizes_and_caches() {
    let store = Arc::new(MemoryStore::new());
    let source = source(store.clone());

    let result = source.fetch(&chart_spec(), &FailingRemote).await;

    assert_eq!(result.origin(), Origin::Synthetic);
    assert_eq!(result.value().len(), SERIES_LEN);
    assert!(!source.status().is_online());

    // Synthetic fallback is cached too, so the next call is a cache hit.
    let entry: CacheEntry<Vec<ChartPoint>> = store
        .get_entry(&DatasetKey::chart_data())
        .unwrap()
        .unwrap();
    assert_eq!(&entry.value, result.value());

    let second = source.fetch(&chart_spec(), &FailingRemote).await;
    assert_eq!(second.origin(), Origin::Cache);
    assert_eq!(second.value(), result.value());
}

#[tokio::test]
async fn slow_remote_times_out_into_synthetic() {
    let store = Arc::new(MemoryStore::new());
    let source = ResilientSource::new(
        store,
        ServerStatus::new(),
        SourceConfig::default().with_timeout(Duration::from_millis(50)),
    );
    let remote = SlowRemote {
        delay: Duration::from_secs(5),
        value: live_points(),
    };

    let started = std::time::Instant::now();
    let result = source.fetch(&chart_spec(), &remote).await;

    assert_eq!(result.origin(), Origin::Synthetic);
    assert_eq!(result.value().len(), SERIES_LEN);
    assert!(
        started.elapsed() < Duration::from_secs(2),
        "timeout must cut the attempt short"
    );
    assert!(!source.status().is_online());

    // The synthetic value was cached, so an immediate retry is a hit.
    let second = source.fetch(&chart_spec(), &remote).await;
    assert_eq!(second.origin(), Origin::Cache);
    assert_eq!(second.value(), result.value());
}

#[tokio::test]
async fn invalid_network_payload_falls_back_but_stays_online() {
    let store = Arc::new(MemoryStore::new());
    let source = source(store);
    // An empty payload fails the dataset's validation predicate.
    let remote = CountingRemote::new(vec![]);

    let result = source.fetch(&chart_spec(), &remote).await;

    assert_eq!(result.origin(), Origin::Synthetic);
    assert_eq!(remote.calls(), 1);
    assert!(
        source.status().is_online(),
        "the server answered, connectivity is not the problem"
    );
}

#[tokio::test]
async fn corrupt_cache_entry_is_treated_as_a_miss() {
    let store = Arc::new(MemoryStore::new());
    store
        .set_raw(&DatasetKey::chart_data().storage_key(), "{not json")
        .unwrap();

    let source = source(store.clone());
    let remote = CountingRemote::new(live_points());

    let result = source.fetch(&chart_spec(), &remote).await;

    assert_eq!(result.origin(), Origin::Network);
    assert_eq!(remote.calls(), 1);

    // The corrupt entry is replaced by the fetched value.
    let entry: CacheEntry<Vec<ChartPoint>> = store
        .get_entry(&DatasetKey::chart_data())
        .unwrap()
        .unwrap();
    assert_eq!(entry.value, live_points());
}

#[tokio::test]
async fn invalid_cached_value_triggers_a_refetch() {
    let store = Arc::new(MemoryStore::new());
    // An empty series is cached but fails validation.
    store
        .put_entry(&DatasetKey::chart_data(), &Vec::<ChartPoint>::new())
        .unwrap();

    let source = source(store);
    let remote = CountingRemote::new(live_points());

    let result = source.fetch(&chart_spec(), &remote).await;

    assert_eq!(result.origin(), Origin::Network);
    assert_eq!(remote.calls(), 1);
}

#[tokio::test]
async fn status_recovers_after_a_successful_fetch() {
    let failing_key_spec = DatasetSpec::new(DatasetKey::chart_data(), || {
        chart_series(&mut FixedEntropy::new(vec![0.5]))
    })
    .with_validate(|points: &Vec<ChartPoint>| !points.is_empty());

    let source = source(Arc::new(MemoryStore::new()));

    source.fetch(&failing_key_spec, &FailingRemote).await;
    assert!(!source.status().is_online());

    // A different dataset succeeding flips the shared flag back.
    let insights_spec: DatasetSpec<Vec<ChartPoint>> =
        DatasetSpec::new(DatasetKey::insights(), Vec::new);
    let remote = CountingRemote::new(live_points());
    source.fetch(&insights_spec, &remote).await;
    assert!(source.status().is_online());
}

#[tokio::test]
async fn map_preserves_origin() {
    let source = source(Arc::new(MemoryStore::new()));
    let remote = CountingRemote::new(live_points());

    let result = source.fetch(&chart_spec(), &remote).await;
    let months = result.map(|points| points.len());

    assert_eq!(months.origin(), Origin::Network);
    assert_eq!(months.into_value(), 2);
}
