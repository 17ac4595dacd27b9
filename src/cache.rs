// Aggregation cache: one snapshot of every provider's availability, refreshed by fan-out.
//
// Lifecycle of the single entry: empty -> loading -> ready -> stale -> loading.
// At most one load is in flight at any time; every caller needing a load awaits the same one.

use chrono::{DateTime, Utc};
use futures::future::{join_all, BoxFuture, FutureExt, Shared};
use parking_lot::Mutex;
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::Instant;

use crate::adapter::ProviderAdapter;
use crate::config::CacheConfig;
use crate::error::{CommunicationCause, CommunicationError};
use crate::model::{ProviderId, Slot, SlotKey};

/// Fetch outcome of one provider inside a snapshot.
#[derive(Debug)]
pub struct ProviderRecord {
    pub provider: ProviderId,
    pub outcome: Result<Vec<Slot>, CommunicationError>,
}

impl ProviderRecord {
    pub fn new(provider: ProviderId, outcome: Result<Vec<Slot>, CommunicationError>) -> Self {
        Self { provider, outcome }
    }

    pub fn slots(&self) -> Option<&[Slot]> {
        self.outcome.as_deref().ok()
    }

    pub fn failure(&self) -> Option<&CommunicationError> {
        self.outcome.as_ref().err()
    }

    pub fn is_failed(&self) -> bool {
        self.outcome.is_err()
    }
}

/// One aggregation pass over all providers.
///
/// Nothing in a published snapshot changes except the `reserved` flag of its slots.
#[derive(Debug)]
pub struct Snapshot {
    records: Vec<ProviderRecord>,
    loaded_at: DateTime<Utc>,
}

impl Snapshot {
    pub fn new(records: Vec<ProviderRecord>) -> Self {
        let records = records.into_iter().map(dedup_record).collect();
        Self {
            records,
            loaded_at: Utc::now(),
        }
    }

    pub fn records(&self) -> &[ProviderRecord] {
        &self.records
    }

    pub fn record(&self, provider: &ProviderId) -> Option<&ProviderRecord> {
        self.records.iter().find(|r| &r.provider == provider)
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }

    // Drives the reload-after-failure rule in `AggregationCache::get`
    pub fn has_any_failure(&self) -> bool {
        self.records.iter().any(ProviderRecord::is_failed)
    }

    pub fn failed_providers(&self) -> impl Iterator<Item = &ProviderId> {
        self.records
            .iter()
            .filter(|r| r.is_failed())
            .map(|r| &r.provider)
    }

    /// Flag the slot with this identity as reserved.
    ///
    /// Returns false when the provider's record is missing or failed, or the slot is not listed.
    pub fn mark_reserved(&self, key: &SlotKey) -> bool {
        let Some(slots) = self.record(&key.provider).and_then(ProviderRecord::slots) else {
            return false;
        };
        match slots.iter().find(|slot| slot.matches(key)) {
            Some(slot) => {
                slot.mark_reserved();
                true
            }
            None => false,
        }
    }
}

// Providers are trusted for content but not for uniqueness of their slot ids
fn dedup_record(record: ProviderRecord) -> ProviderRecord {
    let ProviderRecord { provider, outcome } = record;
    let outcome = outcome.map(|slots| {
        let listed = slots.len();
        let mut seen = HashSet::with_capacity(listed);
        let unique: Vec<Slot> = slots
            .into_iter()
            .filter(|slot| seen.insert(slot.slot_id.clone()))
            .collect();
        if unique.len() != listed {
            tracing::warn!(
                provider = %provider,
                dropped = listed - unique.len(),
                "provider listed duplicate slot ids"
            );
        }
        unique
    });
    ProviderRecord { provider, outcome }
}

// Cache statistics, updated lock-free
#[derive(Debug, Default)]
pub struct CacheStats {
    pub hit_count: AtomicUsize,
    pub stale_hit_count: AtomicUsize,
    pub miss_count: AtomicUsize,
    pub expired_count: AtomicUsize,
    pub failure_reload_count: AtomicUsize,
    pub loads_started: AtomicUsize,
    pub loads_completed: AtomicUsize,
    pub failed_fetch_count: AtomicUsize,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct CacheStatsReport {
    pub hit_count: usize,
    pub stale_hit_count: usize,
    pub miss_count: usize,
    pub expired_count: usize,
    pub failure_reload_count: usize,
    pub loads_started: usize,
    pub loads_completed: usize,
    pub failed_fetch_count: usize,
}

/// What a `get` has to do with the currently published snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Freshness {
    Missing,
    Fresh,
    // Serve, and reload in the background
    Stale,
    Expired,
    // Previous pass had a failed provider; reload before serving
    Failed,
}

impl Freshness {
    pub fn evaluate(age: Option<Duration>, has_failure: bool, config: &CacheConfig) -> Self {
        let Some(age) = age else {
            return Freshness::Missing;
        };
        if has_failure && config.reload_on_failure {
            Freshness::Failed
        } else if age >= config.expire_after_write() {
            Freshness::Expired
        } else if age >= config.refresh_after_write() {
            Freshness::Stale
        } else {
            Freshness::Fresh
        }
    }
}

type SharedLoad = Shared<BoxFuture<'static, Arc<Snapshot>>>;

struct Entry {
    snapshot: Arc<Snapshot>,
    written_at: Instant,
}

#[derive(Default)]
struct CacheState {
    current: Option<Entry>,
    in_flight: Option<SharedLoad>,
}

impl CacheState {
    fn freshness(&self, now: Instant, config: &CacheConfig) -> Freshness {
        let age = self
            .current
            .as_ref()
            .map(|entry| now.saturating_duration_since(entry.written_at));
        let has_failure = self
            .current
            .as_ref()
            .map_or(false, |entry| entry.snapshot.has_any_failure());
        Freshness::evaluate(age, has_failure, config)
    }

    fn snapshot(&self) -> Option<Arc<Snapshot>> {
        self.current.as_ref().map(|entry| Arc::clone(&entry.snapshot))
    }
}

struct CacheInner {
    adapters: Vec<Arc<dyn ProviderAdapter>>,
    config: CacheConfig,
    state: Mutex<CacheState>,
    stats: CacheStats,
}

fn format_duration(duration: Duration) -> String {
    let s = duration.as_secs();
    format!("{}:{:02}:{:02}", s / 3600, (s % 3600) / 60, s % 60)
}

/// Single-entry loading cache over all configured providers.
#[derive(Clone)]
pub struct AggregationCache {
    inner: Arc<CacheInner>,
}

impl AggregationCache {
    pub fn new(adapters: Vec<Arc<dyn ProviderAdapter>>, config: CacheConfig) -> Self {
        tracing::info!(
            expire_after_write = %format_duration(config.expire_after_write()),
            refresh_after_write = %format_duration(config.refresh_after_write()),
            reload_on_failure = config.reload_on_failure,
            "configured availability cache"
        );
        Self {
            inner: Arc::new(CacheInner {
                adapters,
                config,
                state: Mutex::new(CacheState::default()),
                stats: CacheStats::default(),
            }),
        }
    }

    /// Current snapshot, loading it first when missing, expired or failed.
    ///
    /// A stale snapshot is returned as is while a reload runs in the background.
    pub async fn get(&self) -> Arc<Snapshot> {
        let pending = {
            let mut state = self.inner.state.lock();
            let stats = &self.inner.stats;

            match state.freshness(Instant::now(), &self.inner.config) {
                Freshness::Fresh => {
                    stats.hit_count.fetch_add(1, Ordering::Relaxed);
                    if let Some(snapshot) = state.snapshot() {
                        return snapshot;
                    }
                }
                Freshness::Stale => {
                    stats.stale_hit_count.fetch_add(1, Ordering::Relaxed);
                    if let Some(snapshot) = state.snapshot() {
                        if state.in_flight.is_none() {
                            tracing::debug!("availability snapshot is stale, refreshing in background");
                        }
                        let _refresh = self.inner.start_load(&mut state);
                        return snapshot;
                    }
                }
                Freshness::Missing => {
                    stats.miss_count.fetch_add(1, Ordering::Relaxed);
                }
                Freshness::Expired => {
                    stats.expired_count.fetch_add(1, Ordering::Relaxed);
                }
                Freshness::Failed => {
                    stats.failure_reload_count.fetch_add(1, Ordering::Relaxed);
                    if state.in_flight.is_none() {
                        tracing::info!(
                            "previous availability snapshot had failed providers, reloading"
                        );
                    }
                }
            }
            self.inner.start_load(&mut state)
        };

        pending.await
    }

    // Published snapshot, without ever triggering a load
    pub fn current(&self) -> Option<Arc<Snapshot>> {
        self.inner.state.lock().snapshot()
    }

    // Drop the published snapshot; an in-flight load still publishes when done
    pub fn invalidate(&self) {
        self.inner.state.lock().current = None;
    }

    pub fn stats(&self) -> CacheStatsReport {
        let stats = &self.inner.stats;
        CacheStatsReport {
            hit_count: stats.hit_count.load(Ordering::Relaxed),
            stale_hit_count: stats.stale_hit_count.load(Ordering::Relaxed),
            miss_count: stats.miss_count.load(Ordering::Relaxed),
            expired_count: stats.expired_count.load(Ordering::Relaxed),
            failure_reload_count: stats.failure_reload_count.load(Ordering::Relaxed),
            loads_started: stats.loads_started.load(Ordering::Relaxed),
            loads_completed: stats.loads_completed.load(Ordering::Relaxed),
            failed_fetch_count: stats.failed_fetch_count.load(Ordering::Relaxed),
        }
    }
}

// Clears the in-flight marker when a load ends without publishing
struct LoadGuard<'a> {
    inner: &'a CacheInner,
    armed: bool,
}

impl Drop for LoadGuard<'_> {
    fn drop(&mut self) {
        if self.armed {
            self.inner.state.lock().in_flight = None;
        }
    }
}

impl CacheInner {
    // Join the in-flight load, or start one. Loads run on their own task so a caller giving
    // up never leaves the cache stuck in the loading state.
    fn start_load(self: &Arc<Self>, state: &mut CacheState) -> SharedLoad {
        if let Some(load) = &state.in_flight {
            return load.clone();
        }

        self.stats.loads_started.fetch_add(1, Ordering::Relaxed);
        let inner = Arc::clone(self);
        let load = async move {
            let mut guard = LoadGuard {
                inner: &inner,
                armed: true,
            };
            let snapshot = Arc::new(inner.load().await);
            inner.publish(Arc::clone(&snapshot));
            guard.armed = false;
            snapshot
        }
        .boxed()
        .shared();

        state.in_flight = Some(load.clone());
        tokio::spawn(load.clone());
        load
    }

    async fn load(&self) -> Snapshot {
        tracing::info!(providers = self.adapters.len(), "repopulating availability snapshot");

        let fetches = self.adapters.iter().map(|adapter| {
            let provider = adapter.provider_id().clone();
            let adapter = Arc::clone(adapter);
            // A panicking adapter fails its own record, not the whole load
            let fetch = tokio::spawn(async move { adapter.fetch_available().await });
            self.record_fetch(provider, fetch)
        });
        let records = join_all(fetches).await;

        self.stats.loads_completed.fetch_add(1, Ordering::Relaxed);
        Snapshot::new(records)
    }

    async fn record_fetch(
        &self,
        provider: ProviderId,
        fetch: JoinHandle<Result<Vec<Slot>, CommunicationError>>,
    ) -> ProviderRecord {
        let outcome = fetch.await.unwrap_or_else(|e| {
            Err(CommunicationError::new(
                provider.clone(),
                "listing available slots",
                CommunicationCause::Aborted(e.to_string()),
            ))
        });
        match &outcome {
            Ok(slots) => {
                tracing::info!(provider = %provider, count = slots.len(), "received available slots");
            }
            Err(error) => {
                self.stats.failed_fetch_count.fetch_add(1, Ordering::Relaxed);
                tracing::warn!(provider = %provider, error = %error, "failed refreshing provider availability");
            }
        }
        ProviderRecord::new(provider, outcome)
    }

    fn publish(&self, snapshot: Arc<Snapshot>) {
        let mut state = self.state.lock();
        state.current = Some(Entry {
            snapshot,
            written_at: Instant::now(),
        });
        state.in_flight = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BookingError;
    use crate::model::BookingRequest;
    use crate::testutils::{at, ScriptedAdapter};
    use async_trait::async_trait;
    use test_case::test_case;

    fn config() -> CacheConfig {
        CacheConfig {
            expire_after_write_secs: 600,
            refresh_after_write_secs: 60,
            reload_on_failure: true,
        }
    }

    fn two_providers() -> (ScriptedAdapter, ScriptedAdapter) {
        let a = ScriptedAdapter::new(
            "manchester",
            &[("1", "2024-08-08T06:00:00Z"), ("2", "2024-08-09T06:00:00Z")],
        );
        let b = ScriptedAdapter::new(
            "london",
            &[("1", "2024-08-08T06:00:00Z"), ("2", "2024-08-09T06:00:00Z")],
        );
        (a, b)
    }

    fn cache_over(adapters: &[&ScriptedAdapter], config: CacheConfig) -> AggregationCache {
        AggregationCache::new(adapters.iter().map(|a| a.shared()).collect(), config)
    }

    #[test_case(None, false, Freshness::Missing; "nothing loaded")]
    #[test_case(Some(10), false, Freshness::Fresh; "fresh")]
    #[test_case(Some(60), false, Freshness::Stale; "refresh threshold reached")]
    #[test_case(Some(599), false, Freshness::Stale; "just before expiry")]
    #[test_case(Some(600), false, Freshness::Expired; "expired")]
    #[test_case(Some(1), true, Freshness::Failed; "failure ignores timers")]
    #[test_case(Some(700), true, Freshness::Failed; "failure wins over expiry")]
    fn test_freshness(age_secs: Option<u64>, has_failure: bool, expected: Freshness) {
        let age = age_secs.map(Duration::from_secs);
        assert_eq!(Freshness::evaluate(age, has_failure, &config()), expected);
    }

    #[test]
    fn test_failure_rule_can_be_disabled() {
        let config = CacheConfig {
            reload_on_failure: false,
            ..config()
        };
        assert_eq!(
            Freshness::evaluate(Some(Duration::from_secs(1)), true, &config),
            Freshness::Fresh
        );
    }

    #[test]
    fn test_snapshot_drops_duplicate_slot_ids() {
        let provider: ProviderId = "london".into();
        let snapshot = Snapshot::new(vec![ProviderRecord::new(
            provider.clone(),
            Ok(vec![
                Slot::new(provider.clone(), "1", at("2024-08-08T06:00:00Z")),
                Slot::new(provider.clone(), "1", at("2024-08-09T06:00:00Z")),
                Slot::new(provider.clone(), "2", at("2024-08-09T06:00:00Z")),
            ]),
        )]);

        let slots = snapshot.record(&provider).and_then(ProviderRecord::slots).unwrap();
        assert_eq!(slots.len(), 2);
        assert_eq!(slots[0].start, at("2024-08-08T06:00:00Z"));
    }

    #[test]
    fn test_mark_reserved_targets_identity_only() {
        let london: ProviderId = "london".into();
        let manchester: ProviderId = "manchester".into();
        let snapshot = Snapshot::new(vec![
            ProviderRecord::new(
                london.clone(),
                Ok(vec![Slot::new(london.clone(), "1", at("2024-08-08T06:00:00Z"))]),
            ),
            ProviderRecord::new(
                manchester.clone(),
                Err(CommunicationError::decode(manchester.clone(), "listing", "refused")),
            ),
        ]);

        assert!(snapshot.mark_reserved(&SlotKey::new(london.clone(), "1")));
        assert!(!snapshot.mark_reserved(&SlotKey::new(london.clone(), "2")));
        assert!(!snapshot.mark_reserved(&SlotKey::new(manchester.clone(), "1")));
        assert!(!snapshot.mark_reserved(&SlotKey::new("paris".into(), "1")));

        let slots = snapshot.record(&london).and_then(ProviderRecord::slots).unwrap();
        assert!(slots[0].is_reserved());
        assert!(snapshot.has_any_failure());
        assert_eq!(snapshot.failed_providers().collect::<Vec<_>>(), vec![&manchester]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_get_loads_then_hits() {
        let (a, b) = two_providers();
        let cache = cache_over(&[&a, &b], config());
        assert!(cache.current().is_none());

        let first = cache.get().await;
        let second = cache.get().await;

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(first.records().len(), 2);
        assert_eq!(a.fetch_count(), 1);
        assert_eq!(b.fetch_count(), 1);

        let stats = cache.stats();
        assert_eq!(stats.miss_count, 1);
        assert_eq!(stats.hit_count, 1);
        assert_eq!(stats.loads_completed, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_misses_collapse_into_one_load() {
        let (a, b) = two_providers();
        a.set_fetch_delay(Duration::from_millis(200));
        b.set_fetch_delay(Duration::from_millis(50));
        let cache = cache_over(&[&a, &b], config());

        let callers = (0..16).map(|_| {
            let cache = cache.clone();
            tokio::spawn(async move { cache.get().await })
        });
        let snapshots: Vec<Arc<Snapshot>> = join_all(callers)
            .await
            .into_iter()
            .map(|joined| joined.unwrap())
            .collect();

        assert_eq!(a.fetch_count(), 1);
        assert_eq!(b.fetch_count(), 1);
        assert!(snapshots.iter().all(|s| Arc::ptr_eq(s, &snapshots[0])));
        assert_eq!(cache.stats().loads_started, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_provider_does_not_fail_others() {
        let (a, b) = two_providers();
        a.set_failing(true);
        b.set_fetch_delay(Duration::from_secs(3));
        let cache = cache_over(&[&a, &b], config());

        let snapshot = cache.get().await;

        let failed: Vec<&ProviderId> = snapshot.failed_providers().collect();
        assert_eq!(failed, vec![&ProviderId::from("manchester")]);
        let london = snapshot.record(&"london".into()).unwrap();
        assert_eq!(london.slots().unwrap().len(), 2);
        assert!(london.failure().is_none());
        let manchester = snapshot.record(&"manchester".into()).unwrap();
        assert_eq!(manchester.failure().unwrap().provider.as_str(), "manchester");
        assert_eq!(cache.stats().failed_fetch_count, 1);
    }

    // Panics on its first listing call, healthy afterwards
    struct PanicsOnce {
        id: ProviderId,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl ProviderAdapter for PanicsOnce {
        fn provider_id(&self) -> &ProviderId {
            &self.id
        }

        async fn fetch_available(&self) -> Result<Vec<Slot>, CommunicationError> {
            if self.calls.fetch_add(1, Ordering::SeqCst) == 0 {
                panic!("listing blew up");
            }
            Ok(vec![Slot::new(self.id.clone(), "9", at("2024-08-11T06:00:00Z"))])
        }

        async fn book(&self, request: &BookingRequest) -> Result<Slot, BookingError> {
            Err(CommunicationError::decode(self.id.clone(), "booking slot", &request.slot_id).into())
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_panicking_adapter_fails_only_its_record() {
        let (_, b) = two_providers();
        let flaky = Arc::new(PanicsOnce {
            id: "paris".into(),
            calls: AtomicUsize::new(0),
        });
        let adapter: Arc<dyn ProviderAdapter> = flaky.clone();
        let cache = AggregationCache::new(vec![adapter, b.shared()], config());

        let first = cache.get().await;
        let paris = first.record(&"paris".into()).unwrap();
        assert!(matches!(
            paris.failure().map(|e| &e.cause),
            Some(CommunicationCause::Aborted(_))
        ));
        assert_eq!(first.record(&"london".into()).unwrap().slots().unwrap().len(), 2);

        let second = cache.get().await;
        assert!(!second.has_any_failure());
        assert_eq!(second.record(&"paris".into()).unwrap().slots().unwrap().len(), 1);
        assert_eq!(flaky.calls.load(Ordering::SeqCst), 2);
        assert_eq!(cache.stats().loads_started, 2);
        assert_eq!(cache.stats().loads_completed, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_snapshot_is_served_while_refreshing() {
        let (a, b) = two_providers();
        let cache = cache_over(&[&a, &b], config());
        let first = cache.get().await;

        tokio::time::advance(Duration::from_secs(61)).await;
        a.set_slots(&[("3", "2024-08-10T06:00:00Z")]);

        let stale = cache.get().await;
        assert!(Arc::ptr_eq(&first, &stale));

        // let the background refresh run
        tokio::time::sleep(Duration::from_millis(1)).await;

        let refreshed = cache.current().unwrap();
        assert!(!Arc::ptr_eq(&first, &refreshed));
        assert!(refreshed.loaded_at() >= first.loaded_at());
        let manchester = refreshed.record(&"manchester".into()).unwrap();
        assert_eq!(manchester.slots().unwrap()[0].slot_id, "3");
        assert_eq!(a.fetch_count(), 2);

        let stats = cache.stats();
        assert_eq!(stats.stale_hit_count, 1);
        assert_eq!(stats.loads_completed, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_expired_snapshot_is_reloaded_before_serving() {
        let (a, b) = two_providers();
        let cache = cache_over(&[&a, &b], config());
        let first = cache.get().await;

        tokio::time::advance(Duration::from_secs(601)).await;
        let second = cache.get().await;

        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(a.fetch_count(), 2);
        assert_eq!(cache.stats().expired_count, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_provider_forces_reload_on_next_get() {
        let (a, b) = two_providers();
        a.set_failing(true);
        let cache = cache_over(&[&a, &b], config());

        let failed = cache.get().await;
        assert!(failed.has_any_failure());
        assert_eq!(a.fetch_count(), 1);

        // still failing: every access retries
        let still_failed = cache.get().await;
        assert!(still_failed.has_any_failure());
        assert_eq!(a.fetch_count(), 2);

        a.set_failing(false);
        let healed = cache.get().await;
        assert!(!healed.has_any_failure());
        assert_eq!(a.fetch_count(), 3);
        assert_eq!(b.fetch_count(), 3);

        let cached = cache.get().await;
        assert!(Arc::ptr_eq(&healed, &cached));
        assert_eq!(a.fetch_count(), 3);
        assert_eq!(cache.stats().failure_reload_count, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_snapshot_is_kept_when_rule_disabled() {
        let (a, b) = two_providers();
        a.set_failing(true);
        let cache = cache_over(
            &[&a, &b],
            CacheConfig {
                reload_on_failure: false,
                ..config()
            },
        );

        let first = cache.get().await;
        let second = cache.get().await;

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(a.fetch_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_abandoned_caller_does_not_strand_load() {
        let (a, b) = two_providers();
        a.set_fetch_delay(Duration::from_secs(1));
        let cache = cache_over(&[&a, &b], config());

        let gave_up = tokio::time::timeout(Duration::from_millis(10), cache.get()).await;
        assert!(gave_up.is_err());

        let snapshot = cache.get().await;
        assert_eq!(snapshot.records().len(), 2);
        assert_eq!(a.fetch_count(), 1);
        assert_eq!(cache.stats().loads_started, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_invalidate_forces_next_load() {
        let (a, b) = two_providers();
        let cache = cache_over(&[&a, &b], config());
        cache.get().await;

        cache.invalidate();
        assert!(cache.current().is_none());
        cache.get().await;

        assert_eq!(a.fetch_count(), 2);
        assert_eq!(cache.stats().miss_count, 2);
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_secs(3725)), "1:02:05");
        assert_eq!(format_duration(Duration::from_secs(60)), "0:01:00");
    }
}
