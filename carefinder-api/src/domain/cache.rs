//! TTL-based provider cache with stale-while-refresh semantics.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::RwLock;

use super::refresh::RefreshCoordinator;
use super::source::ProviderDataSource;
use super::{ProviderRecord, ProviderType, SourceKey};

struct CacheEntry {
    records: Vec<ProviderRecord>,
    last_refreshed_at: Instant,
}

/// Synchronized listing storage. Staleness is decided per entry; an absent
/// entry means the key was never fetched. Commits replace an entry's listing
/// sequence atomically: readers see either the old set or the new one.
pub(crate) struct CacheStore {
    ttl: Duration,
    entries: RwLock<HashMap<SourceKey, CacheEntry>>,
}

impl CacheStore {
    pub(crate) fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: RwLock::new(HashMap::new()),
        }
    }

    pub(crate) async fn snapshot(&self, key: &SourceKey) -> Option<Vec<ProviderRecord>> {
        let entries = self.entries.read().await;
        entries.get(key).map(|entry| entry.records.clone())
    }

    pub(crate) async fn is_fresh(&self, key: &SourceKey) -> bool {
        let entries = self.entries.read().await;
        entries
            .get(key)
            .is_some_and(|entry| entry.last_refreshed_at.elapsed() <= self.ttl)
    }

    pub(crate) async fn commit(&self, key: SourceKey, records: Vec<ProviderRecord>) {
        let mut entries = self.entries.write().await;
        entries.insert(
            key,
            CacheEntry {
                records,
                last_refreshed_at: Instant::now(),
            },
        );
    }

    /// All cached listings of one provider type, across every location.
    pub(crate) async fn snapshot_type(&self, provider_type: ProviderType) -> Vec<ProviderRecord> {
        let entries = self.entries.read().await;
        entries
            .iter()
            .filter(|(key, _)| key.provider_type == provider_type)
            .flat_map(|(_, entry)| entry.records.iter().cloned())
            .collect()
    }
}

/// Read-through cache over the provider data source.
///
/// `get` never blocks on a refresh: it returns whatever is cached right now
/// (possibly nothing) and lets the coordinator refresh out of band when the
/// entry is missing or older than the TTL.
#[derive(Clone)]
pub struct ProviderCache {
    store: Arc<CacheStore>,
    coordinator: Arc<RefreshCoordinator>,
}

impl ProviderCache {
    pub fn new(source: Arc<dyn ProviderDataSource>, ttl: Duration, max_concurrent: usize) -> Self {
        let store = Arc::new(CacheStore::new(ttl));
        let coordinator = RefreshCoordinator::new(Arc::clone(&store), source, max_concurrent);
        Self { store, coordinator }
    }

    /// Current snapshot for `key`; triggers a background refresh when the
    /// entry is missing or stale. Never waits for the refresh.
    pub async fn get(&self, key: &SourceKey) -> Vec<ProviderRecord> {
        if !self.store.is_fresh(key).await {
            self.coordinator.request_refresh(key.clone()).await;
        }
        self.store.snapshot(key).await.unwrap_or_default()
    }

    /// Like `get`, but when the key was never fetched it waits for one full
    /// refresh cycle first. Still returns data (fallback listings) rather
    /// than erroring when the data source fails.
    pub async fn get_blocking(&self, key: &SourceKey) -> Vec<ProviderRecord> {
        if self.store.snapshot(key).await.is_none() {
            self.coordinator.refresh_and_wait(key.clone()).await;
        } else if !self.store.is_fresh(key).await {
            self.coordinator.request_refresh(key.clone()).await;
        }
        self.store.snapshot(key).await.unwrap_or_default()
    }

    /// Everything cached for one provider type, across all locations. Does
    /// not trigger refreshes.
    pub async fn aggregate(&self, provider_type: ProviderType) -> Vec<ProviderRecord> {
        self.store.snapshot_type(provider_type).await
    }

    pub fn coordinator(&self) -> &Arc<RefreshCoordinator> {
        &self.coordinator
    }
}
