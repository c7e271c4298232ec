// src/storage/cache.rs

//! Expiring cache of aggregated catalogs.
//!
//! Each entry carries its own deadline (`created_at + ttl`). Reads past the
//! deadline evict the entry; writes replace the deadline along with the data,
//! so an overwritten entry can never be expired by its predecessor's timer.

use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Duration;

use crate::models::{AggregatedResult, CACHE_TTL_SECS, CatalogLists, Entry, QueryKey, Subtype};
use crate::storage::{Clock, SystemClock};

/// Process-wide catalog cache.
pub struct ExpiringCache {
    entries: RwLock<HashMap<QueryKey, AggregatedResult>>,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl ExpiringCache {
    /// Cache with the standard one-week TTL on the wall clock.
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Cache with the standard TTL on the given clock.
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl: Duration::seconds(CACHE_TTL_SECS as i64),
            clock,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Entries for `subtype` if a fresh result exists for `key`.
    pub fn get(&self, key: &QueryKey, subtype: Subtype) -> Option<Vec<Entry>> {
        let now = self.clock.now();
        {
            let entries = self.read();
            match entries.get(key) {
                None => return None,
                Some(result) if result.is_fresh(now) => {
                    return Some(result.lists.get(subtype).to_vec());
                }
                Some(_) => {}
            }
        }

        // Expired: drop it, unless a fresh result landed in between.
        let mut entries = self.write();
        if entries.get(key).is_some_and(|result| !result.is_fresh(now)) {
            entries.remove(key);
            log::debug!("Evicted expired catalog {key}");
        }
        None
    }

    /// Store a new result for `key`, stamped now, replacing any previous one.
    pub fn put(&self, key: QueryKey, lists: CatalogLists) {
        let now = self.clock.now();
        let result = AggregatedResult::new(lists, now, self.ttl);
        log::debug!(
            "Caching {} movies / {} series for {key} until {}",
            result.lists.movies.len(),
            result.lists.series.len(),
            result.expires_at()
        );

        let mut entries = self.write();
        entries.retain(|_, existing| existing.is_fresh(now));
        entries.insert(key, result);
    }

    /// Remove `key` unconditionally. Returns whether anything was removed.
    pub fn evict(&self, key: &QueryKey) -> bool {
        self.write().remove(key).is_some()
    }

    /// Drop every expired result and report how many went.
    pub fn purge_expired(&self) -> usize {
        let now = self.clock.now();
        let mut entries = self.write();
        let before = entries.len();
        entries.retain(|_, result| result.is_fresh(now));
        before - entries.len()
    }

    /// Number of stored results, fresh or not yet swept.
    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<QueryKey, AggregatedResult>> {
        self.entries.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<QueryKey, AggregatedResult>> {
        self.entries.write().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for ExpiringCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use chrono::DateTime;

    use super::*;
    use crate::models::SortKey;
    use crate::storage::ManualClock;

    fn entry(id: &str, subtype: Subtype) -> Entry {
        Entry {
            id: id.to_string(),
            name: format!("Title {id}"),
            year: Some("2020".to_string()),
            subtype,
            poster: None,
        }
    }

    fn lists() -> CatalogLists {
        let mut lists = CatalogLists::default();
        lists.extend([entry("tt1", Subtype::Movie), entry("tt2", Subtype::Series)]);
        lists
    }

    fn setup() -> (Arc<ManualClock>, ExpiringCache, QueryKey) {
        let clock = Arc::new(ManualClock::new(DateTime::from_timestamp(1_700_000_000, 0).unwrap()));
        let cache = ExpiringCache::with_clock(clock.clone());
        let key = QueryKey::new("hero", SortKey::Popular).unwrap();
        (clock, cache, key)
    }

    #[test]
    fn test_get_missing_is_absent() {
        let (_, cache, key) = setup();
        assert!(cache.get(&key, Subtype::Movie).is_none());
    }

    #[test]
    fn test_get_returns_requested_subtype() {
        let (_, cache, key) = setup();
        cache.put(key.clone(), lists());
        let movies = cache.get(&key, Subtype::Movie).unwrap();
        let series = cache.get(&key, Subtype::Series).unwrap();
        assert_eq!(movies[0].id, "tt1");
        assert_eq!(series[0].id, "tt2");
    }

    #[test]
    fn test_fresh_until_ttl_elapses() {
        let (clock, cache, key) = setup();
        cache.put(key.clone(), lists());

        clock.advance(Duration::seconds(CACHE_TTL_SECS as i64 - 1));
        assert!(cache.get(&key, Subtype::Movie).is_some());

        clock.advance(Duration::seconds(1));
        assert!(cache.get(&key, Subtype::Movie).is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_overwrite_resets_deadline() {
        let (clock, cache, key) = setup();
        cache.put(key.clone(), lists());

        clock.advance(Duration::days(6));
        cache.put(key.clone(), lists());

        // Past the first deadline, inside the second one
        clock.advance(Duration::days(2));
        assert!(cache.get(&key, Subtype::Series).is_some());
    }

    #[test]
    fn test_evict_is_idempotent() {
        let (_, cache, key) = setup();
        cache.put(key.clone(), lists());
        assert!(cache.evict(&key));
        assert!(!cache.evict(&key));
        assert!(cache.get(&key, Subtype::Movie).is_none());
    }

    #[test]
    fn test_purge_and_put_sweep_expired() {
        let (clock, cache, key) = setup();
        let other = QueryKey::new("villain", SortKey::New).unwrap();
        cache.put(key.clone(), lists());
        cache.put(other.clone(), lists());

        clock.advance(Duration::weeks(1));
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.purge_expired(), 2);

        cache.put(key.clone(), lists());
        clock.advance(Duration::weeks(1));
        cache.put(other, lists());
        assert_eq!(cache.len(), 1);
    }
}
