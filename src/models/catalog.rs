//! Aggregated catalog results and the response served to callers.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{Entry, Subtype};

/// How long an aggregated catalog stays fresh (one week).
///
/// Used both as the client-visible `cacheMaxAge` and as the eviction delay.
pub const CACHE_TTL_SECS: u64 = 604_800;

/// Maximum number of list pages fetched per cycle.
pub const MAX_PAGES: u32 = 2;

/// Pixel width requested for poster images.
pub const POSTER_WIDTH: u32 = 250;

/// Movie and series lists merged across every page of one fetch cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogLists {
    pub movies: Vec<Entry>,
    pub series: Vec<Entry>,
}

impl CatalogLists {
    /// Route an entry into the list for its subtype.
    pub fn push(&mut self, entry: Entry) {
        match entry.subtype {
            Subtype::Movie => self.movies.push(entry),
            Subtype::Series => self.series.push(entry),
        }
    }

    pub fn extend(&mut self, entries: impl IntoIterator<Item = Entry>) {
        for entry in entries {
            self.push(entry);
        }
    }

    pub fn get(&self, subtype: Subtype) -> &[Entry] {
        match subtype {
            Subtype::Movie => &self.movies,
            Subtype::Series => &self.series,
        }
    }

    pub fn len(&self) -> usize {
        self.movies.len() + self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty() && self.series.is_empty()
    }
}

/// A cached catalog for one query key.
#[derive(Debug, Clone)]
pub struct AggregatedResult {
    pub lists: CatalogLists,
    pub created_at: DateTime<Utc>,
    pub ttl: Duration,
}

impl AggregatedResult {
    pub fn new(lists: CatalogLists, created_at: DateTime<Utc>, ttl: Duration) -> Self {
        Self {
            lists,
            created_at,
            ttl,
        }
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.created_at + self.ttl
    }

    /// Fresh strictly before `created_at + ttl`.
    pub fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at()
    }
}

/// What a catalog request returns.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CatalogResponse {
    #[serde(rename = "metas")]
    pub entries: Vec<Entry>,

    #[serde(rename = "cacheMaxAge")]
    pub cache_max_age_secs: u64,
}

impl CatalogResponse {
    pub fn new(entries: Vec<Entry>) -> Self {
        Self {
            entries,
            cache_max_age_secs: CACHE_TTL_SECS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str, subtype: Subtype) -> Entry {
        Entry {
            id: id.to_string(),
            name: id.to_string(),
            year: None,
            subtype,
            poster: None,
        }
    }

    #[test]
    fn test_lists_partition_by_subtype() {
        let mut lists = CatalogLists::default();
        lists.extend([
            entry("tt1", Subtype::Movie),
            entry("tt2", Subtype::Series),
            entry("tt3", Subtype::Movie),
        ]);
        let movie_ids: Vec<_> = lists.get(Subtype::Movie).iter().map(|e| &e.id).collect();
        assert_eq!(movie_ids, ["tt1", "tt3"]);
        assert_eq!(lists.get(Subtype::Series).len(), 1);
        assert_eq!(lists.len(), 3);
    }

    #[test]
    fn test_freshness_boundary() {
        let created = DateTime::from_timestamp(1_000, 0).unwrap();
        let ttl = Duration::seconds(CACHE_TTL_SECS as i64);
        let result = AggregatedResult::new(CatalogLists::default(), created, ttl);
        assert!(result.is_fresh(created + ttl - Duration::seconds(1)));
        assert!(!result.is_fresh(created + ttl));
    }

    #[test]
    fn test_response_wire_names() {
        let json = serde_json::to_value(CatalogResponse::new(vec![])).unwrap();
        assert_eq!(json["cacheMaxAge"], 604_800);
        assert!(json["metas"].as_array().unwrap().is_empty());
    }
}
