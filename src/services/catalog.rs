// src/services/catalog.rs

//! Catalog service.
//!
//! The public entry point: answers catalog requests from the cache and
//! falls back to a coalesced fetch cycle on a miss.

use std::sync::Arc;

use crate::error::{AppError, Result};
use crate::models::{CatalogResponse, Config, Entry, QueryKey, SortKey, Subtype};
use crate::pipeline::{FetchCoalescer, Paginator};
use crate::services::{EntryParser, ImdbKeywordSource, PageSource};
use crate::storage::{Clock, ExpiringCache, SystemClock};

/// Serves movie and series catalogs for keyword tags.
pub struct CatalogService {
    cache: Arc<ExpiringCache>,
    coalescer: FetchCoalescer<()>,
    paginator: Arc<Paginator>,
}

impl CatalogService {
    /// Create a service that fetches over HTTP on the wall clock.
    pub fn new(config: &Config) -> Result<Self> {
        let source = ImdbKeywordSource::new(&config.source)?;
        Self::with_parts(config, Arc::new(source), Arc::new(SystemClock))
    }

    /// Create a service around an explicit page source and clock.
    pub fn with_parts(
        config: &Config,
        source: Arc<dyn PageSource>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self> {
        let parser = EntryParser::new(&config.selectors)?;
        let paginator =
            Paginator::new(source, parser, &config.source).with_progress(config.logging.show_progress);

        Ok(Self {
            cache: Arc::new(ExpiringCache::with_clock(clock)),
            coalescer: FetchCoalescer::new(),
            paginator: Arc::new(paginator),
        })
    }

    /// Resolve a catalog request.
    ///
    /// `subtype` must be `movie` or `series`. A cached non-empty list is
    /// served as is; anything else goes through one shared fetch cycle per
    /// (tag, sort). An empty list after a successful cycle is a valid answer.
    pub async fn fetch_catalog(
        &self,
        tag: Option<&str>,
        sort: SortKey,
        subtype: &str,
    ) -> Result<CatalogResponse> {
        let subtype: Subtype = subtype.parse()?;
        let tag = tag.ok_or(AppError::MissingTag)?;
        let key = QueryKey::new(tag, sort)?;

        if let Some(entries) = cached_entries(&self.cache, &key, subtype) {
            log::debug!("Cache hit for {key} ({subtype})");
            return Ok(CatalogResponse::new(entries));
        }

        self.refresh(&key, subtype).await?;

        let entries = self.cache.get(&key, subtype).unwrap_or_default();
        Ok(CatalogResponse::new(entries))
    }

    /// Run one shared fetch cycle for `key`.
    ///
    /// The leader checks the cache again before paginating, since a cycle
    /// that finished after this caller's miss has already filled it.
    async fn refresh(&self, key: &QueryKey, subtype: Subtype) -> Result<()> {
        let paginator = Arc::clone(&self.paginator);
        let cache = Arc::clone(&self.cache);
        let cycle_key = key.clone();
        self.coalescer
            .run_exclusive(key, move || async move {
                if cached_entries(&cache, &cycle_key, subtype).is_some() {
                    log::debug!("{cycle_key} ({subtype}) already refreshed, skipping fetch");
                    return Ok(());
                }
                paginator.run_cycle(&cycle_key, &cache).await
            })
            .await
    }

    /// The cache backing this service.
    pub fn cache(&self) -> &ExpiringCache {
        &self.cache
    }

    /// Fetch cycles currently in flight.
    pub fn pending_fetches(&self) -> usize {
        self.coalescer.pending_count()
    }

    /// Abort every in-flight fetch cycle, failing its waiters.
    pub fn cancel_pending(&self) {
        self.coalescer.cancel_all();
    }
}

fn cached_entries(cache: &ExpiringCache, key: &QueryKey, subtype: Subtype) -> Option<Vec<Entry>> {
    cache.get(key, subtype).filter(|entries| !entries.is_empty())
}
