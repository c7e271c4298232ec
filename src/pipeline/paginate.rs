// src/pipeline/paginate.rs

//! Pagination driver.
//!
//! Fetches list pages one after another, merges the parsed entries in page
//! order, and commits the merged catalog to the cache. At most `MAX_PAGES`
//! pages are fetched per cycle; a page without any entry blocks ends the
//! cycle early.

use std::sync::Arc;
use std::time::Duration;

use crate::error::{AppError, Result};
use crate::models::{CatalogLists, MAX_PAGES, QueryKey, SourceConfig};
use crate::services::{EntryParser, PageSource};
use crate::storage::ExpiringCache;

/// Drives one fetch cycle per call.
pub struct Paginator {
    source: Arc<dyn PageSource>,
    parser: EntryParser,
    max_pages: u32,
    page_timeout: Duration,
    retry_attempts: u32,
    retry_backoff: Duration,
    show_progress: bool,
}

impl Paginator {
    pub fn new(source: Arc<dyn PageSource>, parser: EntryParser, config: &SourceConfig) -> Self {
        Self {
            source,
            parser,
            max_pages: MAX_PAGES,
            page_timeout: Duration::from_secs(config.page_timeout_secs),
            retry_attempts: config.retry_attempts,
            retry_backoff: Duration::from_millis(config.retry_backoff_ms),
            show_progress: false,
        }
    }

    /// Log each page at info level instead of debug.
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Fetch, merge, and cache the catalog for `key`.
    ///
    /// Nothing is written when a page fails or when no entry survives.
    pub async fn run_cycle(&self, key: &QueryKey, cache: &ExpiringCache) -> Result<()> {
        let lists = self.collect(key).await?;
        if lists.is_empty() {
            log::warn!("No usable entries for {key}");
            return Err(AppError::EmptyResult);
        }

        log::info!(
            "Fetched {} movies and {} series for {key}",
            lists.movies.len(),
            lists.series.len()
        );
        cache.put(key.clone(), lists);
        Ok(())
    }

    /// Fetch pages in order and merge their entries.
    pub async fn collect(&self, key: &QueryKey) -> Result<CatalogLists> {
        let mut lists = CatalogLists::default();

        for page in 1..=self.max_pages {
            let body = self.fetch_with_retry(key, page).await?;
            let parsed = self.parser.parse_page(&body);

            let message = format!(
                "{key} page {page}/{}: {} kept, {} dropped",
                self.max_pages,
                parsed.entries.len(),
                parsed.dropped
            );
            if self.show_progress {
                log::info!("{message}");
            } else {
                log::debug!("{message}");
            }

            lists.extend(parsed.entries);
            if !parsed.found_blocks {
                break;
            }
        }

        Ok(lists)
    }

    async fn fetch_with_retry(&self, key: &QueryKey, page: u32) -> Result<String> {
        let mut attempt = 0;
        loop {
            match self.fetch_once(key, page).await {
                Ok(body) => return Ok(body),
                Err(error) if error.is_transport() && attempt < self.retry_attempts => {
                    attempt += 1;
                    let delay = self.backoff_delay(attempt);
                    log::warn!(
                        "Fetching {key} page {page} failed ({error}), retry {attempt}/{} in {delay:?}",
                        self.retry_attempts
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(error) => return Err(error),
            }
        }
    }

    /// Linear backoff, saturating instead of overflowing.
    fn backoff_delay(&self, attempt: u32) -> Duration {
        self.retry_backoff.saturating_mul(attempt)
    }

    async fn fetch_once(&self, key: &QueryKey, page: u32) -> Result<String> {
        tokio::time::timeout(self.page_timeout, self.source.fetch_page(key, page))
            .await
            .map_err(|_| {
                AppError::timeout(format!("{key} page {page}"), self.page_timeout.as_secs())
            })?
    }
}
