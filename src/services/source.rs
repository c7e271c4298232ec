// src/services/source.rs

//! Page sources.
//!
//! A `PageSource` fetches the raw body of one list page. The pagination
//! driver only talks to this trait, so tests can swap in canned pages.

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::REFERER;

use crate::error::Result;
use crate::models::{QueryKey, SourceConfig};
use crate::utils::http::{create_async_client, fetch_text};
use crate::utils::url::{list_page_url, referer_url};

/// Trait for list page backends.
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Fetch the body of `page` (1-based) for `key`.
    async fn fetch_page(&self, key: &QueryKey, page: u32) -> Result<String>;
}

/// Keyword list pages served over HTTP.
pub struct ImdbKeywordSource {
    client: Client,
    base_url: String,
}

impl ImdbKeywordSource {
    /// Create a source with its own configured HTTP client.
    pub fn new(config: &SourceConfig) -> Result<Self> {
        let client = create_async_client(config)?;
        Ok(Self::with_client(client, &config.base_url))
    }

    /// Create a source around an existing client.
    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl PageSource for ImdbKeywordSource {
    async fn fetch_page(&self, key: &QueryKey, page: u32) -> Result<String> {
        let url = list_page_url(&self.base_url, key, page)?;
        let referer = referer_url(&self.base_url, key)?;
        log::debug!("GET {url}");

        let request = self.client.get(url).header(REFERER, referer.as_str());
        fetch_text(request).await
    }
}
