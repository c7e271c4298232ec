//! Application configuration structures.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::models::{ListSelectors, SortKey};

/// Marker every accepted keyword search URL carries.
const KEYWORD_URL_MARKER: &str = ".imdb.com/search/keyword?keywords=";

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Remote list source and HTTP behavior
    #[serde(default)]
    pub source: SourceConfig,

    /// Which catalog to serve
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Page scraping selectors
    #[serde(default)]
    pub selectors: ListSelectors,

    /// Log output settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.source.user_agent.trim().is_empty() {
            return Err(AppError::validation("source.user_agent is empty"));
        }
        if self.source.accept_language.trim().is_empty() {
            return Err(AppError::validation("source.accept_language is empty"));
        }
        if self.source.timeout_secs == 0 {
            return Err(AppError::validation("source.timeout_secs must be > 0"));
        }
        if self.source.page_timeout_secs == 0 {
            return Err(AppError::validation("source.page_timeout_secs must be > 0"));
        }
        url::Url::parse(&self.source.base_url)
            .map_err(|e| AppError::validation(format!("source.base_url is invalid: {e}")))?;
        if self.catalog.tag_url.is_some() || self.catalog.tag.is_some() {
            self.catalog.resolve_tag()?;
        }
        Ok(())
    }
}

/// Remote source and HTTP client settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Origin that serves the keyword search pages
    #[serde(default = "defaults::base_url")]
    pub base_url: String,

    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Accept-Language header for HTTP requests
    #[serde(default = "defaults::accept_language")]
    pub accept_language: String,

    /// Client-level request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// Upper bound for fetching one page, retries excluded
    #[serde(default = "defaults::page_timeout")]
    pub page_timeout_secs: u64,

    /// Extra attempts after a failed page fetch
    #[serde(default = "defaults::retry_attempts")]
    pub retry_attempts: u32,

    /// Base delay between attempts; grows linearly per attempt
    #[serde(default = "defaults::retry_backoff")]
    pub retry_backoff_ms: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::base_url(),
            user_agent: defaults::user_agent(),
            accept_language: defaults::accept_language(),
            timeout_secs: defaults::timeout(),
            page_timeout_secs: defaults::page_timeout(),
            retry_attempts: defaults::retry_attempts(),
            retry_backoff_ms: defaults::retry_backoff(),
        }
    }
}

/// Which keyword catalog to serve by default.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Keyword search URL, e.g. `https://www.imdb.com/search/keyword?keywords=hero`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag_url: Option<String>,

    /// Bare keyword, used when no `tag_url` is given
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,

    /// Sort order label
    #[serde(default)]
    pub sort: SortKey,
}

impl CatalogConfig {
    /// Resolve the configured keyword, preferring `tag_url` over `tag`.
    pub fn resolve_tag(&self) -> Result<String> {
        if let Some(tag_url) = &self.tag_url {
            return tag_from_url(tag_url);
        }
        self.tag
            .as_deref()
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .map(str::to_string)
            .ok_or(AppError::MissingTag)
    }
}

/// Extract the decoded keyword from a keyword search URL.
pub fn tag_from_url(tag_url: &str) -> Result<String> {
    if !tag_url.contains(KEYWORD_URL_MARKER) {
        return Err(AppError::config(format!(
            "invalid keyword URL '{tag_url}', expected https://www.imdb.com/search/keyword?keywords=<tag>&..."
        )));
    }
    let url = url::Url::parse(tag_url)?;
    let tag = url
        .query_pairs()
        .find(|(name, _)| name == "keywords")
        .map(|(_, value)| value.trim().to_string())
        .unwrap_or_default();
    if tag.is_empty() {
        return Err(AppError::MissingTag);
    }
    Ok(tag)
}

/// Log output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default log filter when RUST_LOG is unset
    #[serde(default = "defaults::log_level")]
    pub level: String,

    /// Log per-page progress at info level
    #[serde(default)]
    pub show_progress: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: defaults::log_level(),
            show_progress: false,
        }
    }
}

mod defaults {
    // Source defaults
    pub fn base_url() -> String {
        "https://www.imdb.com".into()
    }
    pub fn user_agent() -> String {
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/69.0.3497.100 Safari/537.36".into()
    }
    pub fn accept_language() -> String {
        "en-US,en;q=0.8".into()
    }
    pub fn timeout() -> u64 {
        30
    }
    pub fn page_timeout() -> u64 {
        20
    }
    pub fn retry_attempts() -> u32 {
        2
    }
    pub fn retry_backoff() -> u64 {
        500
    }

    // Logging defaults
    pub fn log_level() -> String {
        "info".into()
    }
}
