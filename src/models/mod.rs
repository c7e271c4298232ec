// src/models/mod.rs

//! Domain models for the catalog service.
//!
//! This module contains all data structures used throughout the application,
//! organized by their primary purpose.

mod catalog;
mod config;
mod entry;
mod query;
mod selectors;

// Re-export all public types
pub use catalog::{
    AggregatedResult, CACHE_TTL_SECS, CatalogLists, CatalogResponse, MAX_PAGES, POSTER_WIDTH,
};
pub use config::{CatalogConfig, Config, LoggingConfig, SourceConfig, tag_from_url};
pub use entry::{Entry, Subtype};
pub use query::{QueryKey, SortKey, normalize_tag};
pub use selectors::ListSelectors;
