//! Service layer for the catalog application.
//!
//! This module contains the business logic for:
//! - Page parsing (`EntryParser`)
//! - Page fetching (`PageSource`, `ImdbKeywordSource`)
//! - Catalog requests (`CatalogService`)

mod catalog;
pub(crate) mod parser;
pub(crate) mod source;

pub use catalog::CatalogService;
pub use parser::{EntryParser, ParsedPage};
pub use source::{ImdbKeywordSource, PageSource};
