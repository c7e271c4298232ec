//! Fetch pipeline for catalog requests.
//!
//! - `FetchCoalescer`: one in-flight fetch per query key
//! - `Paginator`: bounded page-by-page fetch that fills the cache

pub mod coalesce;
pub mod paginate;

pub use coalesce::FetchCoalescer;
pub use paginate::Paginator;
