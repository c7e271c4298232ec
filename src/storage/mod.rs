//! In-memory storage for aggregated catalogs.
//!
//! Results live only for the lifetime of the process:
//!
//! ```text
//! ExpiringCache
//! └── QueryKey ─► AggregatedResult { movies, series, created_at, ttl }
//! ```
//!
//! Time is read through a [`Clock`] so expiry can be driven by hand in tests.

pub mod cache;

use std::sync::Mutex;

use chrono::{DateTime, Duration, Utc};

// Re-export for convenience
pub use cache::ExpiringCache;

/// Source of the current time.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock that only moves when told to.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(start),
        }
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap_or_else(|e| e.into_inner());
        *now += by;
    }

    pub fn set(&self, to: DateTime<Utc>) {
        *self.now.lock().unwrap_or_else(|e| e.into_inner()) = to;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap_or_else(|e| e.into_inner())
    }
}
