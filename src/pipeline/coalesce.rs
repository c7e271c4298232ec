// src/pipeline/coalesce.rs

//! Fetch coalescing.
//!
//! Concurrent requests for the same key share one fetch. The first caller
//! spawns the operation and registers a shared handle to its outcome; later
//! callers find the handle and await it instead of starting their own.
//!
//! ```text
//! caller A ─┐
//! caller B ─┼─► pending[key] ─► spawned operation ─► outcome (cloned to A, B, C)
//! caller C ─┘
//! ```
//!
//! The pending entry is removed inside the spawned task before the outcome
//! is published, so a caller that arrives after completion always starts a
//! fresh cycle.

use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use futures::future::{BoxFuture, FutureExt, Shared};
use tokio::sync::watch;

use crate::error::{AppError, Result};
use crate::models::QueryKey;

type SharedFetch<T> = Shared<BoxFuture<'static, Result<T>>>;
type PendingMap<T> = Arc<Mutex<HashMap<QueryKey, SharedFetch<T>>>>;

/// Runs at most one operation per key at a time.
pub struct FetchCoalescer<T> {
    pending: PendingMap<T>,
    cancel: watch::Sender<u64>,
    runs: AtomicUsize,
}

impl<T> FetchCoalescer<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub fn new() -> Self {
        let (cancel, _) = watch::channel(0);
        Self {
            pending: Arc::new(Mutex::new(HashMap::new())),
            cancel,
            runs: AtomicUsize::new(0),
        }
    }

    /// Run `operation` for `key`, or join the run already in flight.
    ///
    /// `operation` is only invoked when no run is pending for `key`. Every
    /// caller receives a clone of the same outcome.
    pub async fn run_exclusive<F, Fut>(&self, key: &QueryKey, operation: F) -> Result<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>> + Send + 'static,
    {
        let shared = {
            let mut pending = lock(&self.pending);
            match pending.get(key) {
                Some(existing) => {
                    log::debug!("Joining in-flight fetch for {key}");
                    existing.clone()
                }
                None => {
                    let shared = self.spawn(key.clone(), operation());
                    pending.insert(key.clone(), shared.clone());
                    shared
                }
            }
        };
        shared.await
    }

    /// Release every waiter of every in-flight run with `Cancelled`.
    pub fn cancel_all(&self) {
        let pending = self.pending_count();
        if pending > 0 {
            log::warn!("Cancelling {pending} in-flight fetch(es)");
        }
        self.cancel.send_modify(|generation| *generation += 1);
    }

    /// Keys with a run currently in flight.
    pub fn pending_count(&self) -> usize {
        lock(&self.pending).len()
    }

    /// Operations started since creation.
    pub fn runs_started(&self) -> usize {
        self.runs.load(Ordering::SeqCst)
    }

    fn spawn<Fut>(&self, key: QueryKey, operation: Fut) -> SharedFetch<T>
    where
        Fut: Future<Output = Result<T>> + Send + 'static,
    {
        self.runs.fetch_add(1, Ordering::SeqCst);
        let mut cancelled = self.cancel.subscribe();

        let task_pending = Arc::clone(&self.pending);
        let task_key = key.clone();
        let handle = tokio::spawn(async move {
            let outcome = tokio::select! {
                outcome = operation => outcome,
                _ = cancelled.changed() => Err(AppError::Cancelled(task_key.to_string())),
            };
            lock(&task_pending).remove(&task_key);
            outcome
        });

        let pending = Arc::clone(&self.pending);
        async move {
            handle.await.unwrap_or_else(|e| {
                // The task never reached its own cleanup.
                lock(&pending).remove(&key);
                Err(AppError::Task(e.to_string()))
            })
        }
        .boxed()
        .shared()
    }
}

impl<T> Default for FetchCoalescer<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

fn lock<T>(pending: &PendingMap<T>) -> MutexGuard<'_, HashMap<QueryKey, SharedFetch<T>>> {
    pending.lock().unwrap_or_else(|e| e.into_inner())
}
