//! This module provides the [`PollerStats`].
use crate::cache_padded::CachePaddedAtomicU64;
use std::fmt;
use std::sync::atomic::Ordering;

/// Counters of a [`Poller`](crate::Poller), readable from any thread.
///
/// All counters only grow, across every run of the poller.
#[derive(Default)]
pub struct PollerStats {
    processed: CachePaddedAtomicU64,
    failed: CachePaddedAtomicU64,
    runs_started: CachePaddedAtomicU64,
}

impl PollerStats {
    /// Returns the number of items handed to the handler, failed calls included.
    pub fn processed(&self) -> u64 {
        self.processed.load(Ordering::Acquire)
    }

    /// Returns the number of handler calls that returned an error or panicked.
    pub fn failed(&self) -> u64 {
        self.failed.load(Ordering::Relaxed)
    }

    /// Returns the number of worker threads spawned so far.
    pub fn runs_started(&self) -> u64 {
        self.runs_started.load(Ordering::Relaxed)
    }

    /// Publishes everything the worker did for the item, `failed` included.
    pub(crate) fn record_processed(&self) {
        self.processed.fetch_add(1, Ordering::Release);
    }

    pub(crate) fn record_failed(&self) {
        self.failed.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_run_started(&self) {
        self.runs_started.fetch_add(1, Ordering::Relaxed);
    }
}

impl fmt::Debug for PollerStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PollerStats")
            .field("processed", &self.processed())
            .field("failed", &self.failed())
            .field("runs_started", &self.runs_started())
            .finish()
    }
}
