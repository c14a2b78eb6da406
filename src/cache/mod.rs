// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Sliding-window caches over the newest ledger records.
//!
//! This module provides the recent-history layer of lakescan:
//!
//! - [`BlockWindowCache`]: the most recent N blocks, strictly descending by
//!   height
//! - [`TxWindowCache`]: the most recent N transactions, ordered by
//!   `(height desc, index desc)`
//! - [`CacheRefresher`]: the loop that keeps both windows tracking the chain
//!   head from the durable store
//!
//! Both caches are derived, discardable views: the durable store remains the
//! source of truth, and a restart rebuilds the windows via `init`.
//!
//! # Concurrency
//!
//! Each cache holds its items behind a single `tokio::sync::RwLock`; reads
//! may run concurrently with each other but never overlap an in-progress
//! `init`/`update`. The host must not run two refresh cycles at once;
//! [`CacheRefresher::run`] owns the loop and coalesces triggers to guarantee
//! this.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

mod blocks;
mod refresh;
mod txs;

pub use blocks::BlockWindowCache;
pub use refresh::CacheRefresher;
pub use txs::TxWindowCache;

/// Outcome of a hit/miss-aware cache lookup.
///
/// A miss carries no partial data: callers are expected to fall back to the
/// durable store with the same query.
///
/// # Examples
///
/// ```
/// use lakescan::CacheLookup;
///
/// let found = CacheLookup::hit(7u64);
/// assert!(found.hit);
///
/// let absent: CacheLookup<u64> = CacheLookup::miss();
/// assert!(absent.data.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheLookup<T> {
    /// Whether the cache could fully answer the query
    pub hit: bool,

    /// The answer, present only on a hit
    pub data: Option<T>,
}

impl<T> CacheLookup<T> {
    /// A successful lookup carrying its answer.
    pub fn hit(data: T) -> Self {
        Self {
            hit: true,
            data: Some(data),
        }
    }

    /// A failed lookup. Carries nothing; fall back to the store.
    pub fn miss() -> Self {
        Self {
            hit: false,
            data: None,
        }
    }
}

/// Hit/miss statistics for a window cache.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CacheStats {
    /// Number of lookups the cache could fully answer
    pub hits: u64,
    /// Number of lookups that fell through to the store
    pub misses: u64,
}

impl CacheStats {
    /// Cache hit rate as a percentage (0.0 to 100.0).
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            (self.hits as f64 / total as f64) * 100.0
        }
    }
}

impl std::fmt::Display for CacheStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "hits={}, misses={}, hit_rate={:.1}%",
            self.hits,
            self.misses,
            self.hit_rate()
        )
    }
}

/// Lock-free hit/miss counters shared by the read paths.
///
/// Counters sit outside the item lock so that read operations can stay on
/// the read side of the `RwLock`.
#[derive(Debug, Default)]
pub(crate) struct LookupCounters {
    hits: AtomicU64,
    misses: AtomicU64,
}

impl LookupCounters {
    pub(crate) fn record(&self, hit: bool) {
        if hit {
            self.hits.fetch_add(1, Ordering::Relaxed);
        } else {
            self.misses.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub(crate) fn snapshot(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }
}
