// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Fixed-capacity window cache over the most recent transactions.

use tokio::sync::RwLock;
use tracing::debug;

use super::{CacheLookup, CacheStats, LookupCounters};
use crate::config_types::CacheCapacity;
use crate::errors::CacheError;
use crate::store::Store;
use crate::types::tx::{Transaction, TxFilter};

/// Window cache holding the `capacity` most recent transactions, ordered by
/// `(height desc, index desc)`.
///
/// Records are not deduplicated on insert; the refresh path is trusted to
/// deliver each transaction once. Contents are a derived view rebuilt from
/// the durable store via [`init`](Self::init).
///
/// # Examples
///
/// ```rust,ignore
/// let cache = TxWindowCache::new(CacheCapacity::new(200));
/// cache.init(&store).await?;
///
/// let lookup = cache.page(&TxFilter::default().with_from(sender), 25, 0).await;
/// if !lookup.hit {
///     // not enough matches in the window; run the same query on the store
/// }
/// ```
#[derive(Debug)]
pub struct TxWindowCache {
    capacity: CacheCapacity,
    items: RwLock<Vec<Transaction>>,
    counters: LookupCounters,
}

impl TxWindowCache {
    /// Creates an empty cache with the given fixed capacity.
    pub fn new(capacity: CacheCapacity) -> Self {
        Self {
            capacity,
            items: RwLock::new(Vec::new()),
            counters: LookupCounters::default(),
        }
    }

    /// The configured capacity.
    pub fn capacity(&self) -> CacheCapacity {
        self.capacity
    }

    /// Replaces the window with the `capacity` most recent transactions from
    /// the store (block timestamps joined in by the store query).
    pub async fn init<S: Store + ?Sized>(&self, store: &S) -> Result<(), CacheError> {
        let mut txs = store
            .txs_page(&TxFilter::default(), self.capacity.as_usize(), 0)
            .await?;
        txs.truncate(self.capacity.as_usize());

        debug!(
            loaded = txs.len(),
            capacity = self.capacity.as_usize(),
            "initialized transaction window from store"
        );

        let mut items = self.items.write().await;
        *items = txs;
        Ok(())
    }

    /// Prepends the transactions of the newest block and slides the window.
    ///
    /// `new_txs` is prepended in the order given (the refresh path supplies
    /// newest-first store order); the oldest records slide out past
    /// `capacity`.
    pub async fn update(&self, new_txs: Vec<Transaction>) {
        if new_txs.is_empty() {
            return;
        }

        let mut items = self.items.write().await;
        let mut merged = new_txs;
        merged.extend(items.drain(..));
        merged.truncate(self.capacity.as_usize());
        *items = merged;
    }

    /// Looks up a transaction by exact hash.
    ///
    /// Linear scan over the window; no partial-match semantics.
    pub async fn by_hash(&self, hash: &str) -> CacheLookup<Transaction> {
        let items = self.items.read().await;
        let found = items.iter().find(|tx| tx.hash == hash).cloned();

        let hit = found.is_some();
        self.counters.record(hit);
        debug!(hash, hit, "transaction window hash lookup");

        match found {
            Some(tx) => CacheLookup::hit(tx),
            None => CacheLookup::miss(),
        }
    }

    /// Filtered paged lookup over the window.
    ///
    /// The equality filter is applied with a full scan preserving cache
    /// order. The lookup is a hit only when the filtered sequence is long
    /// enough to satisfy `offset + page_size` in its entirety; otherwise it
    /// is a miss carrying no data, even though a shorter prefix of matches
    /// may exist; the caller re-runs the query against the store.
    pub async fn page(
        &self,
        filter: &TxFilter,
        page_size: usize,
        offset: usize,
    ) -> CacheLookup<Vec<Transaction>> {
        let items = self.items.read().await;
        let filtered: Vec<&Transaction> = items.iter().filter(|tx| filter.matches(tx)).collect();

        let hit = (offset + page_size).saturating_sub(1) < filtered.len();
        self.counters.record(hit);
        debug!(
            matches = filtered.len(),
            page_size, offset, hit, "transaction window page lookup"
        );

        if !hit {
            return CacheLookup::miss();
        }

        CacheLookup::hit(
            filtered[offset..offset + page_size]
                .iter()
                .map(|tx| (*tx).clone())
                .collect(),
        )
    }

    /// Number of transactions currently in the window.
    pub async fn len(&self) -> usize {
        self.items.read().await.len()
    }

    /// True before the first `init`/`update` lands.
    pub async fn is_empty(&self) -> bool {
        self.items.read().await.is_empty()
    }

    /// Hit/miss statistics for the lookups.
    pub fn stats(&self) -> CacheStats {
        self.counters.snapshot()
    }
}
