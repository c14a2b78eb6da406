// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Fixed-capacity window cache over the most recent blocks.

use tokio::sync::RwLock;
use tracing::{debug, warn};

use super::{CacheStats, LookupCounters};
use crate::config_types::CacheCapacity;
use crate::errors::CacheError;
use crate::store::Store;
use crate::types::block::Block;

/// Window cache holding the `capacity` most recent blocks, strictly
/// descending by height.
///
/// The window is gap-free by construction: [`update`](Self::update) verifies
/// that an incoming block directly succeeds the current head and
/// resynchronizes from the store when it does not. Contents are a derived
/// view; [`init`](Self::init) rebuilds them from the durable store at any
/// time.
///
/// # Examples
///
/// ```rust,ignore
/// let cache = BlockWindowCache::new(CacheCapacity::new(100));
/// cache.init(&store).await?;
///
/// if cache.range_contains_offset(20, 0) {
///     let page = cache.page(20, 0).await;
///     // serve from memory
/// }
/// ```
#[derive(Debug)]
pub struct BlockWindowCache {
    capacity: CacheCapacity,
    items: RwLock<Vec<Block>>,
    counters: LookupCounters,
}

impl BlockWindowCache {
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

    /// Replaces the window with the `capacity` most recent blocks from the
    /// store.
    ///
    /// A store holding fewer blocks than `capacity` yields an undersized
    /// window (or an empty one) without error.
    pub async fn init<S: Store + ?Sized>(&self, store: &S) -> Result<(), CacheError> {
        let mut blocks = store.blocks_page(self.capacity.as_usize(), 0).await?;
        blocks.truncate(self.capacity.as_usize());

        debug!(
            loaded = blocks.len(),
            capacity = self.capacity.as_usize(),
            "initialized block window from store"
        );

        let mut items = self.items.write().await;
        *items = blocks;
        Ok(())
    }

    /// Prepends a newly observed block and slides the window.
    ///
    /// The incoming block must directly succeed the current head. On a
    /// height gap (skipped or repeated heights), the window is resynchronized
    /// with a full [`init`](Self::init) instead of being corrupted.
    pub async fn update<S: Store + ?Sized>(
        &self,
        block: Block,
        store: &S,
    ) -> Result<(), CacheError> {
        {
            let mut items = self.items.write().await;
            let gapped = items.first().is_some_and(|head| !head.is_parent_of(&block));
            if !gapped {
                items.insert(0, block);
                items.truncate(self.capacity.as_usize());
                return Ok(());
            }
            warn!(
                head_height = items[0].height,
                incoming_height = block.height,
                "height gap at window head, resynchronizing from store"
            );
        }
        // Gap path: the write lock is released before reloading
        self.init(store).await
    }

    /// Capacity-oracle check: is the window *large enough* for the requested
    /// page?
    ///
    /// True iff `[offset, offset + page_size)` lies entirely within
    /// `[0, capacity)`. This inspects only the configured capacity, never the
    /// actual item count: an empty cache with capacity 50 still reports
    /// `range_contains_offset(10, 0) == true`. Use
    /// [`contains_height`](Self::contains_height) for a true membership
    /// check.
    pub fn range_contains_offset(&self, page_size: usize, offset: usize) -> bool {
        let capacity = self.capacity.as_usize();
        let hit = offset <= capacity
            && page_size <= capacity
            && (offset + page_size).saturating_sub(1) < capacity;

        self.counters.record(hit);
        debug!(page_size, offset, hit, "block window range check");
        hit
    }

    /// True membership check: does the window currently hold `height`?
    ///
    /// True iff the window is non-empty and `height` falls between its
    /// oldest and newest heights inclusive.
    pub async fn contains_height(&self, height: u64) -> bool {
        let items = self.items.read().await;
        let hit = match (items.first(), items.last()) {
            (Some(newest), Some(oldest)) => height >= oldest.height && height <= newest.height,
            _ => false,
        };

        self.counters.record(hit);
        debug!(height, hit, "block window height check");
        hit
    }

    /// The sub-sequence `[offset, offset + page_size)` of the window.
    ///
    /// No bounds validation: an underpopulated window yields a shorter (or
    /// empty) page.
    pub async fn page(&self, page_size: usize, offset: usize) -> Vec<Block> {
        let items = self.items.read().await;
        items
            .get(offset..)
            .unwrap_or(&[])
            .iter()
            .take(page_size)
            .cloned()
            .collect()
    }

    /// The most recent block in the window, if any.
    pub async fn head(&self) -> Option<Block> {
        self.items.read().await.first().cloned()
    }

    /// The block at `height`, located by head-offset arithmetic.
    ///
    /// The window is indexed as `items[head_height - height]`; because the
    /// window is gap-free this lands on the requested block whenever the
    /// height is within the populated range.
    pub async fn by_height(&self, height: u64) -> Option<Block> {
        let items = self.items.read().await;
        let head_height = items.first()?.height;
        if height > head_height {
            return None;
        }
        items.get((head_height - height) as usize).cloned()
    }

    /// Number of blocks currently in the window.
    pub async fn len(&self) -> usize {
        self.items.read().await.len()
    }

    /// True before the first `init`/`update` lands.
    pub async fn is_empty(&self) -> bool {
        self.items.read().await.is_empty()
    }

    /// Hit/miss statistics for the boolean lookups.
    pub fn stats(&self) -> CacheStats {
        self.counters.snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use chrono::{TimeZone, Utc};

    fn block_at(height: u64) -> Block {
        Block {
            height,
            hash: format!("{height:08X}"),
            time: Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap(),
            num_txs: 0,
            header: serde_json::Value::Null,
        }
    }

    async fn seeded_store(heights: std::ops::RangeInclusive<u64>) -> MemoryStore {
        let store = MemoryStore::new();
        for height in heights {
            store.persist_block(&block_at(height)).await.unwrap();
        }
        store
    }

    #[tokio::test]
    async fn test_init_loads_newest_blocks() {
        let store = seeded_store(1..=100).await;
        let cache = BlockWindowCache::new(CacheCapacity::new(10));
        cache.init(&store).await.unwrap();

        assert_eq!(cache.len().await, 10);
        assert_eq!(cache.head().await.unwrap().height, 100);

        let heights: Vec<u64> = cache.page(10, 0).await.iter().map(|b| b.height).collect();
        assert_eq!(heights, (91..=100).rev().collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn test_init_undersized_store() {
        let store = seeded_store(1..=3).await;
        let cache = BlockWindowCache::new(CacheCapacity::new(10));
        cache.init(&store).await.unwrap();

        assert_eq!(cache.len().await, 3);
        assert_eq!(cache.head().await.unwrap().height, 3);
    }

    #[tokio::test]
    async fn test_init_empty_store_yields_empty_cache() {
        let store = MemoryStore::new();
        let cache = BlockWindowCache::new(CacheCapacity::new(10));
        cache.init(&store).await.unwrap();
        assert!(cache.is_empty().await);
    }

    #[tokio::test]
    async fn test_update_prepends_and_slides() {
        let store = seeded_store(1..=100).await;
        let cache = BlockWindowCache::new(CacheCapacity::new(5));
        cache.init(&store).await.unwrap();

        cache.update(block_at(101), &store).await.unwrap();

        assert_eq!(cache.len().await, 5);
        let heights: Vec<u64> = cache.page(5, 0).await.iter().map(|b| b.height).collect();
        assert_eq!(heights, vec![101, 100, 99, 98, 97]);
    }

    #[tokio::test]
    async fn test_update_into_empty_cache() {
        let store = MemoryStore::new();
        let cache = BlockWindowCache::new(CacheCapacity::new(5));
        cache.update(block_at(1), &store).await.unwrap();
        assert_eq!(cache.head().await.unwrap().height, 1);
    }

    #[tokio::test]
    async fn test_update_gap_resynchronizes() {
        let store = seeded_store(1..=50).await;
        let cache = BlockWindowCache::new(CacheCapacity::new(5));
        cache.init(&store).await.unwrap();
        assert_eq!(cache.head().await.unwrap().height, 50);

        // Heights 51..=53 land in the store but the cache only hears about 53
        for height in 51..=53 {
            store.persist_block(&block_at(height)).await.unwrap();
        }
        cache.update(block_at(53), &store).await.unwrap();

        // Window reloaded from the store: still descending, no gap
        let heights: Vec<u64> = cache.page(5, 0).await.iter().map(|b| b.height).collect();
        assert_eq!(heights, vec![53, 52, 51, 50, 49]);
    }

    #[tokio::test]
    async fn test_update_repeated_height_resynchronizes() {
        let store = seeded_store(1..=10).await;
        let cache = BlockWindowCache::new(CacheCapacity::new(5));
        cache.init(&store).await.unwrap();

        // Re-delivery of the current head is a gap violation, not a prepend
        cache.update(block_at(10), &store).await.unwrap();

        let heights: Vec<u64> = cache.page(5, 0).await.iter().map(|b| b.height).collect();
        assert_eq!(heights, vec![10, 9, 8, 7, 6]);
    }

    #[test]
    fn test_range_contains_offset_is_capacity_oracle() {
        let cache = BlockWindowCache::new(CacheCapacity::new(50));

        // Empty cache: the oracle only inspects capacity
        assert!(cache.range_contains_offset(10, 0));
        assert!(cache.range_contains_offset(50, 0));
        assert!(cache.range_contains_offset(10, 40));

        // Page would run past the window
        assert!(!cache.range_contains_offset(11, 40));
        assert!(!cache.range_contains_offset(51, 0));
        assert!(!cache.range_contains_offset(10, 41));

        // Offset beyond capacity
        assert!(!cache.range_contains_offset(1, 51));
    }

    #[tokio::test]
    async fn test_contains_height_inclusive_bounds() {
        let store = seeded_store(1..=100).await;
        let cache = BlockWindowCache::new(CacheCapacity::new(10));
        cache.init(&store).await.unwrap();

        assert!(cache.contains_height(91).await);
        assert!(cache.contains_height(95).await);
        assert!(cache.contains_height(100).await);

        assert!(!cache.contains_height(90).await);
        assert!(!cache.contains_height(101).await);
    }

    #[tokio::test]
    async fn test_contains_height_empty_cache() {
        let cache = BlockWindowCache::new(CacheCapacity::new(10));
        assert!(!cache.contains_height(1).await);
    }

    #[tokio::test]
    async fn test_page_out_of_range_offset_is_empty() {
        let store = seeded_store(1..=5).await;
        let cache = BlockWindowCache::new(CacheCapacity::new(5));
        cache.init(&store).await.unwrap();

        assert!(cache.page(3, 10).await.is_empty());
        // Partial page at the tail
        assert_eq!(cache.page(10, 3).await.len(), 2);
    }

    #[tokio::test]
    async fn test_by_height_offset_arithmetic() {
        let store = seeded_store(1..=100).await;
        let cache = BlockWindowCache::new(CacheCapacity::new(10));
        cache.init(&store).await.unwrap();

        assert_eq!(cache.by_height(100).await.unwrap().height, 100);
        assert_eq!(cache.by_height(95).await.unwrap().height, 95);
        assert_eq!(cache.by_height(91).await.unwrap().height, 91);

        // Slid out of the window
        assert!(cache.by_height(90).await.is_none());
        // Ahead of the head
        assert!(cache.by_height(101).await.is_none());
    }

    #[tokio::test]
    async fn test_stats_track_boolean_lookups() {
        let store = seeded_store(1..=10).await;
        let cache = BlockWindowCache::new(CacheCapacity::new(5));
        cache.init(&store).await.unwrap();

        cache.range_contains_offset(5, 0); // hit
        cache.contains_height(10).await; // hit
        cache.contains_height(1).await; // miss

        let stats = cache.stats();
        assert_eq!(stats.hits, 2);
        assert_eq!(stats.misses, 1);
    }
}
