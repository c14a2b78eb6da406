// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Refresh loop keeping the window caches tracking the chain head.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use super::{BlockWindowCache, TxWindowCache};
use crate::config_types::TransactionCount;
use crate::errors::CacheError;
use crate::spans;
use crate::store::Store;
use crate::types::tx::TxFilter;

/// Drives both window caches from the durable store.
///
/// One refresh cycle runs five steps, each awaiting its collaborator:
///
/// 1. query the latest persisted block,
/// 2. prepend it to the block window,
/// 3. read its transaction count,
/// 4. query exactly that many newest transactions,
/// 5. prepend them to the transaction window.
///
/// A failing step aborts the cycle; mutations already applied stay applied
/// and the next trigger retries from scratch. Reads keep serving the
/// previous snapshot throughout.
///
/// The refresher owns the caches it drives: construct it once at startup
/// and hand clones of the [`Arc`]ed caches to whatever serves reads.
pub struct CacheRefresher<S: ?Sized> {
    store: Arc<S>,
    blocks: Arc<BlockWindowCache>,
    txs: Arc<TxWindowCache>,
    poll_interval: Duration,
}

impl<S: Store + ?Sized> CacheRefresher<S> {
    /// Creates a refresher driving the given caches from `store`.
    ///
    /// `poll_interval` is the fallback cadence used when no new-block
    /// trigger arrives (roughly one block time is a good choice).
    pub fn new(
        store: Arc<S>,
        blocks: Arc<BlockWindowCache>,
        txs: Arc<TxWindowCache>,
        poll_interval: Duration,
    ) -> Self {
        Self {
            store,
            blocks,
            txs,
            poll_interval,
        }
    }

    /// The block window this refresher drives.
    pub fn blocks(&self) -> &Arc<BlockWindowCache> {
        &self.blocks
    }

    /// The transaction window this refresher drives.
    pub fn txs(&self) -> &Arc<TxWindowCache> {
        &self.txs
    }

    /// Populates both windows from the store.
    ///
    /// Called once at startup, before the first refresh cycle.
    pub async fn init(&self) -> Result<(), CacheError> {
        let span = spans::cache_init();
        let _guard = span.enter();

        self.blocks.init(self.store.as_ref()).await?;
        self.txs.init(self.store.as_ref()).await?;

        info!(
            blocks = self.blocks.len().await,
            txs = self.txs.len().await,
            "window caches initialized from store"
        );
        Ok(())
    }

    /// Runs one refresh cycle.
    pub async fn refresh(&self) -> Result<(), CacheError> {
        let span = spans::refresh();
        let _guard = span.enter();

        let latest = self
            .store
            .latest_block()
            .await?
            .ok_or(CacheError::EmptyStore)?;

        let height = latest.height;
        let num_txs = TransactionCount::from(latest.num_txs);

        // Fallback polls fire whether or not a block landed since the last
        // cycle; an unchanged head means there is nothing to prepend.
        if let Some(head) = self.blocks.head().await {
            if head.height == height {
                debug!(height, "store head unchanged, skipping refresh");
                return Ok(());
            }
        }

        self.blocks.update(latest, self.store.as_ref()).await?;

        let txs = self
            .store
            .txs_page(&TxFilter::default(), num_txs.as_usize(), 0)
            .await?;
        self.txs.update(txs).await;

        info!(height, num_txs = num_txs.as_usize(), "refreshed window caches");
        Ok(())
    }

    /// Refresh loop: one cycle per new-block trigger, with a fallback poll.
    ///
    /// `trigger` carries the latest observed height; bursts of triggers
    /// coalesce into a single cycle, so at most one refresh is ever in
    /// flight. The loop ends when the trigger channel closes. Cycle failures
    /// are logged and the previous snapshot keeps serving.
    pub async fn run(&self, mut trigger: watch::Receiver<u64>) {
        let mut ticker = tokio::time::interval(self.poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                changed = trigger.changed() => {
                    if changed.is_err() {
                        debug!("new-block trigger closed, stopping refresh loop");
                        return;
                    }
                }
                _ = ticker.tick() => {}
            }

            if let Err(e) = self.refresh().await {
                warn!(error = %e, "cache refresh failed, serving previous snapshot");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config_types::CacheCapacity;
    use crate::store::MemoryStore;
    use crate::types::block::Block;
    use crate::types::tx::Transaction;
    use chrono::{TimeZone, Utc};

    fn block_at(height: u64, num_txs: u64) -> Block {
        Block {
            height,
            hash: format!("{height:08X}"),
            time: Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap(),
            num_txs,
            header: serde_json::Value::Null,
        }
    }

    fn tx_at(height: u64, index: u32) -> Transaction {
        Transaction {
            height,
            index,
            hash: format!("{height}-{index}"),
            from: None,
            to: None,
            payer: None,
            value: 0,
            gas_limit: 0,
            gas_used: 0,
            nonce: 0,
            data: serde_json::Value::Null,
            return_value: None,
            result: Default::default(),
            time: None,
        }
    }

    fn refresher(store: Arc<MemoryStore>) -> CacheRefresher<MemoryStore> {
        CacheRefresher::new(
            store,
            Arc::new(BlockWindowCache::new(CacheCapacity::new(5))),
            Arc::new(TxWindowCache::new(CacheCapacity::new(10))),
            Duration::from_secs(5),
        )
    }

    #[tokio::test]
    async fn test_refresh_empty_store_errors() {
        let refresher = refresher(Arc::new(MemoryStore::new()));
        let err = refresher.refresh().await.unwrap_err();
        assert!(matches!(err, CacheError::EmptyStore));
        assert!(refresher.blocks().is_empty().await);
    }

    #[tokio::test]
    async fn test_refresh_updates_both_windows() {
        let store = Arc::new(MemoryStore::new());
        for height in 1..=3 {
            store.persist_block(&block_at(height, 0)).await.unwrap();
        }
        let refresher = refresher(store.clone());
        refresher.init().await.unwrap();

        // A new block with two transactions lands in the store
        store.persist_block(&block_at(4, 2)).await.unwrap();
        store.persist_tx(&tx_at(4, 0)).await.unwrap();
        store.persist_tx(&tx_at(4, 1)).await.unwrap();

        refresher.refresh().await.unwrap();

        assert_eq!(refresher.blocks().head().await.unwrap().height, 4);
        assert_eq!(refresher.txs().len().await, 2);
        let lookup = refresher.txs().by_hash("4-1").await;
        assert!(lookup.hit);
    }

    #[tokio::test]
    async fn test_refresh_head_without_transactions() {
        let store = Arc::new(MemoryStore::new());
        store.persist_block(&block_at(1, 0)).await.unwrap();

        let refresher = refresher(store);
        refresher.init().await.unwrap();
        refresher.refresh().await.unwrap();

        assert!(refresher.txs().is_empty().await);
    }

    #[tokio::test]
    async fn test_run_coalesces_triggers_and_stops_on_close() {
        let store = Arc::new(MemoryStore::new());
        store.persist_block(&block_at(1, 0)).await.unwrap();
        let refresher = refresher(store.clone());
        refresher.init().await.unwrap();

        let (tx, rx) = watch::channel(1u64);
        let handle = {
            let store = store.clone();
            tokio::spawn(async move {
                // A burst of new blocks observed while the loop runs
                for height in 2..=4 {
                    store.persist_block(&block_at(height, 0)).await.unwrap();
                    tx.send(height).unwrap();
                }
                drop(tx);
            })
        };

        refresher.run(rx).await;
        handle.await.unwrap();

        // The loop saw at least the final height before the channel closed
        assert_eq!(refresher.blocks().head().await.unwrap().height, 4);
    }
}
