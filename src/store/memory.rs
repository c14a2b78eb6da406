// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! In-memory [`Store`] implementation.
//!
//! Backs tests and local development runs; it implements the full store
//! contract (descending pages, block-time joins, insert-if-absent writes)
//! without persistence.

use std::collections::{BTreeMap, HashSet};

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use super::Store;
use crate::errors::StoreError;
use crate::types::block::Block;
use crate::types::tx::{Transaction, TxFilter};

#[derive(Debug, Default)]
struct MemoryStoreState {
    /// Blocks keyed by height; iteration order is ascending
    blocks: BTreeMap<u64, Block>,
    /// Transactions keyed by (height, index); iteration order is ascending
    txs: BTreeMap<(u64, u32), Transaction>,
    /// Hash index enforcing the transaction identity key
    tx_hashes: HashSet<String>,
}

/// In-memory store with the same observable behavior as a relational
/// backend.
///
/// # Examples
///
/// ```rust,ignore
/// use lakescan::{MemoryStore, Store};
///
/// let store = MemoryStore::new();
/// store.persist_block(&block).await?;
/// assert_eq!(store.latest_block().await?.unwrap().height, block.height);
/// ```
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: RwLock<MemoryStoreState>,
}

impl MemoryStore {
    /// Creates an empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of persisted blocks.
    pub async fn block_count(&self) -> usize {
        self.state.read().await.blocks.len()
    }

    /// Number of persisted transactions.
    pub async fn tx_count(&self) -> usize {
        self.state.read().await.txs.len()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn latest_block(&self) -> Result<Option<Block>, StoreError> {
        let state = self.state.read().await;
        Ok(state.blocks.values().next_back().cloned())
    }

    async fn blocks_page(&self, size: usize, offset: usize) -> Result<Vec<Block>, StoreError> {
        let state = self.state.read().await;
        Ok(state
            .blocks
            .values()
            .rev()
            .skip(offset)
            .take(size)
            .cloned()
            .collect())
    }

    async fn txs_page(
        &self,
        filter: &TxFilter,
        size: usize,
        offset: usize,
    ) -> Result<Vec<Transaction>, StoreError> {
        let state = self.state.read().await;
        Ok(state
            .txs
            .values()
            .rev()
            .filter(|tx| filter.matches(tx))
            .skip(offset)
            .take(size)
            .map(|tx| {
                let mut tx = tx.clone();
                // The relational backend joins block.time onto each row
                tx.time = state.blocks.get(&tx.height).map(|b| b.time);
                tx
            })
            .collect())
    }

    async fn persist_block(&self, block: &Block) -> Result<(), StoreError> {
        let mut state = self.state.write().await;
        if state.blocks.contains_key(&block.height) {
            debug!(height = block.height, "block already persisted, skipping");
            return Ok(());
        }
        state.blocks.insert(block.height, block.clone());
        Ok(())
    }

    async fn persist_tx(&self, tx: &Transaction) -> Result<(), StoreError> {
        let mut state = self.state.write().await;
        if state.tx_hashes.contains(&tx.hash) {
            debug!(hash = %tx.hash, "transaction already persisted, skipping");
            return Ok(());
        }
        state.tx_hashes.insert(tx.hash.clone());
        state.txs.insert((tx.height, tx.index), tx.clone());
        Ok(())
    }
}
