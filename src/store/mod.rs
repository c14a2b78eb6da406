// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Durable store boundary.
//!
//! The relational store is an external collaborator; lakescan specifies it
//! only at this trait. The store is the source of truth, and the window
//! caches are derived, discardable views rebuilt from it on restart.
//!
//! # Contract
//!
//! - `blocks_page` returns blocks ordered by height descending.
//! - `txs_page` returns transactions ordered by `(height desc, index desc)`
//!   with each record's `time` joined in from its containing block.
//! - `persist_block` / `persist_tx` are **insert-if-absent**: writing a
//!   record whose natural key (height / hash) already exists is a no-op
//!   success, which makes re-issuing a partially applied backfill safe.

use async_trait::async_trait;

use crate::errors::StoreError;
use crate::types::block::Block;
use crate::types::tx::{Transaction, TxFilter};

pub mod memory;

pub use memory::MemoryStore;

/// Durable store collaborator.
#[async_trait]
pub trait Store: Send + Sync {
    /// The most recently persisted block, if any.
    async fn latest_block(&self) -> Result<Option<Block>, StoreError>;

    /// A page of blocks ordered by height descending.
    async fn blocks_page(&self, size: usize, offset: usize) -> Result<Vec<Block>, StoreError>;

    /// A page of transactions matching `filter`, ordered by
    /// `(height desc, index desc)`, with block timestamps joined in.
    async fn txs_page(
        &self,
        filter: &TxFilter,
        size: usize,
        offset: usize,
    ) -> Result<Vec<Transaction>, StoreError>;

    /// Persist a block, keyed by height. Insert-if-absent.
    async fn persist_block(&self, block: &Block) -> Result<(), StoreError>;

    /// Persist a transaction, keyed by hash. Insert-if-absent.
    async fn persist_tx(&self, tx: &Transaction) -> Result<(), StoreError>;
}
