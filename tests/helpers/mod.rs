// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Test helpers for lakescan integration tests
//!
//! Provides a scripted mock of the remote ledger node and builders for
//! domain records, so tests run without real chain connections.

// Each test binary uses a different subset of these helpers
#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use lakescan::{
    Block, LedgerRpc, RawBlock, RawBlockId, RawEvent, RawTransaction, RawTxResult, RpcError,
    Transaction, TxResult,
};

/// Build a block record at the given height.
pub fn block_at(height: u64, num_txs: u64) -> Block {
    Block {
        height,
        hash: format!("{height:08X}"),
        time: Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap() + chrono::TimeDelta::seconds(height as i64 * 5),
        num_txs,
        header: serde_json::Value::Null,
    }
}

/// Build a transaction record at the given position.
pub fn tx_at(height: u64, index: u32) -> Transaction {
    Transaction {
        height,
        index,
        hash: format!("{height}-{index}"),
        from: Some("tea1sender".to_string()),
        to: Some("tea1recipient".to_string()),
        payer: None,
        value: 100,
        gas_limit: 21_000,
        gas_used: 20_000,
        nonce: 0,
        data: serde_json::Value::Null,
        return_value: None,
        result: TxResult::default(),
        time: None,
    }
}

/// Build a raw block in the node's wire shape.
pub fn raw_block_at(height: u64, num_txs: u64) -> RawBlock {
    RawBlock {
        block_id: RawBlockId {
            hash: format!("{height:08X}"),
        },
        header: serde_json::json!({
            "height": height.to_string(),
            "time": "2025-06-01T00:00:00Z",
            "num_txs": num_txs,
            "chain_id": "lake-1",
        }),
    }
}

/// Build a raw transaction in the node's wire shape.
pub fn raw_tx_at(height: u64, index: u32) -> RawTransaction {
    RawTransaction {
        height,
        index,
        hash: format!("{height}-{index}"),
        tx: serde_json::json!({
            "from": "tea1sender",
            "to": "tea1recipient",
            "value": 100,
            "fee": 21000,
            "nonce": index,
        }),
        tx_result: RawTxResult::default(),
        return_value: None,
        events: vec![RawEvent {
            emitter: "system".to_string(),
            event_name: "tx".to_string(),
            event_data: serde_json::json!({ "gasused": 20000 }),
        }],
    }
}

/// Mock remote ledger node with a scripted chain and call accounting.
///
/// Tracks how many calls of each kind were issued and the peak number of
/// calls in flight at once, so tests can assert batching shape and the
/// concurrency bound.
///
/// # Example
///
/// ```rust,ignore
/// let rpc = MockLedgerRpc::new()
///     .with_heights(1..=45, 2)          // 45 blocks, 2 txs each
///     .with_call_delay(Duration::from_millis(5))
///     .with_failing_height(30);         // any request touching 30 fails
/// ```
#[derive(Default)]
pub struct MockLedgerRpc {
    blocks: BTreeMap<u64, RawBlock>,
    txs: BTreeMap<u64, Vec<RawTransaction>>,
    failing_height: Option<u64>,
    call_delay: Option<Duration>,
    block_range_calls: AtomicUsize,
    search_calls: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl MockLedgerRpc {
    /// Create a mock with an empty chain.
    pub fn new() -> Self {
        Self::default()
    }

    /// Script a contiguous chain segment with `txs_per_height` transactions
    /// at every height.
    pub fn with_heights(
        mut self,
        heights: std::ops::RangeInclusive<u64>,
        txs_per_height: u32,
    ) -> Self {
        for height in heights {
            self.blocks
                .insert(height, raw_block_at(height, txs_per_height as u64));
            self.txs.insert(
                height,
                (0..txs_per_height).map(|i| raw_tx_at(height, i)).collect(),
            );
        }
        self
    }

    /// Override the scripted transactions at one height.
    pub fn with_txs_at(mut self, height: u64, txs: Vec<RawTransaction>) -> Self {
        self.txs.insert(height, txs);
        self
    }

    /// Fail any request whose height range covers `height`.
    pub fn with_failing_height(mut self, height: u64) -> Self {
        self.failing_height = Some(height);
        self
    }

    /// Sleep this long inside every call, making concurrency observable.
    pub fn with_call_delay(mut self, delay: Duration) -> Self {
        self.call_delay = Some(delay);
        self
    }

    /// Number of block-range listing calls issued.
    pub fn block_range_calls(&self) -> usize {
        self.block_range_calls.load(Ordering::SeqCst)
    }

    /// Number of transaction search calls issued (pages count separately).
    pub fn search_calls(&self) -> usize {
        self.search_calls.load(Ordering::SeqCst)
    }

    /// Peak number of calls that were in flight at the same time.
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    async fn enter_call(&self) -> CallGuard<'_> {
        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(current, Ordering::SeqCst);
        if let Some(delay) = self.call_delay {
            tokio::time::sleep(delay).await;
        }
        CallGuard { rpc: self }
    }
}

/// Decrements the in-flight gauge when a mock call completes.
struct CallGuard<'a> {
    rpc: &'a MockLedgerRpc,
}

impl Drop for CallGuard<'_> {
    fn drop(&mut self) {
        self.rpc.in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl LedgerRpc for MockLedgerRpc {
    async fn get_blocks_in_range(
        &self,
        min_height: u64,
        max_height: u64,
    ) -> Result<Vec<RawBlock>, RpcError> {
        self.block_range_calls.fetch_add(1, Ordering::SeqCst);
        let _guard = self.enter_call().await;

        if let Some(failing) = self.failing_height {
            if failing >= min_height && failing <= max_height {
                return Err(RpcError::get_blocks_failed(
                    min_height,
                    max_height,
                    "scripted failure",
                ));
            }
        }

        Ok(self
            .blocks
            .range(min_height..=max_height)
            .map(|(_, raw)| raw.clone())
            .collect())
    }

    async fn search_transactions(
        &self,
        height: u64,
        page: u64,
        per_page: u64,
    ) -> Result<Vec<RawTransaction>, RpcError> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        let _guard = self.enter_call().await;

        if self.failing_height == Some(height) {
            return Err(RpcError::search_transactions_failed(
                height,
                "scripted failure",
            ));
        }

        let all = self.txs.get(&height).cloned().unwrap_or_default();
        let start = ((page - 1) * per_page) as usize;
        Ok(all
            .into_iter()
            .skip(start)
            .take(per_page as usize)
            .collect())
    }
}
