// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Remote ledger RPC boundary.
//!
//! The core talks to the remote node through the [`LedgerRpc`] trait: a
//! block-range listing call and a per-height transaction search. The wire
//! shapes ([`RawBlock`], [`RawTransaction`]) mirror what Tendermint-style
//! nodes return; [`decode`] turns them into lakescan's record types.
//!
//! The transport behind the trait (HTTP, WebSocket, in-process mock) is out
//! of scope here; tests and local development implement the trait directly.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::RpcError;

pub mod decode;

/// Identifier of a block on the wire: the hash lives here, not in the header.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawBlockId {
    /// Block hash as a hex string
    #[serde(default)]
    pub hash: String,
}

/// A block as returned by the remote listing call.
///
/// The header is carried opaquely; [`decode::decode_block`] extracts the
/// fields lakescan reads (`height`, `time`, `num_txs`) and keeps the rest as
/// payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawBlock {
    /// Block identifier (hash)
    pub block_id: RawBlockId,

    /// Chain header, shape owned by the remote node
    #[serde(default)]
    pub header: serde_json::Value,
}

/// Execution result attached to a raw transaction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawTxResult {
    /// Result code (0 = success)
    #[serde(default)]
    pub code: u32,

    /// Execution log
    #[serde(default)]
    pub log: String,

    /// Opaque result data
    #[serde(default)]
    pub data: Option<String>,
}

/// An event emitted during transaction execution.
///
/// The system `tx` event carries tags (`from`, `to`, `payer`, `gasused`)
/// that backfill the fields a bare transaction body omits.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawEvent {
    /// Emitting contract or `system`
    #[serde(default)]
    pub emitter: String,

    /// Event name
    #[serde(default)]
    pub event_name: String,

    /// Event payload
    #[serde(default)]
    pub event_data: serde_json::Value,
}

/// A transaction as returned by the remote search call.
///
/// `tx` is the submitted transaction body (`from`, `to`, `payer`, `value`,
/// `fee`, `nonce`, `data`), carried opaquely because its exact shape varies
/// by transaction kind. [`decode::decode_transaction`] extracts the
/// lakescan [`Transaction`](crate::Transaction) shape from it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawTransaction {
    /// Height of the containing block
    pub height: u64,

    /// Position within the containing block
    #[serde(default)]
    pub index: u32,

    /// Transaction hash
    #[serde(default)]
    pub hash: String,

    /// Submitted transaction body
    #[serde(default)]
    pub tx: serde_json::Value,

    /// Execution result
    #[serde(default)]
    pub tx_result: RawTxResult,

    /// Return value of the call, if any
    #[serde(default)]
    pub return_value: Option<String>,

    /// Events emitted during execution
    #[serde(default)]
    pub events: Vec<RawEvent>,
}

impl RawTransaction {
    /// The tags of the system `tx` event, if the record carries one.
    pub fn system_tags(&self) -> Option<&serde_json::Value> {
        self.events
            .iter()
            .find(|e| e.emitter == "system" && e.event_name == "tx")
            .map(|e| &e.event_data)
    }
}

/// Remote ledger RPC collaborator.
///
/// Implementations wrap whatever transport reaches the node. Two contract
/// points matter to the core:
///
/// - `get_blocks_in_range` accepts at most the remote's fetch window of
///   heights per call (20 for Tendermint-style nodes); the backfill layer
///   never asks for more.
/// - `search_transactions` pages are 1-based, following the node's search
///   convention; a page shorter than `per_page` is the last one.
#[async_trait]
pub trait LedgerRpc: Send + Sync {
    /// List blocks with heights in `[min_height, max_height]` inclusive.
    async fn get_blocks_in_range(
        &self,
        min_height: u64,
        max_height: u64,
    ) -> Result<Vec<RawBlock>, RpcError>;

    /// Search transactions included at exactly `height`.
    ///
    /// `page` starts at 1. Returns at most `per_page` records.
    async fn search_transactions(
        &self,
        height: u64,
        page: u64,
        per_page: u64,
    ) -> Result<Vec<RawTransaction>, RpcError>;
}
