// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Block record as stored and cached by lakescan.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single ledger block.
///
/// The identity key is `height`: heights are strictly increasing and unique
/// across the chain. Chain-header fields beyond the ones lakescan reads are
/// carried opaquely in `header` and round-trip through the store untouched.
///
/// # Examples
///
/// ```
/// use lakescan::Block;
/// use chrono::Utc;
///
/// let block = Block {
///     height: 42,
///     hash: "B4C0FFEE".to_string(),
///     time: Utc::now(),
///     num_txs: 3,
///     header: serde_json::json!({ "chain_id": "lake-1" }),
/// };
/// assert_eq!(block.height, 42);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    /// Block height (identity key, strictly increasing)
    pub height: u64,

    /// Block hash as an opaque hex string
    pub hash: String,

    /// Block production time (UTC)
    pub time: DateTime<Utc>,

    /// Number of transactions contained in this block
    pub num_txs: u64,

    /// Remaining chain-header fields, carried as opaque payload
    #[serde(default)]
    pub header: serde_json::Value,
}

impl Block {
    /// True if `other` is the direct successor of this block by height.
    pub fn is_parent_of(&self, other: &Block) -> bool {
        other.height == self.height + 1
    }
}
