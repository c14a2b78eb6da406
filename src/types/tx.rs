// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Transaction record and the equality filter used by paged lookups.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Execution result attached to a transaction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TxResult {
    /// Result code (0 = success)
    pub code: u32,

    /// Execution log emitted by the chain
    #[serde(default)]
    pub log: String,

    /// Opaque result data, if any
    #[serde(default)]
    pub data: Option<String>,
}

/// A single ledger transaction.
///
/// The identity key is `hash`, unique across the chain. The natural ordering
/// key is `(height desc, index desc)`: newest first, and within a block the
/// later transaction first.
///
/// `time` is the timestamp of the containing block. It is populated when the
/// record is read back from the store (which joins it in from the block
/// table); records freshly decoded from the remote source carry `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Height of the containing block
    pub height: u64,

    /// Position within the containing block
    pub index: u32,

    /// Transaction hash (identity key)
    pub hash: String,

    /// Sender address, if known
    #[serde(default)]
    pub from: Option<String>,

    /// Recipient address, if known
    #[serde(default)]
    pub to: Option<String>,

    /// Fee payer address, if distinct from the sender
    #[serde(default)]
    pub payer: Option<String>,

    /// Transferred value
    pub value: u64,

    /// Gas limit declared by the transaction
    pub gas_limit: u64,

    /// Gas actually consumed
    pub gas_used: u64,

    /// Sender nonce
    pub nonce: u64,

    /// Opaque call payload
    #[serde(default)]
    pub data: serde_json::Value,

    /// Return value of the call, if any
    #[serde(default)]
    pub return_value: Option<String>,

    /// Execution result
    pub result: TxResult,

    /// Timestamp of the containing block (store-side join)
    #[serde(default)]
    pub time: Option<DateTime<Utc>>,
}

/// Equality filter over [`Transaction`] fields.
///
/// Every populated field must match exactly for a transaction to pass; an
/// empty filter matches everything. The same filter drives both the cache
/// paged lookup and the store paged query, so a cache miss can fall back to
/// the store with identical semantics.
///
/// # Examples
///
/// ```
/// use lakescan::TxFilter;
///
/// let filter = TxFilter::default().with_from("tea1sender");
/// assert!(!filter.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TxFilter {
    /// Required transaction hash
    pub hash: Option<String>,

    /// Required containing-block height
    pub height: Option<u64>,

    /// Required sender address
    pub from: Option<String>,

    /// Required recipient address
    pub to: Option<String>,

    /// Required fee payer address
    pub payer: Option<String>,
}

impl TxFilter {
    /// Filter by sender address.
    pub fn with_from(mut self, from: impl Into<String>) -> Self {
        self.from = Some(from.into());
        self
    }

    /// Filter by recipient address.
    pub fn with_to(mut self, to: impl Into<String>) -> Self {
        self.to = Some(to.into());
        self
    }

    /// Filter by fee payer address.
    pub fn with_payer(mut self, payer: impl Into<String>) -> Self {
        self.payer = Some(payer.into());
        self
    }

    /// Filter by containing-block height.
    pub fn with_height(mut self, height: u64) -> Self {
        self.height = Some(height);
        self
    }

    /// Filter by transaction hash.
    pub fn with_hash(mut self, hash: impl Into<String>) -> Self {
        self.hash = Some(hash.into());
        self
    }

    /// True if no field is constrained (the filter matches everything).
    pub fn is_empty(&self) -> bool {
        self.hash.is_none()
            && self.height.is_none()
            && self.from.is_none()
            && self.to.is_none()
            && self.payer.is_none()
    }

    /// True if `tx` satisfies every populated field of this filter.
    pub fn matches(&self, tx: &Transaction) -> bool {
        if let Some(hash) = &self.hash {
            if tx.hash != *hash {
                return false;
            }
        }
        if let Some(height) = self.height {
            if tx.height != height {
                return false;
            }
        }
        if let Some(from) = &self.from {
            if tx.from.as_deref() != Some(from.as_str()) {
                return false;
            }
        }
        if let Some(to) = &self.to {
            if tx.to.as_deref() != Some(to.as_str()) {
                return false;
            }
        }
        if let Some(payer) = &self.payer {
            if tx.payer.as_deref() != Some(payer.as_str()) {
                return false;
            }
        }
        true
    }
}
