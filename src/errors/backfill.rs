//! Error types for historical backfill operations.
//!
//! Backfill is all-or-nothing per call: a single failing sub-request fails
//! the whole height range, even though sibling sub-requests may already have
//! written to the store. The error therefore carries the exact `[from, to]`
//! interval so the caller can re-issue it, which is safe because persistence
//! writes are insert-if-absent.

use super::{DecodeError, RpcError, StoreError};

/// Errors that can occur during a historical backfill run.
#[derive(Debug, thiserror::Error)]
pub enum BackfillError {
    /// A remote ledger call failed somewhere inside the range.
    #[error("Backfill of heights [{from}, {to}] failed: {source}")]
    Rpc {
        /// First height of the failed backfill call (inclusive)
        from: u64,
        /// Last height of the failed backfill call (inclusive)
        to: u64,
        /// The failing RPC operation
        #[source]
        source: RpcError,
    },

    /// A persistence write failed somewhere inside the range.
    #[error("Backfill of heights [{from}, {to}] failed: {source}")]
    Store {
        /// First height of the failed backfill call (inclusive)
        from: u64,
        /// Last height of the failed backfill call (inclusive)
        to: u64,
        /// The failing store operation
        #[source]
        source: StoreError,
    },

    /// A remote record could not be decoded into the expected shape.
    #[error("Backfill of heights [{from}, {to}] failed at height {height}: {source}")]
    Decode {
        /// First height of the failed backfill call (inclusive)
        from: u64,
        /// Last height of the failed backfill call (inclusive)
        to: u64,
        /// Height of the malformed record (for a malformed block listing,
        /// the first height of its chunk)
        height: u64,
        /// The decode failure
        #[source]
        source: DecodeError,
    },
}

impl BackfillError {
    /// The height interval the failed call covered, for re-issue.
    pub fn range(&self) -> (u64, u64) {
        match self {
            BackfillError::Rpc { from, to, .. }
            | BackfillError::Store { from, to, .. }
            | BackfillError::Decode { from, to, .. } => (*from, *to),
        }
    }
}
