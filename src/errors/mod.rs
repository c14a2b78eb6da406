//! Error types for the lakescan library.
//!
//! This module provides strongly-typed errors for all public APIs in
//! lakescan. It follows a hybrid approach:
//!
//! - **Module-specific errors** for fine-grained error handling ([`RpcError`],
//!   [`StoreError`], [`DecodeError`], [`CacheError`], [`BackfillError`])
//! - **Unified error type** ([`LakescanError`]) for convenience when you don't
//!   need to distinguish between error sources
//!
//! # Architecture
//!
//! Each collaborator boundary and pipeline has its own error type:
//! - [`RpcError`] - Remote ledger node unavailable or rejecting calls
//! - [`StoreError`] - Durable store reads/writes failing
//! - [`DecodeError`] - Remote records failing their expected shape
//! - [`CacheError`] - Window cache init/refresh dependency failures
//! - [`BackfillError`] - Historical backfill failures, carrying the failed
//!   height range for re-issue
//!
//! # Examples
//!
//! ## Fine-grained error handling
//!
//! ```rust,ignore
//! use lakescan::{BackfillError, BackfillFetcher};
//!
//! match fetcher.backfill(1, 5000).await {
//!     Ok(()) => {}
//!     Err(e) => {
//!         let (from, to) = e.range();
//!         eprintln!("backfill failed, re-issue [{from}, {to}]: {e}");
//!     }
//! }
//! ```
//!
//! ## Using the unified error type
//!
//! ```rust,ignore
//! use lakescan::LakescanError;
//!
//! async fn sync() -> Result<(), LakescanError> {
//!     refresher.refresh().await?;
//!     fetcher.backfill(1, 5000).await?;
//!     Ok(())
//! }
//! ```

mod backfill;
mod cache;
mod decode;
mod rpc;
mod store;

pub use backfill::BackfillError;
pub use cache::CacheError;
pub use decode::DecodeError;
pub use rpc::RpcError;
pub use store::{RecordKind, StoreError};

/// Unified error type for all lakescan operations.
///
/// This enum wraps all module-specific error types, providing a convenient
/// way to handle errors when you don't need to distinguish between different
/// error sources. All module-specific error types automatically convert to
/// `LakescanError` via `From` implementations, so you can use `?` to
/// propagate errors naturally.
#[derive(Debug, thiserror::Error)]
pub enum LakescanError {
    /// Error from a remote ledger RPC call.
    #[error("RPC error: {0}")]
    Rpc(#[from] RpcError),

    /// Error from the durable store.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Error decoding a remote record.
    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),

    /// Error initializing or refreshing a window cache.
    #[error("Cache error: {0}")]
    Cache(#[from] CacheError),

    /// Error from a historical backfill run.
    #[error("Backfill error: {0}")]
    Backfill(#[from] BackfillError),
}
