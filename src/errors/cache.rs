//! Error types for window cache initialization and refresh.
//!
//! The caches themselves cannot fail on reads; errors arise only when an
//! `init`/`update`/`refresh` depends on the durable store. A failed operation
//! leaves the cache in its last-good state.

use super::StoreError;

/// Errors that can occur while initializing or refreshing a window cache.
///
/// # Examples
///
/// ```rust,ignore
/// match refresher.refresh().await {
///     Ok(()) => {}
///     Err(CacheError::EmptyStore) => {
///         // nothing persisted yet; caches stay empty
///     }
///     Err(CacheError::Store(e)) => {
///         eprintln!("store unavailable, serving stale window: {e}");
///     }
/// }
/// ```
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    /// The durable store read or write backing the operation failed.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// A refresh was triggered against a store that holds no blocks yet.
    ///
    /// Initialization tolerates an empty store (the cache just stays empty),
    /// but a refresh cycle needs a latest block to prepend.
    #[error("Store holds no blocks to refresh from")]
    EmptyStore,
}
