//! Span creation helpers for lakescan operations.
//!
//! Telemetry is kept orthogonal to business logic: instead of `#[instrument]`
//! attributes on functions, each instrumented operation has a corresponding
//! span helper here.
//!
//! Usage pattern:
//! ```rust,ignore
//! pub async fn my_operation(&self) -> Result<T> {
//!     let span = spans::my_operation();
//!     let _guard = span.enter();
//!     // Business logic here
//! }
//! ```

use tracing::Span;

/// Create span for one cache refresh cycle.
///
/// Parent: None (root span for this operation)
/// Children: store queries and window updates
#[inline]
pub(crate) fn refresh() -> Span {
    tracing::info_span!("lakescan.refresh")
}

/// Create span for initializing both window caches from the store.
///
/// Parent: None (root span for this operation)
#[inline]
pub(crate) fn cache_init() -> Span {
    tracing::info_span!("lakescan.cache_init")
}

/// Create span for a block backfill over a height range.
///
/// Parent: None (root span for this operation)
/// Children: one fetch per sub-interval chunk
#[inline]
pub(crate) fn backfill_blocks(from: u64, to: u64) -> Span {
    tracing::info_span!("lakescan.backfill_blocks", from = from, to = to)
}

/// Create span for a transaction backfill over a height range.
///
/// Parent: None (root span for this operation)
/// Children: one search per height
#[inline]
pub(crate) fn backfill_transactions(from: u64, to: u64) -> Span {
    tracing::info_span!("lakescan.backfill_transactions", from = from, to = to)
}

/// Create span for fetching and persisting one block-range chunk.
///
/// Parent: backfill_blocks span
#[inline]
pub(crate) fn fetch_block_chunk(min_height: u64, max_height: u64) -> Span {
    tracing::debug_span!(
        "lakescan.fetch_block_chunk",
        min_height = min_height,
        max_height = max_height,
    )
}

/// Create span for fetching and persisting one height's transactions.
///
/// Parent: backfill_transactions span
#[inline]
pub(crate) fn fetch_height_transactions(height: u64) -> Span {
    tracing::debug_span!("lakescan.fetch_height_transactions", height = height)
}
