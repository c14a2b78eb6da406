//! Shared RPC error types for remote ledger operations.
//!
//! This module provides error types for common failures when talking to the
//! remote ledger node, with enough context to identify the failed request.

/// Errors that can occur during remote ledger RPC operations.
///
/// This error type captures the failure modes of the two remote calls the
/// core issues: block-range listing and per-height transaction search. It
/// includes the requested heights to aid in debugging and retry.
///
/// # Examples
///
/// ```rust
/// use lakescan::RpcError;
///
/// let error = RpcError::SearchTransactionsFailed {
///     height: 1234,
///     source: "connection refused".into(),
/// };
/// println!("Error: {}", error);
/// ```
#[derive(Debug, thiserror::Error)]
pub enum RpcError {
    /// Failed to list blocks for a height range.
    ///
    /// This can occur due to rate limiting, a range wider than the remote
    /// service's window limit, network connectivity issues, or node-side
    /// errors.
    #[error("Failed to fetch blocks in range [{min_height}, {max_height}]")]
    GetBlocksFailed {
        /// Lowest requested height (inclusive)
        min_height: u64,
        /// Highest requested height (inclusive)
        max_height: u64,
        /// The underlying transport error
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Failed to search transactions at a specific height.
    #[error("Failed to search transactions at height {height}")]
    SearchTransactionsFailed {
        /// The height whose transactions were requested
        height: u64,
        /// The underlying transport error
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Catch-all for RPC failures that don't fit other categories, such as
    /// network errors, timeouts, or node downtime.
    #[error("Ledger connection failed during {operation}")]
    ConnectionFailed {
        /// Description of the operation that failed
        operation: String,
        /// The underlying error
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl RpcError {
    /// Helper to create a `GetBlocksFailed` error from any error type.
    pub fn get_blocks_failed(
        min_height: u64,
        max_height: u64,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        RpcError::GetBlocksFailed {
            min_height,
            max_height,
            source: source.into(),
        }
    }

    /// Helper to create a `SearchTransactionsFailed` error from any error type.
    pub fn search_transactions_failed(
        height: u64,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        RpcError::SearchTransactionsFailed {
            height,
            source: source.into(),
        }
    }

    /// Helper to create a `ConnectionFailed` error from any error type.
    pub fn connection_failed(
        operation: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        RpcError::ConnectionFailed {
            operation: operation.into(),
            source: source.into(),
        }
    }
}
