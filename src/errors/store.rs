//! Error types for durable store operations.
//!
//! The store itself is an external collaborator; these errors describe the
//! failures lakescan observes at its boundary.

/// The record kind a failed persistence write was carrying.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    /// A block record, keyed by height
    Block,
    /// A transaction record, keyed by hash
    Transaction,
}

impl std::fmt::Display for RecordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordKind::Block => write!(f, "block"),
            RecordKind::Transaction => write!(f, "transaction"),
        }
    }
}

/// Errors that can occur when reading from or writing to the durable store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A read query against the store failed.
    #[error("Store query failed during {operation}")]
    QueryFailed {
        /// Description of the query that failed (e.g., "latest block")
        operation: String,
        /// The underlying store error
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// An insert-if-absent write failed.
    ///
    /// Duplicate keys are not an error (the write is a no-op at the store);
    /// this variant indicates the store itself rejected or lost the write.
    #[error("Failed to persist {kind} {key}")]
    PersistFailed {
        /// Kind of record being written
        kind: RecordKind,
        /// Natural key of the record (block height / tx hash)
        key: String,
        /// The underlying store error
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl StoreError {
    /// Helper to create a `QueryFailed` error from any error type.
    pub fn query_failed(
        operation: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        StoreError::QueryFailed {
            operation: operation.into(),
            source: source.into(),
        }
    }

    /// Helper to create a `PersistFailed` error from any error type.
    pub fn persist_failed(
        kind: RecordKind,
        key: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        StoreError::PersistFailed {
            kind,
            key: key.into(),
            source: source.into(),
        }
    }
}
