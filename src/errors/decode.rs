//! Error types for decoding remote ledger records.
//!
//! The remote service returns opaque transaction records; the decode step in
//! `rpc::decode` turns them into lakescan's [`Transaction`](crate::Transaction)
//! shape. A record that fails its expected shape is malformed.

/// Errors that can occur while decoding a remote record.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// A field the Transaction shape requires is absent from the record.
    #[error("Malformed record: missing field `{field}`")]
    MissingField {
        /// Name of the absent field
        field: &'static str,
    },

    /// A field is present but has an unexpected shape or value.
    #[error("Malformed record: invalid field `{field}`: {details}")]
    InvalidField {
        /// Name of the offending field
        field: &'static str,
        /// What was wrong with it
        details: String,
    },
}

impl DecodeError {
    /// Create a `MissingField` error.
    pub fn missing_field(field: &'static str) -> Self {
        DecodeError::MissingField { field }
    }

    /// Create an `InvalidField` error with details.
    pub fn invalid_field(field: &'static str, details: impl Into<String>) -> Self {
        DecodeError::InvalidField {
            field,
            details: details.into(),
        }
    }
}
