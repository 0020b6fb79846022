//! Error types for vCon Core.

use thiserror::Error;

/// Core errors that can occur while building or (de)serializing a record.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("failed to parse vCon JSON: {0}")]
    Parse(String),

    #[error("encoding error: {0}")]
    Encoding(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Validation errors raised at construction/mutation time, or by the
/// structural pass in [`crate::validation`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid encoding: {0}, must be one of base64, base64url, none")]
    InvalidEncoding(String),

    #[error("invalid MIME type: {0}")]
    InvalidMimeType(String),

    #[error("field {0} is reserved and cannot be set as an extension")]
    ReservedField(String),

    #[error("invalid vcon version: {0}")]
    InvalidVersion(String),

    #[error("updated_at precedes created_at")]
    TimestampOrder,

    #[error("{field} references party {index}, but only {count} parties exist")]
    PartyIndexOutOfRange {
        field: String,
        index: usize,
        count: usize,
    },

    #[error("{field} references dialog {index}, but only {count} dialogs exist")]
    DialogIndexOutOfRange {
        field: String,
        index: usize,
        count: usize,
    },

    #[error("dialog {0} carries both an inline body and an external url")]
    ConflictingPayload(usize),
}

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;
