//! Error types for the vCon facade.

use thiserror::Error;
use vcon_core::{CoreError, ValidationError};
use vcon_sign::SignError;

/// Errors from any vCon operation.
#[derive(Debug, Error)]
pub enum Error {
    /// Record construction or (de)serialization error.
    #[error("record error: {0}")]
    Core(#[from] CoreError),

    /// Validation error.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Signing or verification error.
    #[error("signing error: {0}")]
    Sign(#[from] SignError),
}

/// Result type for vCon operations.
pub type Result<T> = std::result::Result<T, Error>;
