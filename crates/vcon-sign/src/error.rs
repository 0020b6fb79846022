//! Error types for the signing module.

use thiserror::Error;

/// Errors that can occur during signing operations.
///
/// A signature that fails to verify is not an error: verification returns
/// `false` for both cryptographic mismatches and malformed signature data.
#[derive(Debug, Error)]
pub enum SignError {
    /// Verification attempted on data with no signature envelope.
    #[error("vCon is not signed: missing signatures or payload")]
    NotSigned,

    /// Private key could not be decoded.
    #[error("invalid private key: {0}")]
    InvalidPrivateKey(String),

    /// Public key could not be decoded.
    #[error("invalid public key: {0}")]
    InvalidPublicKey(String),

    /// Key generation failed.
    #[error("key generation error: {0}")]
    KeyGeneration(String),

    /// The signing primitive failed.
    #[error("signing error: {0}")]
    Signing(String),

    /// Malformed JSON envelope.
    #[error("failed to parse signed vCon JSON: {0}")]
    Parse(String),

    /// The envelope payload could not be decoded back into a record.
    #[error("invalid payload: {0}")]
    Payload(String),

    /// Background signing task failed to complete.
    #[error("signing task failed: {0}")]
    Task(String),

    /// Core error.
    #[error("core error: {0}")]
    Core(#[from] vcon_core::CoreError),
}

/// Result type for signing operations.
pub type Result<T> = std::result::Result<T, SignError>;
