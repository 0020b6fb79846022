//! Signer configuration.

use serde_json::{Map, Value};

/// Default RSA modulus size for generated keys.
pub const DEFAULT_KEY_BITS: usize = 2048;

/// Configuration for the [`crate::Signer`].
#[derive(Debug, Clone)]
pub struct SignerConfig {
    /// RSA modulus size used by [`crate::Signer::generate_key_pair`].
    pub key_bits: usize,
    /// `typ` value placed in the protected header.
    pub typ: String,
    /// Unprotected header attached to each new signature entry.
    pub unprotected_header: Option<Map<String, Value>>,
}

impl Default for SignerConfig {
    fn default() -> Self {
        Self {
            key_bits: DEFAULT_KEY_BITS,
            typ: "JWS".to_string(),
            unprotected_header: None,
        }
    }
}
