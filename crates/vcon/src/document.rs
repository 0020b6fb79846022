//! A vCon document in either wire state.
//!
//! A JSON vCon is either a plaintext record or a signed envelope; the two share
//! no top-level keys. [`VconDocument`] parses either and routes signing and
//! verification to the right state.

use vcon_core::Vcon;
use vcon_sign::{RsaSigningKey, RsaVerifyingKey, SignError, SignedEnvelope, Signer};

use crate::error::Result;

/// A parsed vCon, signed or not.
#[derive(Debug, Clone, PartialEq)]
pub enum VconDocument {
    Unsigned(Vcon),
    Signed(SignedEnvelope),
}

impl VconDocument {
    /// Parse JSON in either state.
    ///
    /// Objects carrying a non-empty `signatures` array and a `payload` are
    /// envelopes; everything else is parsed as a plaintext record.
    pub fn from_json(json: &str) -> Result<Self> {
        match SignedEnvelope::from_json(json) {
            Ok(envelope) => Ok(Self::Signed(envelope)),
            Err(SignError::NotSigned) => {
                tracing::trace!("no signature envelope, parsing as plaintext record");
                Ok(Self::Unsigned(Vcon::from_json(json)?))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Serialize in the document's current wire state.
    pub fn to_json(&self) -> Result<String> {
        match self {
            Self::Unsigned(vcon) => Ok(vcon.to_json()?),
            Self::Signed(envelope) => Ok(envelope.to_json()?),
        }
    }

    /// Whether the document is a signed envelope.
    pub fn is_signed(&self) -> bool {
        matches!(self, Self::Signed(_))
    }

    /// The record content, decoding the payload when signed.
    pub fn vcon(&self) -> Result<Vcon> {
        match self {
            Self::Unsigned(vcon) => Ok(vcon.clone()),
            Self::Signed(envelope) => Ok(envelope.decode_payload()?),
        }
    }

    /// Sign an unsigned document; countersign a signed one.
    pub fn sign(self, signer: &Signer, key: &RsaSigningKey) -> Result<Self> {
        match self {
            Self::Unsigned(vcon) => Ok(Self::Signed(signer.sign(vcon, key)?)),
            Self::Signed(mut envelope) => {
                signer.countersign(&mut envelope, key)?;
                Ok(Self::Signed(envelope))
            }
        }
    }

    /// Verify a signed document.
    ///
    /// Fails with [`SignError::NotSigned`] on a plaintext record.
    pub fn verify(&self, signer: &Signer, key: &RsaVerifyingKey) -> Result<bool> {
        match self {
            Self::Unsigned(_) => Err(SignError::NotSigned.into()),
            Self::Signed(envelope) => Ok(signer.verify(envelope, key)),
        }
    }
}

impl From<Vcon> for VconDocument {
    fn from(vcon: Vcon) -> Self {
        Self::Unsigned(vcon)
    }
}

impl From<SignedEnvelope> for VconDocument {
    fn from(envelope: SignedEnvelope) -> Self {
        Self::Signed(envelope)
    }
}
