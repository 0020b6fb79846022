//! Signed vCon envelope.
//!
//! Signing a record replaces its plaintext fields with a JWS general JSON
//! serialization: a base64url `payload` (the canonical record JSON) and one or
//! more `signatures`, each over `protected || "." || payload`.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use vcon_core::Vcon;

use crate::crypto::{RsaSigningKey, RsaVerifyingKey};
use crate::error::{Result, SignError};

/// The only algorithm this crate produces and accepts.
pub const ALG_RS256: &str = "RS256";

/// The JWS protected header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProtectedHeader {
    pub alg: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub typ: Option<String>,
}

impl ProtectedHeader {
    /// An RS256 header with the given `typ`.
    pub fn rs256(typ: impl Into<String>) -> Self {
        Self {
            alg: ALG_RS256.to_string(),
            typ: Some(typ.into()),
        }
    }

    /// Base64url of the header's JSON.
    pub fn encode(&self) -> Result<String> {
        let json = serde_json::to_vec(self).map_err(|e| SignError::Signing(e.to_string()))?;
        Ok(b64_encode(&json))
    }

    /// Decode from base64url JSON.
    pub fn decode(encoded: &str) -> Result<Self> {
        let bytes = b64_decode(encoded)?;
        serde_json::from_slice(&bytes).map_err(|e| SignError::Parse(e.to_string()))
    }
}

/// One entry of the `signatures` array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JwsSignature {
    /// Base64url protected header.
    pub protected: String,
    /// Base64url signature.
    pub signature: String,
    /// Optional unprotected header.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header: Option<Map<String, Value>>,
}

impl JwsSignature {
    /// Sign `payload` (already base64url) under the given header.
    pub(crate) fn create(
        header: &ProtectedHeader,
        payload: &str,
        key: &RsaSigningKey,
        unprotected: Option<Map<String, Value>>,
    ) -> Result<Self> {
        let protected = header.encode()?;
        let signing_input = signing_input(&protected, payload);
        let signature = key.sign(signing_input.as_bytes())?;

        Ok(Self {
            protected,
            signature: b64_encode(&signature),
            header: unprotected,
        })
    }

    /// Check this entry against `payload` (base64url) and a public key.
    pub(crate) fn check(&self, payload: &str, key: &RsaVerifyingKey) -> Result<()> {
        let header = ProtectedHeader::decode(&self.protected)?;
        if header.alg != ALG_RS256 {
            return Err(SignError::Signing(format!("unsupported alg: {}", header.alg)));
        }

        let signature = b64_decode(&self.signature)?;
        key.verify(signing_input(&self.protected, payload).as_bytes(), &signature)
    }
}

/// A signed record.
///
/// The plaintext fields are gone; the original record is recoverable only by
/// decoding the payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignedEnvelope {
    signatures: Vec<JwsSignature>,
    payload: String,
}

impl SignedEnvelope {
    pub(crate) fn new(signatures: Vec<JwsSignature>, payload: String) -> Self {
        Self {
            signatures,
            payload,
        }
    }

    /// Signature entries, in the order they were added.
    pub fn signatures(&self) -> &[JwsSignature] {
        &self.signatures
    }

    /// Base64url of the canonical record JSON.
    pub fn payload(&self) -> &str {
        &self.payload
    }

    pub(crate) fn push_signature(&mut self, signature: JwsSignature) {
        self.signatures.push(signature);
    }

    /// Verify against a public key: true if any signature entry verifies.
    ///
    /// Malformed entries and wrong keys both yield `false`.
    pub fn verify(&self, key: &RsaVerifyingKey) -> bool {
        self.check(key).is_ok()
    }

    /// Like [`verify`](Self::verify), but reports why the last entry failed.
    pub(crate) fn check(&self, key: &RsaVerifyingKey) -> Result<()> {
        let mut last_err = SignError::NotSigned;
        for entry in &self.signatures {
            match entry.check(&self.payload, key) {
                Ok(()) => return Ok(()),
                Err(e) => last_err = e,
            }
        }
        Err(last_err)
    }

    /// The decoded payload: the canonical JSON of the signed record.
    pub fn payload_json(&self) -> Result<String> {
        let bytes = b64_decode(&self.payload).map_err(|e| SignError::Payload(e.to_string()))?;
        String::from_utf8(bytes).map_err(|e| SignError::Payload(e.to_string()))
    }

    /// Recover the signed record.
    pub fn decode_payload(&self) -> Result<Vcon> {
        let json = self.payload_json()?;
        Vcon::from_json(&json).map_err(|e| SignError::Payload(e.to_string()))
    }

    /// Serialize to JSON: exactly `signatures` and `payload`.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| SignError::Parse(e.to_string()))
    }

    /// Parse a signed record.
    ///
    /// Fails with [`SignError::NotSigned`] when the object has no (or an
    /// empty) `signatures` array or no `payload`, and with
    /// [`SignError::Parse`] when the JSON is malformed.
    pub fn from_json(json: &str) -> Result<Self> {
        let value: Value =
            serde_json::from_str(json).map_err(|e| SignError::Parse(e.to_string()))?;
        Self::from_value(value)
    }

    /// Like [`from_json`](Self::from_json), over an already-parsed value.
    pub(crate) fn from_value(value: Value) -> Result<Self> {
        let object = value
            .as_object()
            .ok_or_else(|| SignError::Parse("expected a JSON object".into()))?;

        let has_signatures = object
            .get("signatures")
            .and_then(Value::as_array)
            .is_some_and(|s| !s.is_empty());
        if !has_signatures || !object.contains_key("payload") {
            return Err(SignError::NotSigned);
        }

        serde_json::from_value(value).map_err(|e| SignError::Parse(e.to_string()))
    }
}

/// The JWS signing input: ASCII `protected "." payload`.
fn signing_input(protected: &str, payload: &str) -> String {
    format!("{protected}.{payload}")
}

pub(crate) fn b64_encode(data: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(data)
}

pub(crate) fn b64_decode(data: &str) -> Result<Vec<u8>> {
    URL_SAFE_NO_PAD
        .decode(data)
        .map_err(|e| SignError::Parse(format!("invalid base64url: {e}")))
}
