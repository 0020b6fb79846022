//! Signing and verification of vCon records.
//!
//! Signing consumes a [`Vcon`] and yields a [`SignedEnvelope`]; the two states
//! are distinct types, so there is no way to hold a half-signed record.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use vcon_core::{canonical_json, Vcon};

use crate::config::SignerConfig;
use crate::crypto::{KeyPair, RsaSigningKey, RsaVerifyingKey};
use crate::envelope::{b64_encode, JwsSignature, ProtectedHeader, SignedEnvelope, ALG_RS256};
use crate::error::{Result, SignError};
use crate::observer::{SigningEvent, SigningObserver, TracingObserver};

/// Produces and checks signed records.
#[derive(Clone)]
pub struct Signer {
    config: SignerConfig,
    observer: Arc<dyn SigningObserver>,
}

impl Signer {
    /// Create a signer that reports to `tracing`.
    pub fn new(config: SignerConfig) -> Self {
        Self::with_observer(config, Arc::new(TracingObserver))
    }

    /// Create a signer with a custom event sink.
    pub fn with_observer(config: SignerConfig, observer: Arc<dyn SigningObserver>) -> Self {
        Self { config, observer }
    }

    /// The configuration this signer was built with.
    pub fn config(&self) -> &SignerConfig {
        &self.config
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Signing
    // ─────────────────────────────────────────────────────────────────────────

    /// Sign a record.
    ///
    /// The record is consumed. Its canonical JSON becomes the payload, and the
    /// returned envelope carries a single RS256 signature entry.
    pub fn sign(&self, vcon: Vcon, key: &RsaSigningKey) -> Result<SignedEnvelope> {
        let canonical = canonical_json(&vcon)?;
        self.observer.on_event(&SigningEvent::PayloadPrepared {
            uuid: vcon.uuid().to_string(),
            payload_len: canonical.len(),
        });

        let payload = b64_encode(canonical.as_bytes());
        let entry = self.create_entry(&payload, key)?;

        self.observer.on_event(&SigningEvent::Signed {
            uuid: vcon.uuid().to_string(),
            alg: ALG_RS256.to_string(),
            key_fingerprint: key.verifying_key().fingerprint(),
        });

        Ok(SignedEnvelope::new(vec![entry], payload))
    }

    /// Sign a record with a PKCS#8 PEM private key.
    pub fn sign_pem(&self, vcon: Vcon, private_key_pem: &str) -> Result<SignedEnvelope> {
        let key = RsaSigningKey::from_pem(private_key_pem)?;
        self.sign(vcon, &key)
    }

    /// Append another signature entry over the envelope's existing payload.
    pub fn countersign(&self, envelope: &mut SignedEnvelope, key: &RsaSigningKey) -> Result<()> {
        let entry = self.create_entry(envelope.payload(), key)?;
        envelope.push_signature(entry);

        let uuid = envelope
            .decode_payload()
            .map(|vcon| vcon.uuid().to_string())
            .unwrap_or_default();
        self.observer.on_event(&SigningEvent::Signed {
            uuid,
            alg: ALG_RS256.to_string(),
            key_fingerprint: key.verifying_key().fingerprint(),
        });
        Ok(())
    }

    fn create_entry(&self, payload: &str, key: &RsaSigningKey) -> Result<JwsSignature> {
        let header = ProtectedHeader::rs256(self.config.typ.clone());
        JwsSignature::create(&header, payload, key, self.config.unprotected_header.clone())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Verification
    // ─────────────────────────────────────────────────────────────────────────

    /// Verify an envelope. True if any signature entry verifies under `key`.
    pub fn verify(&self, envelope: &SignedEnvelope, key: &RsaVerifyingKey) -> bool {
        let key_fingerprint = key.fingerprint();
        match envelope.check(key) {
            Ok(()) => {
                self.observer
                    .on_event(&SigningEvent::Verified { key_fingerprint });
                true
            }
            Err(e) => {
                self.observer.on_event(&SigningEvent::VerificationFailed {
                    key_fingerprint,
                    reason: e.to_string(),
                });
                false
            }
        }
    }

    /// Verify a signed record in JSON form.
    ///
    /// Returns [`SignError::Parse`] when the input is not a JSON object and
    /// [`SignError::NotSigned`] when it has no signature envelope. Malformed
    /// signature data is reported as `Ok(false)`.
    pub fn verify_json(&self, json: &str, key: &RsaVerifyingKey) -> Result<bool> {
        let value: serde_json::Value =
            serde_json::from_str(json).map_err(|e| SignError::Parse(e.to_string()))?;
        if !value.is_object() {
            return Err(SignError::Parse("expected a JSON object".into()));
        }

        let envelope = match SignedEnvelope::from_value(value) {
            Ok(envelope) => envelope,
            Err(SignError::NotSigned) => return Err(SignError::NotSigned),
            Err(e) => {
                self.observer.on_event(&SigningEvent::VerificationFailed {
                    key_fingerprint: key.fingerprint(),
                    reason: e.to_string(),
                });
                return Ok(false);
            }
        };
        Ok(self.verify(&envelope, key))
    }

    /// Verify with an SPKI PEM public key.
    pub fn verify_pem(&self, envelope: &SignedEnvelope, public_key_pem: &str) -> Result<bool> {
        let key = RsaVerifyingKey::from_pem(public_key_pem)?;
        Ok(self.verify(envelope, &key))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Keys
    // ─────────────────────────────────────────────────────────────────────────

    /// Generate a key pair with the configured modulus size.
    pub fn generate_key_pair(&self) -> Result<KeyPair> {
        let pair = crate::crypto::generate_key_pair_with_bits(self.config.key_bits)?;
        self.observer.on_event(&SigningEvent::KeyGenerated {
            bits: self.config.key_bits,
        });
        Ok(pair)
    }
}

impl Default for Signer {
    fn default() -> Self {
        Self::new(SignerConfig::default())
    }
}

impl fmt::Debug for Signer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signer")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl SignedEnvelope {
    /// Append a signature entry with the default header.
    pub fn countersign(&mut self, key: &RsaSigningKey) -> Result<()> {
        let header = ProtectedHeader::rs256(SignerConfig::default().typ);
        let entry = JwsSignature::create(&header, self.payload(), key, None)?;
        self.push_signature(entry);
        Ok(())
    }
}

/// `vcon.sign(&key)` with the default signer.
pub trait SignVcon {
    fn sign(self, key: &RsaSigningKey) -> Result<SignedEnvelope>;
}

impl SignVcon for Vcon {
    fn sign(self, key: &RsaSigningKey) -> Result<SignedEnvelope> {
        Signer::default().sign(self, key)
    }
}

/// Signing and verification off the async executor.
///
/// The RSA primitive runs on tokio's blocking pool; nothing else suspends.
#[async_trait]
pub trait AsyncSign {
    async fn sign_async(&self, vcon: Vcon, key: RsaSigningKey) -> Result<SignedEnvelope>;

    async fn verify_async(&self, envelope: SignedEnvelope, key: RsaVerifyingKey) -> Result<bool>;
}

#[async_trait]
impl AsyncSign for Signer {
    async fn sign_async(&self, vcon: Vcon, key: RsaSigningKey) -> Result<SignedEnvelope> {
        let signer = self.clone();
        tokio::task::spawn_blocking(move || signer.sign(vcon, &key))
            .await
            .map_err(|e| SignError::Task(format!("spawn_blocking failed: {}", e)))?
    }

    async fn verify_async(&self, envelope: SignedEnvelope, key: RsaVerifyingKey) -> Result<bool> {
        let signer = self.clone();
        tokio::task::spawn_blocking(move || signer.verify(&envelope, &key))
            .await
            .map_err(|e| SignError::Task(format!("spawn_blocking failed: {}", e)))
    }
}
