//! Structured events emitted while signing and verifying.
//!
//! The signer reports what it does through an injected [`SigningObserver`]
//! instead of logging directly. [`TracingObserver`] forwards events to
//! `tracing`; [`NoopObserver`] drops them.

/// An event in the signing lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SigningEvent {
    /// The record was canonicalized into the to-be-signed payload.
    PayloadPrepared { uuid: String, payload_len: usize },
    /// A signature entry was produced.
    Signed {
        uuid: String,
        alg: String,
        key_fingerprint: String,
    },
    /// A signature entry verified.
    Verified { key_fingerprint: String },
    /// No signature entry verified.
    VerificationFailed {
        key_fingerprint: String,
        reason: String,
    },
    /// A key pair was generated.
    KeyGenerated { bits: usize },
}

/// Observer for signing events.
pub trait SigningObserver: Send + Sync {
    fn on_event(&self, event: &SigningEvent);
}

/// Forwards events to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl SigningObserver for TracingObserver {
    fn on_event(&self, event: &SigningEvent) {
        match event {
            SigningEvent::PayloadPrepared { uuid, payload_len } => {
                tracing::debug!(%uuid, payload_len, "prepared vCon payload for signing");
            }
            SigningEvent::Signed {
                uuid,
                alg,
                key_fingerprint,
            } => {
                tracing::debug!(%uuid, %alg, key = %key_fingerprint, "signed vCon");
            }
            SigningEvent::Verified { key_fingerprint } => {
                tracing::debug!(key = %key_fingerprint, "vCon signature verified");
            }
            SigningEvent::VerificationFailed {
                key_fingerprint,
                reason,
            } => {
                tracing::warn!(key = %key_fingerprint, %reason, "vCon signature rejected");
            }
            SigningEvent::KeyGenerated { bits } => {
                tracing::debug!(bits, "generated RSA key pair");
            }
        }
    }
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl SigningObserver for NoopObserver {
    fn on_event(&self, _event: &SigningEvent) {}
}
