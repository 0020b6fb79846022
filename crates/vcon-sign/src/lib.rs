//! # vCon Sign
//!
//! JWS signing and verification for vCon records.
//!
//! ## Overview
//!
//! A record is either unsigned ([`vcon_core::Vcon`]) or signed
//! ([`SignedEnvelope`]). Signing consumes the record: its canonical JSON is
//! base64url-encoded into the envelope `payload`, and each signature entry
//! covers `protected "." payload` with RS256.
//!
//! ## Key Concepts
//!
//! - **Signer**: Signs records and verifies envelopes, reporting to a [`SigningObserver`]
//! - **SignedEnvelope**: `{signatures, payload}`, the only fields of a signed record
//! - **Keys**: RSA, exchanged as PEM (PKCS#8 private, SPKI public)
//!
//! Verification never errors on bad signature data; it returns `false`.
//! The one precondition failure is [`SignError::NotSigned`], for JSON that
//! carries no envelope at all.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use vcon_core::{Party, Vcon};
//! use vcon_sign::{RsaSigningKey, SignVcon, Signer};
//!
//! let key = RsaSigningKey::generate(2048).unwrap();
//!
//! let mut vcon = Vcon::new();
//! vcon.add_party(Party::with_tel("+12025551234"));
//!
//! let envelope = vcon.sign(&key).unwrap();
//! assert!(Signer::default().verify(&envelope, &key.verifying_key()));
//! ```

pub mod config;
pub mod crypto;
pub mod envelope;
pub mod error;
pub mod observer;
pub mod signer;

pub use config::{SignerConfig, DEFAULT_KEY_BITS};
pub use crypto::{
    generate_key_pair, generate_key_pair_with_bits, KeyPair, RsaSigningKey, RsaVerifyingKey,
};
pub use envelope::{JwsSignature, ProtectedHeader, SignedEnvelope, ALG_RS256};
pub use error::{Result, SignError};
pub use observer::{NoopObserver, SigningEvent, SigningObserver, TracingObserver};
pub use signer::{AsyncSign, SignVcon, Signer};
