//! # vCon
//!
//! Conversation records: a JSON-serializable model of a multi-party
//! interaction (calls, messages, video), with analysis annotations and a
//! detachable JWS signature.
//!
//! ## Overview
//!
//! - **Record**: [`Vcon`] owns parties, dialogs, attachments, analyses, and tags
//! - **Canonical JSON**: sorted keys, compact, the bytes that get signed
//! - **Signing**: consumes a record and yields a [`SignedEnvelope`]
//! - **Documents**: [`VconDocument`] parses either wire state
//!
//! ## Usage
//!
//! ```rust,no_run
//! use chrono::Utc;
//! use vcon::{Dialog, Party, Signer, SignerConfig, Vcon};
//!
//! let signer = Signer::new(SignerConfig::default());
//! let keys = signer.generate_key_pair().unwrap();
//! let key = vcon::RsaSigningKey::from_pem(&keys.private_key).unwrap();
//!
//! let mut vcon = Vcon::new();
//! let alice = vcon.add_party(Party::with_tel("+12025551234"));
//! let bob = vcon.add_party(Party::with_mailto("bob@example.com"));
//!
//! let mut dialog = Dialog::new("text", Utc::now(), vec![alice, bob]);
//! dialog.add_inline_data("hi", "hi.txt", "text/plain").unwrap();
//! vcon.add_dialog(dialog);
//!
//! let envelope = signer.sign(vcon, &key).unwrap();
//! assert!(signer.verify(&envelope, &key.verifying_key()));
//! ```
//!
//! ## Re-exports
//!
//! - `vcon::core` - Data model, canonical JSON, validation
//! - `vcon::sign` - Keys, envelopes, signer

pub mod document;
pub mod error;

// Re-export component crates
pub use vcon_core as core;
pub use vcon_sign as sign;

pub use document::VconDocument;
pub use error::{Error, Result};

// Re-export commonly used types
pub use vcon_core::{
    canonical_json, validate_vcon, Analysis, AnalysisParams, Attachment, CivicAddress, Dialog,
    DialogRef, Encoding, MimeType, Party, PartyHistory, ValidationError, Vcon, VconBuilder,
    VCON_VERSION,
};
pub use vcon_sign::{
    generate_key_pair, AsyncSign, KeyPair, RsaSigningKey, RsaVerifyingKey, SignError, SignVcon,
    SignedEnvelope, Signer, SignerConfig, SigningEvent, SigningObserver, TracingObserver,
};
