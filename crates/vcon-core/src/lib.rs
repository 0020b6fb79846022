//! # vCon Core
//!
//! The data model for vCon conversation records: parties, dialogs,
//! attachments, analyses, and the record that owns them.
//!
//! This crate contains no I/O and no cryptography. It is pure construction,
//! mutation, and (de)serialization of records.
//!
//! ## Key Types
//!
//! - [`Vcon`] - The conversation record aggregate
//! - [`Party`] - A participant descriptor
//! - [`Dialog`] - One recorded exchange
//! - [`Attachment`] - An opaque artifact with a declared encoding
//! - [`Analysis`] - A vendor annotation over one or more dialogs
//!
//! ## Canonicalization
//!
//! Records are signed over their canonical JSON form. See [`canonical`] module.

pub mod analysis;
pub mod attachment;
pub mod canonical;
pub mod dialog;
pub mod error;
pub mod party;
pub mod types;
pub mod validation;
pub mod vcon;

pub use analysis::{Analysis, AnalysisParams, DialogRef};
pub use attachment::Attachment;
pub use canonical::{canonical_bytes, canonical_json};
pub use dialog::Dialog;
pub use error::{CoreError, Result, ValidationError};
pub use party::{CivicAddress, Party, PartyHistory};
pub use types::{Encoding, MimeType, VCON_VERSION};
pub use validation::validate_vcon;
pub use vcon::{Vcon, VconBuilder};
