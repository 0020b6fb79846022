//! # vCon Testkit
//!
//! Testing utilities for vCon records.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Golden vectors**: Fixed records with their expected canonical JSON, payload, and signature
//! - **Generators**: Proptest strategies for property-based testing
//! - **Fixtures**: Fixed RSA keys and ready-made records
//!
//! ## Golden Vectors
//!
//! ```rust
//! use vcon_testkit::vectors::{all_vectors, sign_vector};
//!
//! for vector in all_vectors() {
//!     let envelope = sign_vector(&vector);
//!     assert_eq!(envelope.payload(), vector.payload);
//! }
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use vcon_testkit::generators::{vcon_from_params, VconParams};
//!
//! proptest! {
//!     #[test]
//!     fn json_round_trip(params: VconParams) {
//!         let vcon = vcon_from_params(&params);
//!         let json = vcon.to_json().unwrap();
//!         prop_assert_eq!(vcon_core::Vcon::from_json(&json).unwrap(), vcon);
//!     }
//! }
//! ```
//!
//! ## Test Fixtures
//!
//! ```rust
//! use vcon_testkit::fixtures::{signing_key, two_party_text};
//! use vcon_sign::SignVcon;
//!
//! let envelope = two_party_text().sign(signing_key()).unwrap();
//! assert!(envelope.verify(&signing_key().verifying_key()));
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::{second_signing_key, signing_key, verifying_key};
pub use generators::{vcon_from_params, VconParams};
pub use vectors::{all_vectors, sign_vector, verify_all_vectors, GoldenVector};
