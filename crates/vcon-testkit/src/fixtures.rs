//! Test fixtures and helpers.
//!
//! Common setup code for integration tests. Keys are fixed PEMs so that signing
//! is deterministic and tests do not pay for RSA key generation.

use std::sync::OnceLock;

use chrono::{DateTime, TimeZone, Utc};
use vcon_core::{AnalysisParams, Dialog, Party, Vcon};
use vcon_sign::{RsaSigningKey, RsaVerifyingKey};

/// PKCS#8 PEM of the primary test key.
pub const PRIMARY_PRIVATE_PEM: &str = include_str!("../keys/primary.pem");
/// SPKI PEM of the primary test key.
pub const PRIMARY_PUBLIC_PEM: &str = include_str!("../keys/primary.pub.pem");
/// PKCS#8 PEM of an unrelated second key.
pub const SECONDARY_PRIVATE_PEM: &str = include_str!("../keys/secondary.pem");
/// SPKI PEM of the second key.
pub const SECONDARY_PUBLIC_PEM: &str = include_str!("../keys/secondary.pub.pem");

/// Hex SHA-256 of the primary key's SPKI DER.
pub const PRIMARY_FINGERPRINT: &str =
    "1ce51f55a477012a7c01359d7ad477d32b83ea2c55c29f80af2fb2bce21e8fa1";

/// The primary signing key, decoded once.
pub fn signing_key() -> &'static RsaSigningKey {
    static KEY: OnceLock<RsaSigningKey> = OnceLock::new();
    KEY.get_or_init(|| RsaSigningKey::from_pem(PRIMARY_PRIVATE_PEM).expect("primary test key"))
}

/// A second key, unrelated to [`signing_key`].
pub fn second_signing_key() -> &'static RsaSigningKey {
    static KEY: OnceLock<RsaSigningKey> = OnceLock::new();
    KEY.get_or_init(|| {
        RsaSigningKey::from_pem(SECONDARY_PRIVATE_PEM).expect("secondary test key")
    })
}

/// The primary public key.
pub fn verifying_key() -> RsaVerifyingKey {
    signing_key().verifying_key()
}

/// 2024-01-15T10:30:00Z.
pub fn fixed_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0)
        .single()
        .expect("valid timestamp")
}

/// Two parties and one inline `text/plain` dialog whose body is `"hi"`.
pub fn two_party_text() -> Vcon {
    let mut vcon = Vcon::new();
    vcon.add_party(Party::with_tel("+12025551234"));
    vcon.add_party(Party::with_tel("+02025559876"));

    let mut dialog = Dialog::new("text/plain", fixed_time(), vec![0, 1]);
    dialog.body = Some("hi".to_string());
    vcon.add_dialog(dialog);
    vcon
}

/// A record with a base64 PDF attachment.
pub fn pdf_attachment() -> Vcon {
    let mut vcon = Vcon::new();
    vcon.add_party(Party::with_mailto("alice@example.com"));
    vcon.add_attachment("application/pdf", "X", "base64")
        .expect("base64 is an attachment encoding");
    vcon
}

/// A call between an agent and a customer, with a recording, a transfer,
/// and a transcript analysis.
pub fn call_center() -> Vcon {
    let start = fixed_time();

    let mut vcon = Vcon::new();
    vcon.set_subject("billing question");
    let customer = vcon.add_party(Party::with_tel("+15551230001"));
    let mut agent = Party::with_mailto("smith@example.com");
    agent.name = Some("Agent Smith".to_string());
    agent.role = Some("agent".to_string());
    let agent = vcon.add_party(agent);
    let mut supervisor = Party::with_tel("+15551230099");
    supervisor.role = Some("supervisor".to_string());
    let supervisor = vcon.add_party(supervisor);

    let mut recording = Dialog::new("recording", start, vec![customer, agent]);
    recording.originator = Some(customer);
    recording.duration = Some(120u32.into());
    recording
        .add_external_data("https://example.com/recordings/1.wav", "1.wav", "audio/x-wav")
        .expect("audio/x-wav is a dialog MIME type");
    let recording = vcon.add_dialog(recording);

    let mut transfer = Dialog::new("transfer", start, vec![agent, supervisor]);
    transfer.transferor = Some(agent);
    transfer.transferee = Some(customer);
    transfer.transfer_target = Some(supervisor);
    transfer.original = Some(recording);
    vcon.add_dialog(transfer);

    vcon.add_analysis(AnalysisParams::new(
        "transcript",
        recording,
        "acme-asr",
        "customer asked about a double charge",
    ));
    vcon.add_tag("queue", "billing");
    vcon
}
