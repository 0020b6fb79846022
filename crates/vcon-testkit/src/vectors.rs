//! Golden test vectors for deterministic verification.
//!
//! These vectors pin the canonical JSON of fixed records, the base64url
//! payload derived from it, and the RS256 signature made with the primary
//! fixture key. RSASSA-PKCS1-v1_5 is deterministic, so every implementation
//! must reproduce the signatures byte for byte.

use chrono::{DateTime, TimeZone, Utc};
use vcon_core::{canonical_json, AnalysisParams, Attachment, Dialog, Party, Vcon};
use vcon_sign::{SignedEnvelope, Signer, SignerConfig};

use crate::fixtures::{fixed_time, signing_key};

/// Base64url of `{"alg":"RS256","typ":"JWS"}`.
pub const PROTECTED_HEADER_B64: &str = "eyJhbGciOiJSUzI1NiIsInR5cCI6IkpXUyJ9";

/// A golden test vector.
#[derive(Debug, Clone)]
pub struct GoldenVector {
    /// Human-readable name for the vector.
    pub name: &'static str,
    /// Builds the input record.
    pub build: fn() -> Vcon,
    /// Expected canonical JSON.
    pub canonical: &'static str,
    /// Expected envelope payload (base64url of `canonical`).
    pub payload: &'static str,
    /// Expected RS256 signature under the primary fixture key (base64url).
    pub signature: &'static str,
}

fn at(hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 15, hour, minute, 0)
        .single()
        .expect("valid timestamp")
}

fn minimal() -> Vcon {
    Vcon::builder()
        .uuid("00000000-0000-4000-8000-000000000000")
        .version("0.0.1")
        .created_at(fixed_time())
        .updated_at(fixed_time())
        .build()
}

fn two_party_text() -> Vcon {
    let mut alice = Party::with_tel("+12025551234");
    alice.name = Some("Alice".to_string());

    let mut dialog = Dialog::new("text", fixed_time(), vec![0, 1]);
    dialog.originator = Some(0);
    dialog
        .add_inline_data("hi", "hi.txt", "text/plain")
        .expect("text/plain is a dialog MIME type");

    Vcon::builder()
        .uuid("00000000-0000-4000-8000-000000000001")
        .version("0.0.1")
        .subject("greeting")
        .created_at(fixed_time())
        .updated_at(fixed_time())
        .party(alice)
        .party(Party::with_mailto("bob@example.com"))
        .dialog(dialog)
        .build()
}

fn attachment_analysis_tags() -> Vcon {
    Vcon::builder()
        .uuid("00000000-0000-4000-8000-000000000002")
        .version("0.0.1")
        .group("support")
        .created_at(fixed_time())
        .updated_at(at(11, 0))
        .attachment(
            Attachment::new("application/pdf", "X", "base64")
                .expect("base64 is an attachment encoding"),
        )
        .analysis(AnalysisParams::new("summary", 0, "acme", "short call").build())
        .tag("priority", "high")
        .tag("campaign", "spring")
        .build()
}

/// Get all golden test vectors.
pub fn all_vectors() -> Vec<GoldenVector> {
    vec![
        GoldenVector {
            name: "minimal record",
            build: minimal,
            canonical: r#"{"analysis":[],"attachments":[],"created_at":"2024-01-15T10:30:00Z","dialog":[],"parties":[],"tags":{},"updated_at":"2024-01-15T10:30:00Z","uuid":"00000000-0000-4000-8000-000000000000","vcon":"0.0.1"}"#,
            payload: "eyJhbmFseXNpcyI6W10sImF0dGFjaG1lbnRzIjpbXSwiY3JlYXRlZF9hdCI6IjIwMjQtMDEtMTVUMTA6MzA6MDBaIiwiZGlhbG9nIjpbXSwicGFydGllcyI6W10sInRhZ3MiOnt9LCJ1cGRhdGVkX2F0IjoiMjAyNC0wMS0xNVQxMDozMDowMFoiLCJ1dWlkIjoiMDAwMDAwMDAtMDAwMC00MDAwLTgwMDAtMDAwMDAwMDAwMDAwIiwidmNvbiI6IjAuMC4xIn0",
            signature: "lEEAssbnFGqO215KK0adgChTN44LKfoPX59Xr7TWhTm6-I_Lo5uTb3eE2XVWRMR4F7gAck27bDBnXIbKIIG9UtMsyFgzWY6Ba1zXsUlv3n6bQE6pIb0PpSxKowicpbf3M9SkzAeM1z4vxu9Yiy59K6pN6JQEJKZxhcr3zkkuX9_qcu0ctrQo3xGdKmgwlfKyUVjNrICsB3NW_EYOw-nPjMx5gsECHMWanbWKhqpUQjj9W-7BEslSV1CGobLZaMcSNr1IuUfW0wAAqdhlAGW75HK3mIh9LqqdTOXhFoDac7hC0y4j-fZYzc4qBAZXGnSctZ6OhwJXDPxSI3nU3WSKfg",
        },
        GoldenVector {
            name: "two-party text dialog",
            build: two_party_text,
            canonical: r#"{"analysis":[],"attachments":[],"created_at":"2024-01-15T10:30:00Z","dialog":[{"body":"hi","filename":"hi.txt","mimetype":"text/plain","originator":0,"parties":[0,1],"start":"2024-01-15T10:30:00Z","type":"text"}],"parties":[{"name":"Alice","tel":"+12025551234"},{"mailto":"bob@example.com"}],"subject":"greeting","tags":{},"updated_at":"2024-01-15T10:30:00Z","uuid":"00000000-0000-4000-8000-000000000001","vcon":"0.0.1"}"#,
            payload: "eyJhbmFseXNpcyI6W10sImF0dGFjaG1lbnRzIjpbXSwiY3JlYXRlZF9hdCI6IjIwMjQtMDEtMTVUMTA6MzA6MDBaIiwiZGlhbG9nIjpbeyJib2R5IjoiaGkiLCJmaWxlbmFtZSI6ImhpLnR4dCIsIm1pbWV0eXBlIjoidGV4dC9wbGFpbiIsIm9yaWdpbmF0b3IiOjAsInBhcnRpZXMiOlswLDFdLCJzdGFydCI6IjIwMjQtMDEtMTVUMTA6MzA6MDBaIiwidHlwZSI6InRleHQifV0sInBhcnRpZXMiOlt7Im5hbWUiOiJBbGljZSIsInRlbCI6IisxMjAyNTU1MTIzNCJ9LHsibWFpbHRvIjoiYm9iQGV4YW1wbGUuY29tIn1dLCJzdWJqZWN0IjoiZ3JlZXRpbmciLCJ0YWdzIjp7fSwidXBkYXRlZF9hdCI6IjIwMjQtMDEtMTVUMTA6MzA6MDBaIiwidXVpZCI6IjAwMDAwMDAwLTAwMDAtNDAwMC04MDAwLTAwMDAwMDAwMDAwMSIsInZjb24iOiIwLjAuMSJ9",
            signature: "B4T2-JFPfFI8OdXbQojrISysqb3dajPKuVSWyonXYgveL5obgL8VC0A-Yforw9WXl1EIdKYrFLwJuV23v7FxbSJbnu6U1HdVlt_II_2caOc3qTecdvIyLBbbpCmswq9aEHu16xFmfG27Mu8ULSk0Qgq2qjTDT4NYdrAhMbvvH7m88hEcGU_QHk2RQ1Lod5Msl0GhJdMWQn9_811s_SOo_lxXVKhVUjZDGbIeyw2zHyE1oK_lvoW9ui8hl1-gdN9nNQM4HUOB0AlUQwjTmish1ADgcFo4WGNIurPy94d3pKuAo3JRpva9blGxE-l7PO2A0XZBLIwa5S8mQzgqxFDaNg",
        },
        GoldenVector {
            name: "attachment, analysis, and tags",
            build: attachment_analysis_tags,
            canonical: r#"{"analysis":[{"body":"short call","dialog":0,"encoding":"none","extra":{},"type":"summary","vendor":"acme"}],"attachments":[{"body":"X","encoding":"base64","type":"application/pdf"}],"created_at":"2024-01-15T10:30:00Z","dialog":[],"group":"support","parties":[],"tags":{"campaign":"spring","priority":"high"},"updated_at":"2024-01-15T11:00:00Z","uuid":"00000000-0000-4000-8000-000000000002","vcon":"0.0.1"}"#,
            payload: "eyJhbmFseXNpcyI6W3siYm9keSI6InNob3J0IGNhbGwiLCJkaWFsb2ciOjAsImVuY29kaW5nIjoibm9uZSIsImV4dHJhIjp7fSwidHlwZSI6InN1bW1hcnkiLCJ2ZW5kb3IiOiJhY21lIn1dLCJhdHRhY2htZW50cyI6W3siYm9keSI6IlgiLCJlbmNvZGluZyI6ImJhc2U2NCIsInR5cGUiOiJhcHBsaWNhdGlvbi9wZGYifV0sImNyZWF0ZWRfYXQiOiIyMDI0LTAxLTE1VDEwOjMwOjAwWiIsImRpYWxvZyI6W10sImdyb3VwIjoic3VwcG9ydCIsInBhcnRpZXMiOltdLCJ0YWdzIjp7ImNhbXBhaWduIjoic3ByaW5nIiwicHJpb3JpdHkiOiJoaWdoIn0sInVwZGF0ZWRfYXQiOiIyMDI0LTAxLTE1VDExOjAwOjAwWiIsInV1aWQiOiIwMDAwMDAwMC0wMDAwLTQwMDAtODAwMC0wMDAwMDAwMDAwMDIiLCJ2Y29uIjoiMC4wLjEifQ",
            signature: "Nk9afVKjGlj2SmMNoDy3q5bY90xCPfKAqvjbEDejMkq1cKpxvbwB2RL87te1mn3slXf-coKzaiEzCk64kTjv_2Yhz4jRV1WATnKJ4dUXJpxPArnWsjBdHNsp3qqx_mrGqkfx9g8L5yGaonRpequRUZCgOWKZhsXicfd0_ikGPoKlujuhy3a9ZsW7iTwJ38s9iAbHQNEO9foFcn1JYV1qzF2uNXR2jSrl6YuiCtv9yRhfop-egvRZwIhqYlgCPyxgnnkmWpErM1GLJWGPlg9yk5RMRPk418Jj5OUSAAamfQu6kMFubIz_dSVKL5ULUINlYlDpW1LeSUiTj4Uj4jx6kg",
        },
    ]
}

/// Sign a vector's record with the primary fixture key.
pub fn sign_vector(vector: &GoldenVector) -> SignedEnvelope {
    Signer::new(SignerConfig::default())
        .sign((vector.build)(), signing_key())
        .expect("fixture key signs")
}

/// Check every vector; returns the name and reason of the first mismatch.
pub fn verify_all_vectors() -> Result<(), String> {
    for vector in all_vectors() {
        let vcon = (vector.build)();
        let canonical = canonical_json(&vcon).map_err(|e| format!("{}: {}", vector.name, e))?;
        if canonical != vector.canonical {
            return Err(format!("{}: canonical JSON mismatch", vector.name));
        }

        let envelope = sign_vector(&vector);
        if envelope.payload() != vector.payload {
            return Err(format!("{}: payload mismatch", vector.name));
        }
        let entry = &envelope.signatures()[0];
        if entry.protected != PROTECTED_HEADER_B64 {
            return Err(format!("{}: protected header mismatch", vector.name));
        }
        if entry.signature != vector.signature {
            return Err(format!("{}: signature mismatch", vector.name));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::verifying_key;
    use vcon_sign::ProtectedHeader;

    #[test]
    fn test_vectors_reproduce() {
        verify_all_vectors().unwrap();
    }

    #[test]
    fn test_header_constant() {
        assert_eq!(
            ProtectedHeader::rs256("JWS").encode().unwrap(),
            PROTECTED_HEADER_B64
        );
    }

    #[test]
    fn test_vector_envelopes_verify() {
        for vector in all_vectors() {
            let envelope = sign_vector(&vector);
            assert!(envelope.verify(&verifying_key()), "{}", vector.name);
            assert_eq!(envelope.payload_json().unwrap(), vector.canonical);
            assert_eq!(envelope.decode_payload().unwrap(), (vector.build)());
        }
    }

    #[test]
    fn test_vector_names_unique() {
        let vectors = all_vectors();
        let mut names: Vec<_> = vectors.iter().map(|v| v.name).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), vectors.len());
    }
}
