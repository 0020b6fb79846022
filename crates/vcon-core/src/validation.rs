//! Record validation: structural checks over a whole record.
//!
//! Mutators stay permissive (an index may be added before the party it points
//! at), so cross-references are checked here, on demand, typically right
//! before a record is serialized or signed.

use crate::error::ValidationError;
use crate::types::MimeType;
use crate::vcon::Vcon;

/// Validate a record's structure.
///
/// This performs:
/// - Version format check (`MAJOR.MINOR.PATCH`)
/// - Timestamp ordering
/// - Party references from dialogs and party history
/// - Dialog references from dialogs and analyses
/// - Inline/external payload exclusivity and dialog MIME types
/// - Attachment encodings
pub fn validate_vcon(vcon: &Vcon) -> Result<(), ValidationError> {
    // 1. Version
    let version = vcon.version();
    if !version.is_empty() && !is_semver(version) {
        return Err(ValidationError::InvalidVersion(version.to_string()));
    }

    // 2. Timestamps
    if vcon.updated_at() < vcon.created_at() {
        return Err(ValidationError::TimestampOrder);
    }

    let party_count = vcon.parties().len();
    let dialog_count = vcon.dialog().len();

    let check_party = |field: String, index: usize| {
        if index >= party_count {
            Err(ValidationError::PartyIndexOutOfRange {
                field,
                index,
                count: party_count,
            })
        } else {
            Ok(())
        }
    };
    let check_dialog = |field: String, index: usize| {
        if index >= dialog_count {
            Err(ValidationError::DialogIndexOutOfRange {
                field,
                index,
                count: dialog_count,
            })
        } else {
            Ok(())
        }
    };

    for (i, dialog) in vcon.dialog().iter().enumerate() {
        // 3. Party references
        for &p in dialog.parties() {
            check_party(format!("dialog[{i}].parties"), p)?;
        }
        for (name, index) in [
            ("originator", dialog.originator),
            ("transferee", dialog.transferee),
            ("transferor", dialog.transferor),
            ("transfer_target", dialog.transfer_target),
        ] {
            if let Some(index) = index {
                check_party(format!("dialog[{i}].{name}"), index)?;
            }
        }
        for (h, history) in dialog.party_history.iter().flatten().enumerate() {
            check_party(format!("dialog[{i}].party_history[{h}]"), history.party())?;
        }

        // 4. Dialog references
        for (name, index) in [
            ("original", dialog.original),
            ("consultation", dialog.consultation),
            ("target_dialog", dialog.target_dialog),
        ] {
            if let Some(index) = index {
                check_dialog(format!("dialog[{i}].{name}"), index)?;
            }
        }

        // 5. Payload form
        if dialog.body.is_some() && dialog.url.is_some() {
            return Err(ValidationError::ConflictingPayload(i));
        }
        if let Some(mimetype) = &dialog.mimetype {
            if MimeType::parse(mimetype).is_none() {
                return Err(ValidationError::InvalidMimeType(mimetype.clone()));
            }
        }
    }

    for (i, analysis) in vcon.analysis().iter().enumerate() {
        for index in analysis.dialog.indices() {
            check_dialog(format!("analysis[{i}].dialog"), index)?;
        }
    }

    // 6. Attachment encodings (parsing accepts any known encoding)
    for attachment in vcon.attachments() {
        if !attachment.encoding().is_attachment_encoding() {
            return Err(ValidationError::InvalidEncoding(
                attachment.encoding().to_string(),
            ));
        }
    }

    Ok(())
}

/// Check for `MAJOR.MINOR.PATCH` with decimal components.
fn is_semver(version: &str) -> bool {
    let parts: Vec<&str> = version.split('.').collect();
    parts.len() == 3
        && parts
            .iter()
            .all(|p| !p.is_empty() && p.bytes().all(|b| b.is_ascii_digit()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::AnalysisParams;
    use crate::dialog::Dialog;
    use crate::party::{Party, PartyHistory};
    use chrono::{Duration, TimeZone, Utc};

    fn start() -> chrono::DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap()
    }

    fn two_party_vcon() -> Vcon {
        let mut vcon = Vcon::new();
        vcon.add_party(Party::with_tel("+1"));
        vcon.add_party(Party::with_tel("+2"));
        vcon
    }

    #[test]
    fn test_valid_record() {
        let mut vcon = two_party_vcon();
        let mut dialog = Dialog::new("text", start(), vec![0, 1]);
        dialog.originator = Some(1);
        dialog.party_history = Some(vec![PartyHistory::new(0, "join", start())]);
        vcon.add_dialog(dialog);
        vcon.add_analysis(AnalysisParams::new("summary", 0, "acme", "ok"));

        assert!(validate_vcon(&vcon).is_ok());
    }

    #[test]
    fn test_empty_record_is_valid() {
        assert!(validate_vcon(&Vcon::new()).is_ok());
    }

    #[test]
    fn test_dialog_party_out_of_range() {
        let mut vcon = two_party_vcon();
        vcon.add_dialog(Dialog::new("text", start(), vec![0, 2]));

        let err = validate_vcon(&vcon).unwrap_err();
        assert_eq!(
            err,
            ValidationError::PartyIndexOutOfRange {
                field: "dialog[0].parties".into(),
                index: 2,
                count: 2,
            }
        );
    }

    #[test]
    fn test_originator_out_of_range() {
        let mut vcon = two_party_vcon();
        let mut dialog = Dialog::new("text", start(), vec![0]);
        dialog.originator = Some(5);
        vcon.add_dialog(dialog);

        assert!(matches!(
            validate_vcon(&vcon),
            Err(ValidationError::PartyIndexOutOfRange { index: 5, .. })
        ));
    }

    #[test]
    fn test_party_history_out_of_range() {
        let mut vcon = two_party_vcon();
        let mut dialog = Dialog::new("text", start(), vec![0]);
        dialog.party_history = Some(vec![PartyHistory::new(9, "join", start())]);
        vcon.add_dialog(dialog);

        assert!(matches!(
            validate_vcon(&vcon),
            Err(ValidationError::PartyIndexOutOfRange { index: 9, .. })
        ));
    }

    #[test]
    fn test_analysis_dialog_out_of_range() {
        let mut vcon = two_party_vcon();
        vcon.add_dialog(Dialog::new("text", start(), vec![0]));
        vcon.add_analysis(AnalysisParams::new("summary", vec![0, 1], "acme", "x"));

        assert!(matches!(
            validate_vcon(&vcon),
            Err(ValidationError::DialogIndexOutOfRange { index: 1, count: 1, .. })
        ));
    }

    #[test]
    fn test_conflicting_payload() {
        let mut vcon = two_party_vcon();
        let mut dialog = Dialog::new("recording", start(), vec![0]);
        dialog.body = Some("inline".into());
        dialog.url = Some("https://example.com/a.wav".into());
        vcon.add_dialog(dialog);

        assert_eq!(
            validate_vcon(&vcon),
            Err(ValidationError::ConflictingPayload(0))
        );
    }

    #[test]
    fn test_unknown_dialog_mimetype() {
        let mut vcon = two_party_vcon();
        let mut dialog = Dialog::new("recording", start(), vec![0]);
        dialog.mimetype = Some("audio/flac".into());
        vcon.add_dialog(dialog);

        assert!(matches!(
            validate_vcon(&vcon),
            Err(ValidationError::InvalidMimeType(m)) if m == "audio/flac"
        ));
    }

    #[test]
    fn test_invalid_version() {
        let vcon = Vcon::builder().version("1.0").build();
        assert!(matches!(
            validate_vcon(&vcon),
            Err(ValidationError::InvalidVersion(_))
        ));

        let vcon = Vcon::builder().version("1.x.0").build();
        assert!(validate_vcon(&vcon).is_err());

        let vcon = Vcon::builder().version("10.2.33").build();
        assert!(validate_vcon(&vcon).is_ok());
    }

    #[test]
    fn test_timestamp_order() {
        let vcon = Vcon::builder()
            .created_at(start())
            .updated_at(start() - Duration::seconds(1))
            .build();
        assert_eq!(validate_vcon(&vcon), Err(ValidationError::TimestampOrder));
    }

    #[test]
    fn test_parsed_json_attachment_encoding_rejected() {
        let vcon = Vcon::from_json(
            r#"{"attachments": [{"type": "application/json", "body": {}, "encoding": "json"}]}"#,
        )
        .unwrap();

        assert_eq!(
            validate_vcon(&vcon),
            Err(ValidationError::InvalidEncoding("json".into()))
        );
    }
}
