//! Proptest generators for property-based testing.
//!
//! Generated records are structurally valid: every party and dialog index
//! points into the record, and `updated_at` never precedes `created_at`.

use std::collections::BTreeMap;

use chrono::{DateTime, TimeZone, Utc};
use proptest::prelude::*;

use vcon_core::{
    Analysis, AnalysisParams, Attachment, Dialog, DialogRef, Encoding, MimeType, Party, Vcon,
};

/// Generate a timestamp with whole-second precision between 2000 and 2100.
pub fn timestamp() -> impl Strategy<Value = DateTime<Utc>> {
    (946_684_800i64..4_102_444_800i64).prop_map(|secs| {
        Utc.timestamp_opt(secs, 0)
            .single()
            .expect("in-range timestamp")
    })
}

/// Generate a `MAJOR.MINOR.PATCH` version string.
pub fn version() -> impl Strategy<Value = String> {
    (0u32..10, 0u32..10, 0u32..100).prop_map(|(a, b, c)| format!("{a}.{b}.{c}"))
}

/// Generate a uuid-shaped identifier.
pub fn uuid() -> impl Strategy<Value = String> {
    any::<u128>().prop_map(|n| {
        let hex = format!("{n:032x}");
        format!(
            "{}-{}-{}-{}-{}",
            &hex[0..8],
            &hex[8..12],
            &hex[12..16],
            &hex[16..20],
            &hex[20..32]
        )
    })
}

/// Generate a short printable string.
pub fn text() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ,.!?-]{0,24}".prop_map(String::from)
}

/// Generate a telephone number.
pub fn tel() -> impl Strategy<Value = String> {
    "\\+[0-9]{10,12}".prop_map(String::from)
}

/// Generate a mail address.
pub fn mailto() -> impl Strategy<Value = String> {
    "[a-z]{1,8}@[a-z]{1,8}\\.com".prop_map(String::from)
}

/// Generate a dialog MIME type.
pub fn mime_type() -> impl Strategy<Value = MimeType> {
    prop::sample::select(MimeType::ALL.to_vec())
}

/// Generate an attachment encoding.
pub fn attachment_encoding() -> impl Strategy<Value = Encoding> {
    prop::sample::select(Encoding::ATTACHMENT.to_vec())
}

/// Generate a party with a telephone or mail identity and optional extras.
pub fn party() -> impl Strategy<Value = Party> {
    (
        prop_oneof![tel().prop_map(Party::with_tel), mailto().prop_map(Party::with_mailto)],
        prop::option::of(text()),
        prop::option::of(prop::sample::select(vec!["agent", "customer", "supervisor"])),
        prop::option::of("[a-z]{1,6}"),
    )
        .prop_map(|(mut party, name, role, extra)| {
            party.name = name;
            party.role = role.map(String::from);
            if let Some(value) = extra {
                // "x_" keys never collide with dedicated fields.
                let _ = party.set_extra(format!("x_{value}"), value);
            }
            party
        })
}

/// Generate a dialog over `party_count` parties, with inline or external content.
pub fn dialog(party_count: usize) -> impl Strategy<Value = Dialog> {
    let max = party_count.max(1);
    (
        prop::sample::select(vec!["text", "recording", "transfer", "incomplete"]),
        timestamp(),
        prop::collection::vec(0..max, 0..=max),
        prop::option::of(0..max),
        mime_type(),
        any::<bool>(),
        text(),
        prop::option::of(0u32..7200),
    )
        .prop_map(
            |(kind, start, parties, originator, mime, inline, body, duration)| {
                let mut dialog = Dialog::new(kind, start, parties);
                dialog.originator = originator;
                dialog.duration = duration.map(Into::into);
                let result = if inline {
                    dialog.add_inline_data(body, "content.txt", mime.as_str())
                } else {
                    dialog.add_external_data("https://example.com/media", "media", mime.as_str())
                };
                debug_assert!(result.is_ok());
                dialog
            },
        )
}

/// Generate an attachment.
pub fn attachment() -> impl Strategy<Value = Attachment> {
    (
        prop::sample::select(vec!["application/pdf", "image/png", "text/csv"]),
        text(),
        attachment_encoding(),
    )
        .prop_filter_map("attachment encoding", |(kind, body, encoding)| {
            Attachment::with_encoding(kind, body, encoding).ok()
        })
}

/// Generate an analysis over `dialog_count` dialogs.
pub fn analysis(dialog_count: usize) -> impl Strategy<Value = Analysis> {
    let max = dialog_count.max(1);
    (
        prop::sample::select(vec!["summary", "transcript", "sentiment"]),
        prop_oneof![
            (0..max).prop_map(DialogRef::Single),
            prop::collection::vec(0..max, 1..=max).prop_map(DialogRef::Many),
        ],
        "[a-z]{3,10}",
        text(),
    )
        .prop_map(|(kind, dialog, vendor, body)| {
            AnalysisParams::new(kind, dialog, vendor, body).build()
        })
}

/// Generate a flat tag map.
pub fn tags() -> impl Strategy<Value = BTreeMap<String, String>> {
    prop::collection::btree_map("[a-z]{1,8}", "[a-z0-9]{0,8}", 0..4)
}

/// Parameters for generating a record.
#[derive(Debug, Clone)]
pub struct VconParams {
    pub uuid: String,
    pub version: String,
    pub subject: Option<String>,
    pub created_at: DateTime<Utc>,
    pub age_secs: u32,
    pub redacted: Option<bool>,
    pub parties: Vec<Party>,
    pub dialog: Vec<Dialog>,
    pub attachments: Vec<Attachment>,
    pub analysis: Vec<Analysis>,
    pub tags: BTreeMap<String, String>,
}

impl Arbitrary for VconParams {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (
            uuid(),
            version(),
            prop::option::of(text()),
            timestamp(),
            0u32..86_400,
            prop::option::of(any::<bool>()),
            prop::collection::vec(party(), 1..4),
            tags(),
        )
            .prop_flat_map(
                |(uuid, version, subject, created_at, age_secs, redacted, parties, tags)| {
                    let party_count = parties.len();
                    prop::collection::vec(dialog(party_count), 0..3).prop_flat_map(move |dialog| {
                        let dialog_count = dialog.len();
                        let analyses = if dialog_count == 0 {
                            Just(Vec::new()).boxed()
                        } else {
                            prop::collection::vec(analysis(dialog_count), 0..3).boxed()
                        };
                        let (uuid, version, subject, parties, tags) = (
                            uuid.clone(),
                            version.clone(),
                            subject.clone(),
                            parties.clone(),
                            tags.clone(),
                        );
                        (prop::collection::vec(attachment(), 0..3), analyses).prop_map(
                            move |(attachments, analysis)| VconParams {
                                uuid: uuid.clone(),
                                version: version.clone(),
                                subject: subject.clone(),
                                created_at,
                                age_secs,
                                redacted,
                                parties: parties.clone(),
                                dialog: dialog.clone(),
                                attachments,
                                analysis,
                                tags: tags.clone(),
                            },
                        )
                    })
                },
            )
            .boxed()
    }
}

/// Build a record from parameters.
pub fn vcon_from_params(params: &VconParams) -> Vcon {
    let mut builder = Vcon::builder()
        .uuid(params.uuid.clone())
        .version(params.version.clone())
        .created_at(params.created_at)
        .updated_at(params.created_at + chrono::Duration::seconds(i64::from(params.age_secs)));

    if let Some(subject) = &params.subject {
        builder = builder.subject(subject.clone());
    }
    if let Some(redacted) = params.redacted {
        builder = builder.redacted(redacted);
    }
    for party in &params.parties {
        builder = builder.party(party.clone());
    }
    for dialog in &params.dialog {
        builder = builder.dialog(dialog.clone());
    }
    for attachment in &params.attachments {
        builder = builder.attachment(attachment.clone());
    }
    for analysis in &params.analysis {
        builder = builder.analysis(analysis.clone());
    }
    for (name, value) in &params.tags {
        builder = builder.tag(name.clone(), value.clone());
    }
    builder.build()
}

/// Generate a structurally valid record.
pub fn vcon() -> impl Strategy<Value = Vcon> {
    any::<VconParams>().prop_map(|params| vcon_from_params(&params))
}

#[cfg(test)]
mod tests {
    use super::*;
    use vcon_core::validate_vcon;

    proptest! {
        #[test]
        fn generated_records_are_valid(vcon in vcon()) {
            prop_assert!(validate_vcon(&vcon).is_ok(), "{:?}", validate_vcon(&vcon));
        }

        #[test]
        fn generated_parties_have_identity(party in party()) {
            prop_assert!(party.tel.is_some() || party.mailto.is_some());
        }

        #[test]
        fn generated_dialogs_hold_one_payload_kind(dialog in dialog(3)) {
            prop_assert!(dialog.is_inline_data() != dialog.is_external_data());
        }
    }
}
