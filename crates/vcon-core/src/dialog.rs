//! Dialogs: individual recorded exchanges within a conversation.
//!
//! A dialog carries its payload either inline (`body` + `encoding`) or by
//! reference (`url` + `filename`), never both. The `add_*_data` methods keep
//! the two forms mutually exclusive.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

use crate::error::ValidationError;
use crate::party::PartyHistory;
use crate::types::{to_object, Encoding, MimeType};

/// Keys with a dedicated field on [`Dialog`].
const DIALOG_FIELDS: [&str; 26] = [
    "type",
    "start",
    "parties",
    "originator",
    "mimetype",
    "filename",
    "body",
    "encoding",
    "url",
    "alg",
    "signature",
    "disposition",
    "party_history",
    "transferee",
    "transferor",
    "transfer_target",
    "original",
    "consultation",
    "target_dialog",
    "campaign",
    "interaction",
    "skill",
    "duration",
    "meta",
    "content_hash",
    "application",
];

/// One recorded exchange (text, audio, video, or email).
///
/// `type`, `start`, and `parties` are fixed at construction. Every other field
/// is public and may be mutated directly; unset fields are omitted when
/// serialized. A parsed dialog missing `type` or `parties` gets an empty value;
/// one missing `start` keeps it absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dialog {
    #[serde(rename = "type", default)]
    kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    start: Option<DateTime<Utc>>,
    #[serde(default)]
    parties: Vec<usize>,

    /// Index of the party that started the dialog.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub originator: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mimetype: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encoding: Option<Encoding>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    // Integrity of externally referenced content.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alg: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_hash: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disposition: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub party_history: Option<Vec<PartyHistory>>,

    // Transfer and consultation linkage.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transferee: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transferor: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transfer_target: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consultation: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_dialog: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub campaign: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interaction: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skill: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application: Option<String>,

    /// Length of the exchange in seconds, kept as the number it was given as.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<Number>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Map<String, Value>>,

    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl Dialog {
    /// Create a dialog with its required fields.
    pub fn new(kind: impl Into<String>, start: DateTime<Utc>, parties: Vec<usize>) -> Self {
        Self {
            kind: kind.into(),
            start: Some(start),
            parties,
            originator: None,
            mimetype: None,
            filename: None,
            body: None,
            encoding: None,
            url: None,
            alg: None,
            signature: None,
            content_hash: None,
            disposition: None,
            party_history: None,
            transferee: None,
            transferor: None,
            transfer_target: None,
            original: None,
            consultation: None,
            target_dialog: None,
            campaign: None,
            interaction: None,
            skill: None,
            application: None,
            duration: None,
            meta: None,
            extra: Map::new(),
        }
    }

    /// The dialog type.
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// When the dialog started. Only a parsed dialog can lack it.
    pub fn start(&self) -> Option<DateTime<Utc>> {
        self.start
    }

    /// Indices into the record's party list.
    pub fn parties(&self) -> &[usize] {
        &self.parties
    }

    /// Point the dialog at externally stored content.
    ///
    /// Clears any inline `body`/`encoding`.
    pub fn add_external_data(
        &mut self,
        url: impl Into<String>,
        filename: impl Into<String>,
        mimetype: &str,
    ) -> Result<(), ValidationError> {
        let mime: MimeType = mimetype.parse()?;

        self.url = Some(url.into());
        self.filename = Some(filename.into());
        self.mimetype = Some(mime.as_str().to_string());
        self.body = None;
        self.encoding = None;
        Ok(())
    }

    /// Embed content directly in the dialog.
    ///
    /// Clears any external `url`.
    pub fn add_inline_data(
        &mut self,
        body: impl Into<String>,
        filename: impl Into<String>,
        mimetype: &str,
    ) -> Result<(), ValidationError> {
        let mime: MimeType = mimetype.parse()?;

        self.body = Some(body.into());
        self.filename = Some(filename.into());
        self.mimetype = Some(mime.as_str().to_string());
        self.url = None;
        Ok(())
    }

    /// Whether the content is referenced by `url`.
    pub fn is_external_data(&self) -> bool {
        self.url.is_some()
    }

    /// Whether the content is carried in `body`.
    pub fn is_inline_data(&self) -> bool {
        self.body.is_some()
    }

    /// The current `mimetype`, if it is one of the known dialog types.
    pub fn mime_type(&self) -> Option<MimeType> {
        self.mimetype.as_deref().and_then(MimeType::parse)
    }

    /// Whether `mimetype` is a text type.
    pub fn is_text(&self) -> bool {
        self.mime_type().is_some_and(MimeType::is_text)
    }

    /// Whether `mimetype` is an audio type.
    pub fn is_audio(&self) -> bool {
        self.mime_type().is_some_and(MimeType::is_audio)
    }

    /// Whether `mimetype` is a video type.
    pub fn is_video(&self) -> bool {
        self.mime_type().is_some_and(MimeType::is_video)
    }

    /// Whether `mimetype` is an email type.
    pub fn is_email(&self) -> bool {
        self.mime_type().is_some_and(MimeType::is_email)
    }

    /// Set an extension field. Keys with a dedicated field are rejected.
    pub fn set_extra(
        &mut self,
        key: impl Into<String>,
        value: impl Into<Value>,
    ) -> Result<(), ValidationError> {
        let key = key.into();
        if DIALOG_FIELDS.contains(&key.as_str()) {
            return Err(ValidationError::ReservedField(key));
        }
        self.extra.insert(key, value.into());
        Ok(())
    }

    /// Extension fields that have no dedicated field.
    pub fn extra(&self) -> &Map<String, Value> {
        &self.extra
    }

    /// The JSON value of a field by wire name, if set.
    pub fn field(&self, name: &str) -> Option<Value> {
        self.to_dict().remove(name)
    }

    /// Dictionary form: `type`, `start` (when set), `parties`, plus every set field.
    pub fn to_dict(&self) -> Map<String, Value> {
        to_object(self)
    }
}
