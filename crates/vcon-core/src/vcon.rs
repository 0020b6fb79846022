//! The conversation record aggregate.
//!
//! A [`Vcon`] owns its parties, dialogs, attachments, analyses, and tags by
//! value. Every mutating call refreshes `updated_at`; there is no other
//! versioning.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::analysis::{Analysis, AnalysisParams};
use crate::attachment::Attachment;
use crate::dialog::Dialog;
use crate::error::{CoreError, Result, ValidationError};
use crate::party::Party;
use crate::types::{to_object, VCON_VERSION};

fn new_uuid() -> String {
    Uuid::new_v4().to_string()
}

/// A conversation record.
///
/// Parsing is permissive: any JSON object whose known keys have the right
/// shape is accepted, missing identity and timestamps are filled in, and
/// unknown top-level keys are carried through unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "VconRepr")]
pub struct Vcon {
    uuid: String,

    #[serde(rename = "vcon", skip_serializing_if = "Option::is_none")]
    version: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    subject: Option<String>,

    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,

    #[serde(skip_serializing_if = "Option::is_none")]
    redacted: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    appended: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    group: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    meta: Option<Map<String, Value>>,

    parties: Vec<Party>,
    dialog: Vec<Dialog>,
    attachments: Vec<Attachment>,
    analysis: Vec<Analysis>,
    tags: BTreeMap<String, String>,

    #[serde(flatten)]
    extra: Map<String, Value>,
}

/// Wire form of a record, before identity and timestamps are resolved.
#[derive(Deserialize)]
struct VconRepr {
    #[serde(default = "new_uuid")]
    uuid: String,
    #[serde(rename = "vcon", default)]
    version: Option<String>,
    #[serde(default)]
    subject: Option<String>,
    #[serde(default)]
    created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    redacted: Option<bool>,
    #[serde(default)]
    appended: Option<bool>,
    #[serde(default)]
    group: Option<String>,
    #[serde(default)]
    meta: Option<Map<String, Value>>,
    #[serde(default)]
    parties: Vec<Party>,
    #[serde(default)]
    dialog: Vec<Dialog>,
    #[serde(default)]
    attachments: Vec<Attachment>,
    #[serde(default)]
    analysis: Vec<Analysis>,
    #[serde(default)]
    tags: BTreeMap<String, String>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl From<VconRepr> for Vcon {
    /// A missing timestamp is filled so that `updated_at >= created_at`.
    fn from(repr: VconRepr) -> Self {
        let now = Utc::now();
        let (created_at, updated_at) = match (repr.created_at, repr.updated_at) {
            (Some(created), Some(updated)) => (created, updated),
            (Some(created), None) => (created, now.max(created)),
            (None, Some(updated)) => (now.min(updated), updated),
            (None, None) => (now, now),
        };

        Self {
            uuid: repr.uuid,
            version: repr.version,
            subject: repr.subject,
            created_at,
            updated_at,
            redacted: repr.redacted,
            appended: repr.appended,
            group: repr.group,
            meta: repr.meta,
            parties: repr.parties,
            dialog: repr.dialog,
            attachments: repr.attachments,
            analysis: repr.analysis,
            tags: repr.tags,
            extra: repr.extra,
        }
    }
}

impl Vcon {
    /// Create an empty record with a fresh identity.
    pub fn new() -> Self {
        Self::builder().version(VCON_VERSION).build()
    }

    /// Start building a record from a partial field set.
    pub fn builder() -> VconBuilder {
        VconBuilder::default()
    }

    /// Parse a record from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| CoreError::Parse(e.to_string()))
    }

    /// Serialize to compact JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| CoreError::Encoding(e.to_string()))
    }

    /// Serialize to indented JSON.
    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| CoreError::Encoding(e.to_string()))
    }

    /// Dictionary form of the whole record.
    pub fn to_dict(&self) -> Map<String, Value> {
        to_object(self)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutators
    // ─────────────────────────────────────────────────────────────────────────

    /// Append a party and return its index.
    pub fn add_party(&mut self, party: Party) -> usize {
        self.parties.push(party);
        self.touch();
        self.parties.len() - 1
    }

    /// Append a dialog and return its index.
    pub fn add_dialog(&mut self, dialog: Dialog) -> usize {
        self.dialog.push(dialog);
        self.touch();
        self.dialog.len() - 1
    }

    /// Construct and append an attachment.
    pub fn add_attachment(
        &mut self,
        kind: impl Into<String>,
        body: impl Into<Value>,
        encoding: &str,
    ) -> std::result::Result<&Attachment, ValidationError> {
        let attachment = Attachment::new(kind, body, encoding)?;
        let index = self.attachments.len();
        self.attachments.push(attachment);
        self.touch();
        Ok(&self.attachments[index])
    }

    /// Append an analysis, defaulting `encoding` and `extra`.
    pub fn add_analysis(&mut self, params: AnalysisParams) {
        self.analysis.push(params.build());
        self.touch();
    }

    /// Set a tag, replacing any previous value.
    pub fn add_tag(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.tags.insert(name.into(), value.into());
        self.touch();
    }

    /// Set the subject line.
    pub fn set_subject(&mut self, subject: impl Into<String>) {
        self.subject = Some(subject.into());
        self.touch();
    }

    /// Set the group identifier.
    pub fn set_group(&mut self, group: impl Into<String>) {
        self.group = Some(group.into());
        self.touch();
    }

    /// Replace the free-form metadata object.
    pub fn set_meta(&mut self, meta: Map<String, Value>) {
        self.meta = Some(meta);
        self.touch();
    }

    /// Mark the record as redacted or not.
    pub fn set_redacted(&mut self, redacted: bool) {
        self.redacted = Some(redacted);
        self.touch();
    }

    /// Mark the record as appended or not.
    pub fn set_appended(&mut self, appended: bool) {
        self.appended = Some(appended);
        self.touch();
    }

    /// Refresh `updated_at`, never moving it before `created_at`.
    fn touch(&mut self) {
        self.updated_at = Utc::now().max(self.created_at);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Lookups
    // ─────────────────────────────────────────────────────────────────────────

    /// Index of the first party whose string field `field` equals `value`.
    pub fn find_party_index(&self, field: &str, value: &str) -> Option<usize> {
        self.parties
            .iter()
            .position(|p| p.get_str(field) == Some(value))
    }

    /// First dialog whose field `field` equals `value`.
    pub fn find_dialog(&self, field: &str, value: impl Into<Value>) -> Option<&Dialog> {
        let value = value.into();
        self.dialog
            .iter()
            .find(|d| d.field(field).as_ref() == Some(&value))
    }

    /// First attachment with the given MIME type.
    pub fn find_attachment_by_type(&self, kind: &str) -> Option<&Attachment> {
        self.attachments.iter().find(|a| a.kind() == kind)
    }

    /// First analysis with the given type.
    pub fn find_analysis_by_type(&self, kind: &str) -> Option<&Analysis> {
        self.analysis.iter().find(|a| a.kind == kind)
    }

    /// Value of a tag, if set.
    pub fn get_tag(&self, name: &str) -> Option<&str> {
        self.tags.get(name).map(String::as_str)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    /// The record identifier.
    pub fn uuid(&self) -> &str {
        &self.uuid
    }

    /// The vCon format version, or `""` if unset.
    pub fn version(&self) -> &str {
        self.version.as_deref().unwrap_or("")
    }

    /// The subject line, if set.
    pub fn subject(&self) -> Option<&str> {
        self.subject.as_deref()
    }

    /// When the record was created.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// When the record was last modified.
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Whether the record is redacted; `false` when unset.
    pub fn redacted(&self) -> bool {
        self.redacted.unwrap_or(false)
    }

    /// Whether the record was appended to; `false` when unset.
    pub fn appended(&self) -> bool {
        self.appended.unwrap_or(false)
    }

    /// The group identifier, if set.
    pub fn group(&self) -> Option<&str> {
        self.group.as_deref()
    }

    /// Free-form metadata, if set.
    pub fn meta(&self) -> Option<&Map<String, Value>> {
        self.meta.as_ref()
    }

    /// Parties in insertion order; dialogs refer to them by index.
    pub fn parties(&self) -> &[Party] {
        &self.parties
    }

    /// Dialogs in insertion order.
    pub fn dialog(&self) -> &[Dialog] {
        &self.dialog
    }

    /// Attachments in insertion order.
    pub fn attachments(&self) -> &[Attachment] {
        &self.attachments
    }

    /// Analyses in insertion order.
    pub fn analysis(&self) -> &[Analysis] {
        &self.analysis
    }

    /// All tags, sorted by name.
    pub fn tags(&self) -> &BTreeMap<String, String> {
        &self.tags
    }

    /// Unknown top-level keys carried through from parsing.
    pub fn extra(&self) -> &Map<String, Value> {
        &self.extra
    }
}

impl Default for Vcon {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for records with a partial field set.
///
/// Anything left unset gets the same defaults as parsing: a fresh uuid, the
/// current time for both timestamps, and empty collections.
#[derive(Debug, Default)]
pub struct VconBuilder {
    uuid: Option<String>,
    version: Option<String>,
    subject: Option<String>,
    created_at: Option<DateTime<Utc>>,
    updated_at: Option<DateTime<Utc>>,
    redacted: Option<bool>,
    appended: Option<bool>,
    group: Option<String>,
    meta: Option<Map<String, Value>>,
    parties: Vec<Party>,
    dialog: Vec<Dialog>,
    attachments: Vec<Attachment>,
    analysis: Vec<Analysis>,
    tags: BTreeMap<String, String>,
}

impl VconBuilder {
    /// Set the identifier.
    pub fn uuid(mut self, uuid: impl Into<String>) -> Self {
        self.uuid = Some(uuid.into());
        self
    }

    /// Set the format version.
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Set the subject line.
    pub fn subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    /// Set the creation time.
    pub fn created_at(mut self, at: DateTime<Utc>) -> Self {
        self.created_at = Some(at);
        self
    }

    /// Set the last-modified time.
    pub fn updated_at(mut self, at: DateTime<Utc>) -> Self {
        self.updated_at = Some(at);
        self
    }

    /// Set the redacted flag.
    pub fn redacted(mut self, redacted: bool) -> Self {
        self.redacted = Some(redacted);
        self
    }

    /// Set the appended flag.
    pub fn appended(mut self, appended: bool) -> Self {
        self.appended = Some(appended);
        self
    }

    /// Set the group identifier.
    pub fn group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    /// Set the metadata object.
    pub fn meta(mut self, meta: Map<String, Value>) -> Self {
        self.meta = Some(meta);
        self
    }

    /// Add a party.
    pub fn party(mut self, party: Party) -> Self {
        self.parties.push(party);
        self
    }

    /// Add a dialog.
    pub fn dialog(mut self, dialog: Dialog) -> Self {
        self.dialog.push(dialog);
        self
    }

    /// Add an attachment.
    pub fn attachment(mut self, attachment: Attachment) -> Self {
        self.attachments.push(attachment);
        self
    }

    /// Add an analysis.
    pub fn analysis(mut self, analysis: Analysis) -> Self {
        self.analysis.push(analysis);
        self
    }

    /// Set a tag.
    pub fn tag(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.insert(name.into(), value.into());
        self
    }

    /// Build the record, filling identity and timestamps if absent.
    pub fn build(self) -> Vcon {
        let now = Utc::now();
        let created_at = self.created_at.unwrap_or(now);
        let updated_at = self.updated_at.unwrap_or_else(|| now.max(created_at));

        Vcon {
            uuid: self.uuid.unwrap_or_else(new_uuid),
            version: self.version,
            subject: self.subject,
            created_at,
            updated_at,
            redacted: self.redacted,
            appended: self.appended,
            group: self.group,
            meta: self.meta,
            parties: self.parties,
            dialog: self.dialog,
            attachments: self.attachments,
            analysis: self.analysis,
            tags: self.tags,
            extra: Map::new(),
        }
    }
}
