//! Attachments: opaque artifacts carried alongside the conversation.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ValidationError;
use crate::types::{to_object, Encoding};

/// An opaque artifact attached to a record, with a declared encoding.
///
/// Attachments are immutable once constructed. The encoding is always one of
/// [`Encoding::ATTACHMENT`] when built through [`Attachment::new`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attachment {
    #[serde(rename = "type", default)]
    kind: String,
    #[serde(default)]
    body: Value,
    #[serde(default)]
    encoding: Encoding,
}

impl Attachment {
    /// Create an attachment, validating the encoding name.
    pub fn new(
        kind: impl Into<String>,
        body: impl Into<Value>,
        encoding: &str,
    ) -> Result<Self, ValidationError> {
        let parsed: Encoding = encoding.parse()?;
        Self::with_encoding(kind, body, parsed)
    }

    /// Create an attachment from an already-parsed encoding.
    pub fn with_encoding(
        kind: impl Into<String>,
        body: impl Into<Value>,
        encoding: Encoding,
    ) -> Result<Self, ValidationError> {
        if !encoding.is_attachment_encoding() {
            return Err(ValidationError::InvalidEncoding(encoding.to_string()));
        }
        Ok(Self {
            kind: kind.into(),
            body: body.into(),
            encoding,
        })
    }

    /// The MIME type of the attachment.
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// The attachment content, as given.
    pub fn body(&self) -> &Value {
        &self.body
    }

    /// How `body` is encoded.
    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    /// Dictionary form: always exactly `type`, `body`, `encoding`.
    pub fn to_dict(&self) -> Map<String, Value> {
        to_object(self)
    }
}
