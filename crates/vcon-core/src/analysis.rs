//! Analysis: vendor-produced annotations over one or more dialogs.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::types::{to_object, Encoding};

/// Which dialog(s) an analysis refers to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DialogRef {
    Single(usize),
    Many(Vec<usize>),
}

impl DialogRef {
    /// All referenced dialog indices.
    pub fn indices(&self) -> Vec<usize> {
        match self {
            Self::Single(i) => vec![*i],
            Self::Many(v) => v.clone(),
        }
    }
}

impl Default for DialogRef {
    fn default() -> Self {
        Self::Many(Vec::new())
    }
}

impl From<usize> for DialogRef {
    fn from(index: usize) -> Self {
        Self::Single(index)
    }
}

impl From<Vec<usize>> for DialogRef {
    fn from(indices: Vec<usize>) -> Self {
        Self::Many(indices)
    }
}

/// A stored analysis entry.
///
/// Fields missing on parse take empty defaults: no dialogs, an empty vendor,
/// and a `null` body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub dialog: DialogRef,
    #[serde(default)]
    pub vendor: String,
    #[serde(default)]
    pub body: Value,
    #[serde(default)]
    pub encoding: Encoding,
    #[serde(default)]
    pub extra: Map<String, Value>,
}

impl Analysis {
    /// Dictionary form: `type`, `dialog`, `vendor`, `body`, `encoding`, `extra`.
    pub fn to_dict(&self) -> Map<String, Value> {
        to_object(self)
    }
}

/// Parameters for [`crate::Vcon::add_analysis`].
///
/// `encoding` defaults to [`Encoding::None`] and `extra` to an empty map.
#[derive(Debug, Clone)]
pub struct AnalysisParams {
    pub kind: String,
    pub dialog: DialogRef,
    pub vendor: String,
    pub body: Value,
    pub encoding: Option<Encoding>,
    pub extra: Option<Map<String, Value>>,
}

impl AnalysisParams {
    /// Parameters with the required fields; optional ones resolve to defaults.
    pub fn new(
        kind: impl Into<String>,
        dialog: impl Into<DialogRef>,
        vendor: impl Into<String>,
        body: impl Into<Value>,
    ) -> Self {
        Self {
            kind: kind.into(),
            dialog: dialog.into(),
            vendor: vendor.into(),
            body: body.into(),
            encoding: None,
            extra: None,
        }
    }

    /// Set the encoding.
    pub fn encoding(mut self, encoding: Encoding) -> Self {
        self.encoding = Some(encoding);
        self
    }

    /// Set the extra map.
    pub fn extra(mut self, extra: Map<String, Value>) -> Self {
        self.extra = Some(extra);
        self
    }

    /// Resolve defaults into a stored entry.
    pub fn build(self) -> Analysis {
        Analysis {
            kind: self.kind,
            dialog: self.dialog,
            vendor: self.vendor,
            body: self.body,
            encoding: self.encoding.unwrap_or_default(),
            extra: self.extra.unwrap_or_default(),
        }
    }
}
