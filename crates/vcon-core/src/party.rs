//! Parties: the participants of a conversation, and their join/leave history.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ValidationError;
use crate::types::to_object;

/// Keys with a dedicated field on [`Party`].
const PARTY_FIELDS: [&str; 11] = [
    "tel",
    "stir",
    "mailto",
    "name",
    "validation",
    "gmlpos",
    "civicaddress",
    "uuid",
    "role",
    "contact_list",
    "meta",
];

/// A postal address. All parts are required together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CivicAddress {
    pub country: String,
    pub locality: String,
    pub region: String,
    pub postcode: String,
    pub street: String,
}

/// A conversation participant.
///
/// Every field is optional; by convention at least one identifying field
/// (`tel`, `mailto`, `name`, ...) is set. Unset fields are omitted when
/// serialized. Unknown keys are kept in an extension map and merged back into
/// the object on output.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Party {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tel: Option<String>,

    /// STIR PASSporT identity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stir: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mailto: Option<String>,

    /// Display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// How the party's identity was validated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation: Option<String>,

    /// Geolocation as a GML `pos` string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gmlpos: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub civicaddress: Option<CivicAddress>,

    /// External identifier for the participant (not the record's uuid).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_list: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Map<String, Value>>,

    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl Party {
    /// Create an empty party.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a party identified by telephone number.
    pub fn with_tel(tel: impl Into<String>) -> Self {
        Self {
            tel: Some(tel.into()),
            ..Self::default()
        }
    }

    /// Create a party identified by mail address.
    pub fn with_mailto(mailto: impl Into<String>) -> Self {
        Self {
            mailto: Some(mailto.into()),
            ..Self::default()
        }
    }

    /// Set an extension field. Keys with a dedicated field are rejected.
    pub fn set_extra(
        &mut self,
        key: impl Into<String>,
        value: impl Into<Value>,
    ) -> Result<(), ValidationError> {
        let key = key.into();
        if PARTY_FIELDS.contains(&key.as_str()) {
            return Err(ValidationError::ReservedField(key));
        }
        self.extra.insert(key, value.into());
        Ok(())
    }

    /// Extension fields that have no dedicated field.
    pub fn extra(&self) -> &Map<String, Value> {
        &self.extra
    }

    /// Look up a string-valued field by its wire name, including extensions.
    pub fn get_str(&self, field: &str) -> Option<&str> {
        let known = match field {
            "tel" => &self.tel,
            "stir" => &self.stir,
            "mailto" => &self.mailto,
            "name" => &self.name,
            "validation" => &self.validation,
            "gmlpos" => &self.gmlpos,
            "uuid" => &self.uuid,
            "role" => &self.role,
            "contact_list" => &self.contact_list,
            other => return self.extra.get(other).and_then(Value::as_str),
        };
        known.as_deref()
    }

    /// Dictionary form with unset fields omitted.
    pub fn to_dict(&self) -> Map<String, Value> {
        to_object(self)
    }
}

/// A party joining, leaving, or otherwise changing state within a dialog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartyHistory {
    party: usize,
    event: String,
    time: DateTime<Utc>,
}

impl PartyHistory {
    /// Record `event` for a party at `time`.
    pub fn new(party: usize, event: impl Into<String>, time: DateTime<Utc>) -> Self {
        Self {
            party,
            event: event.into(),
            time,
        }
    }

    /// Index into the record's party list.
    pub fn party(&self) -> usize {
        self.party
    }

    /// What happened, e.g. `join` or `drop`.
    pub fn event(&self) -> &str {
        &self.event
    }

    /// When it happened.
    pub fn time(&self) -> DateTime<Utc> {
        self.time
    }

    /// Dictionary form; `time` is an ISO-8601 string.
    pub fn to_dict(&self) -> Map<String, Value> {
        to_object(self)
    }
}
