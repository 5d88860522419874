//! Custom-field codec
//!
//! Terraform carries custom fields as a set of `{name, type, value}` blocks with
//! every value written as a string. NetBox expects a JSON object keyed by field
//! name with properly typed values. This module translates in both directions.
//!
//! Two rules shape the outbound side:
//! - a field present in prior state but absent from the configuration is sent
//!   as `null`, which is how NetBox clears it;
//! - list-typed values are sorted so that configuration and API agree on order.
//!
//! [`config_to_api`] never fails: a value that cannot be decoded for its type
//! degrades (integers fall back to `0`, other types are left out) and the
//! degradation is logged at debug level. [`config_to_api_strict`] applies the
//! same rules but reports those cases as [`CustomFieldError`].

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;
use tracing::debug;

/// NetBox custom field types the codec distinguishes
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CustomFieldType {
    Text,
    Longtext,
    Integer,
    Boolean,
    Date,
    Url,
    Json,
    Select,
    Multiselect,
    Object,
    Multiobject,
    /// Legacy comma separated list
    Multiple,
    /// Legacy single choice
    Selection,
    /// Anything else; encoded like text
    Other(String),
}

impl CustomFieldType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Text => "text",
            Self::Longtext => "longtext",
            Self::Integer => "integer",
            Self::Boolean => "boolean",
            Self::Date => "date",
            Self::Url => "url",
            Self::Json => "json",
            Self::Select => "select",
            Self::Multiselect => "multiselect",
            Self::Object => "object",
            Self::Multiobject => "multiobject",
            Self::Multiple => "multiple",
            Self::Selection => "selection",
            Self::Other(other) => other,
        }
    }
}

impl From<&str> for CustomFieldType {
    fn from(value: &str) -> Self {
        match value {
            "text" => Self::Text,
            "longtext" => Self::Longtext,
            "integer" => Self::Integer,
            "boolean" => Self::Boolean,
            "date" => Self::Date,
            "url" => Self::Url,
            "json" => Self::Json,
            "select" => Self::Select,
            "multiselect" => Self::Multiselect,
            "object" => Self::Object,
            "multiobject" => Self::Multiobject,
            "multiple" => Self::Multiple,
            "selection" => Self::Selection,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for CustomFieldType {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl From<CustomFieldType> for String {
    fn from(value: CustomFieldType) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for CustomFieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for CustomFieldType {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for CustomFieldType {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Self::from)
    }
}

/// One `custom_field` block as it appears in configuration and state
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CustomFieldEntry {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: CustomFieldType,
    #[serde(default)]
    pub value: String,
}

impl CustomFieldEntry {
    pub fn new(name: impl Into<String>, field_type: impl Into<CustomFieldType>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            field_type: field_type.into(),
            value: value.into(),
        }
    }
}

/// A custom field value in API form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CustomFieldValue {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
    List(Vec<CustomFieldValue>),
    Object(Map<String, Value>),
}

impl From<CustomFieldValue> for Value {
    fn from(value: CustomFieldValue) -> Self {
        match value {
            CustomFieldValue::Null => Value::Null,
            CustomFieldValue::Bool(b) => Value::Bool(b),
            CustomFieldValue::Integer(i) => Value::from(i),
            CustomFieldValue::Float(f) => Number::from_f64(f).map(Value::Number).unwrap_or(Value::Null),
            CustomFieldValue::Text(s) => Value::String(s),
            CustomFieldValue::List(items) => Value::Array(items.into_iter().map(Value::from).collect()),
            CustomFieldValue::Object(map) => Value::Object(map),
        }
    }
}

/// Custom fields keyed by name, ready to be sent as `custom_fields`
pub type ApiCustomFields = BTreeMap<String, CustomFieldValue>;

/// Convert the codec output into the JSON object NetBox expects
pub fn to_json_map(fields: ApiCustomFields) -> Map<String, Value> {
    fields.into_iter().map(|(name, value)| (name, Value::from(value))).collect()
}

/// A configured value that does not decode for its declared type
#[derive(Debug, Error)]
pub enum CustomFieldError {
    #[error("custom field {name}: {value:?} is not an integer")]
    InvalidInteger { name: String, value: String },

    #[error("custom field {name}: {value:?} is not a boolean, expected \"true\" or \"false\"")]
    InvalidBoolean { name: String, value: String },

    #[error("custom field {name}: invalid JSON for type {field_type}: {source}")]
    InvalidJson {
        name: String,
        field_type: CustomFieldType,
        #[source]
        source: serde_json::Error,
    },
}

impl CustomFieldError {
    /// What the lenient codec does with the offending value
    pub fn lenient_outcome(&self) -> &'static str {
        match self {
            Self::InvalidInteger { .. } => "sending 0",
            _ => "leaving it out",
        }
    }
}

/// Build the `custom_fields` payload from configuration.
///
/// `prior` is the set recorded in state before this change, `None` on create.
pub fn config_to_api(prior: Option<&[CustomFieldEntry]>, current: &[CustomFieldEntry]) -> ApiCustomFields {
    let mut fields = seed(prior);
    for entry in current {
        match decode(entry) {
            Ok(value) => {
                fields.insert(entry.name.clone(), value);
            }
            Err(err @ CustomFieldError::InvalidInteger { .. }) => {
                debug!("{}, {}", err, err.lenient_outcome());
                fields.insert(entry.name.clone(), CustomFieldValue::Integer(0));
            }
            Err(err) => debug!("{}, {}", err, err.lenient_outcome()),
        }
    }
    fields
}

/// Like [`config_to_api`], but undecodable values are errors.
pub fn config_to_api_strict(
    prior: Option<&[CustomFieldEntry]>,
    current: &[CustomFieldEntry],
) -> Result<ApiCustomFields, CustomFieldError> {
    let mut fields = seed(prior);
    for entry in current {
        fields.insert(entry.name.clone(), decode(entry)?);
    }
    Ok(fields)
}

/// Every entry of `current` the lenient codec would not send as written
pub fn invalid_entries(current: &[CustomFieldEntry]) -> Vec<CustomFieldError> {
    current.iter().filter_map(|entry| decode(entry).err()).collect()
}

/// How undecodable custom field values are handled
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CustomFieldMode {
    /// Degrade bad values, see [`config_to_api`]
    #[default]
    Lenient,
    /// Fail the operation, see [`config_to_api_strict`]
    Strict,
}

impl CustomFieldMode {
    pub fn from_strict(strict: bool) -> Self {
        if strict { Self::Strict } else { Self::Lenient }
    }

    /// Build the `custom_fields` payload in this mode
    pub fn encode(
        self,
        prior: Option<&[CustomFieldEntry]>,
        current: &[CustomFieldEntry],
    ) -> Result<ApiCustomFields, CustomFieldError> {
        match self {
            Self::Lenient => Ok(config_to_api(prior, current)),
            Self::Strict => config_to_api_strict(prior, current),
        }
    }
}

fn seed(prior: Option<&[CustomFieldEntry]>) -> ApiCustomFields {
    prior
        .unwrap_or_default()
        .iter()
        .map(|entry| (entry.name.clone(), CustomFieldValue::Null))
        .collect()
}

fn decode(entry: &CustomFieldEntry) -> Result<CustomFieldValue, CustomFieldError> {
    let raw = entry.value.as_str();
    if raw.is_empty() {
        return Ok(CustomFieldValue::Null);
    }
    match entry.field_type {
        CustomFieldType::Integer | CustomFieldType::Object => raw
            .parse::<i64>()
            .map(CustomFieldValue::Integer)
            .map_err(|_| CustomFieldError::InvalidInteger {
                name: entry.name.clone(),
                value: raw.to_string(),
            }),
        CustomFieldType::Boolean => match raw {
            "true" => Ok(CustomFieldValue::Bool(true)),
            "false" => Ok(CustomFieldValue::Bool(false)),
            _ => Err(CustomFieldError::InvalidBoolean {
                name: entry.name.clone(),
                value: raw.to_string(),
            }),
        },
        CustomFieldType::Multiselect | CustomFieldType::Multiobject => {
            let items: Vec<Value> = serde_json::from_str(raw).map_err(|source| invalid_json(entry, source))?;
            let mut items = items
                .iter()
                .map(list_element)
                .collect::<Option<Vec<String>>>()
                .ok_or_else(|| {
                    invalid_json(entry, <serde_json::Error as serde::de::Error>::custom("expected a list of strings"))
                })?;
            items.sort();
            Ok(CustomFieldValue::List(items.into_iter().map(CustomFieldValue::Text).collect()))
        }
        CustomFieldType::Multiple => {
            let mut items: Vec<String> = raw.split(',').map(str::to_string).collect();
            items.sort();
            Ok(CustomFieldValue::List(items.into_iter().map(CustomFieldValue::Text).collect()))
        }
        CustomFieldType::Json => serde_json::from_str::<Map<String, Value>>(raw)
            .map(CustomFieldValue::Object)
            .map_err(|source| invalid_json(entry, source)),
        _ => Ok(CustomFieldValue::Text(raw.to_string())),
    }
}

fn invalid_json(entry: &CustomFieldEntry, source: serde_json::Error) -> CustomFieldError {
    CustomFieldError::InvalidJson {
        name: entry.name.clone(),
        field_type: entry.field_type.clone(),
        source,
    }
}

// Numbers are accepted so `jsonencode([3, 1])` works for multiobject
fn list_element(item: &Value) -> Option<String> {
    match item {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Rebuild the `custom_field` set from what NetBox returned.
///
/// Only fields named in `prior` are reported, in the same order and with the
/// same types, so fields managed outside Terraform never show up as drift.
pub fn api_to_config(prior: &[CustomFieldEntry], api: &Map<String, Value>) -> Vec<CustomFieldEntry> {
    prior
        .iter()
        .map(|entry| CustomFieldEntry {
            name: entry.name.clone(),
            field_type: entry.field_type.clone(),
            value: match api.get(&entry.name) {
                None | Some(Value::Null) => String::new(),
                Some(value) => encode(&entry.field_type, value),
            },
        })
        .collect()
}

fn encode(field_type: &CustomFieldType, value: &Value) -> String {
    if *field_type == CustomFieldType::Json {
        return serde_json::to_string(value).unwrap_or_default();
    }
    match value {
        Value::Array(items) if *field_type == CustomFieldType::Object => {
            items.first().map(element_string).unwrap_or_default()
        }
        Value::Array(items) => {
            let mut items: Vec<String> = items.iter().map(element_string).collect();
            items.sort();
            if *field_type == CustomFieldType::Multiple {
                items.join(",")
            } else {
                serde_json::to_string(&items).unwrap_or_default()
            }
        }
        other => element_string(other),
    }
}

fn element_string(value: &Value) -> String {
    match value {
        Value::Object(map) => map.get("id").map(scalar_string).unwrap_or_default(),
        other => scalar_string(other),
    }
}

fn scalar_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}
