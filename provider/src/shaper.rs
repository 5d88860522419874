//! Request body shaping
//!
//! The writable models serialize every placeholder timestamp and leave out
//! every empty string, `false` and unset relation. That is fine for a create,
//! but on a partial update it means NetBox either receives invalid timestamps
//! or never hears that an attribute was cleared. The writers in this module run
//! on the serialized body right before it is sent and repair it.
//!
//! - [`PartialUpdateWriter`] removes placeholder-valued required fields and
//!   re-asserts each attribute the user changed, turning a numeric zero into
//!   `null`.
//! - [`DropOverwriteWriter`] removes a fixed set of keys and sets literal values
//!   for others. Resources use it on create.

use netbox_client::{NetBoxError, RequestWriter, ZERO_TIMESTAMP};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use tracing::debug;

/// Attributes changed by the current update with the value they should end up with
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModifiedFields(BTreeMap<String, Value>);

impl ModifiedFields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the intended value of an API attribute
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }
}

/// Writer for PATCH requests
#[derive(Debug, Clone)]
pub struct PartialUpdateWriter {
    required_fields: &'static [&'static str],
    modified_fields: ModifiedFields,
}

impl PartialUpdateWriter {
    pub fn new(required_fields: &'static [&'static str], modified_fields: ModifiedFields) -> Self {
        Self {
            required_fields,
            modified_fields,
        }
    }

    /// Apply the shaping rules to a decoded body
    pub fn shape(&self, body: &mut Map<String, Value>) -> Result<(), NetBoxError> {
        for field in self.required_fields {
            let placeholder = match body.get(*field) {
                Some(Value::Null) => true,
                Some(Value::String(s)) => s == ZERO_TIMESTAMP,
                _ => false,
            };
            if placeholder {
                body.remove(*field);
            }
        }

        for (name, value) in self.modified_fields.iter() {
            let shaped = match value {
                Value::Number(n) if is_zero(n) => Value::Null,
                Value::Number(_) | Value::Bool(_) | Value::String(_) | Value::Null => value.clone(),
                Value::Array(_) | Value::Object(_) => {
                    return Err(NetBoxError::RequestWriter(format!(
                        "unsupported type for modified field {}: {}",
                        name,
                        json_type(value)
                    )));
                }
            };
            body.insert(name.clone(), shaped);
        }
        Ok(())
    }
}

impl RequestWriter for PartialUpdateWriter {
    fn write(&self, body: Vec<u8>) -> Result<Vec<u8>, NetBoxError> {
        let mut fields = decode_object(&body)?;
        self.shape(&mut fields)?;
        let shaped = serde_json::to_vec(&fields)?;
        debug!("Partial update body: {}", String::from_utf8_lossy(&shaped));
        Ok(shaped)
    }
}

/// Writer that drops a fixed set of keys and overwrites others with literals
#[derive(Debug, Clone, Default)]
pub struct DropOverwriteWriter {
    drop_fields: Vec<String>,
    overwrite_fields: Map<String, Value>,
}

impl DropOverwriteWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove `name` from the body if present
    pub fn drop_field(mut self, name: impl Into<String>) -> Self {
        self.drop_fields.push(name.into());
        self
    }

    /// Set `name` to `value`, whatever the body held
    pub fn overwrite(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.overwrite_fields.insert(name.into(), value.into());
        self
    }

    pub fn shape(&self, body: &mut Map<String, Value>) {
        for name in &self.drop_fields {
            body.remove(name);
        }
        for (name, value) in &self.overwrite_fields {
            body.insert(name.clone(), value.clone());
        }
    }
}

impl RequestWriter for DropOverwriteWriter {
    fn write(&self, body: Vec<u8>) -> Result<Vec<u8>, NetBoxError> {
        let mut fields = decode_object(&body)?;
        self.shape(&mut fields);
        let shaped = serde_json::to_vec(&fields)?;
        debug!("Request body: {}", String::from_utf8_lossy(&shaped));
        Ok(shaped)
    }
}

fn decode_object(body: &[u8]) -> Result<Map<String, Value>, NetBoxError> {
    match serde_json::from_slice::<Value>(body)? {
        Value::Object(fields) => Ok(fields),
        other => Err(NetBoxError::RequestWriter(format!(
            "request body must be a JSON object, got {}",
            json_type(&other)
        ))),
    }
}

fn is_zero(n: &serde_json::Number) -> bool {
    n.as_f64() == Some(0.0)
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use netbox_client::{Timestamp, WritableTenant, WritableVirtualMachine};
    use serde_json::json;

    const REQUIRED: &[&str] = &["created", "last_updated"];

    fn write(writer: &dyn RequestWriter, body: Value) -> Value {
        let out = writer.write(serde_json::to_vec(&body).unwrap()).unwrap();
        serde_json::from_slice(&out).unwrap()
    }

    #[test]
    fn placeholder_timestamps_are_removed() {
        let writer = PartialUpdateWriter::new(REQUIRED, ModifiedFields::new());
        let out = write(
            &writer,
            json!({"name": "vm1", "created": ZERO_TIMESTAMP, "last_updated": null}),
        );
        assert_eq!(out, json!({"name": "vm1"}));
    }

    #[test]
    fn real_timestamps_are_kept() {
        let writer = PartialUpdateWriter::new(REQUIRED, ModifiedFields::new());
        let out = write(&writer, json!({"created": "2024-01-01T00:00:00.000Z"}));
        assert_eq!(out, json!({"created": "2024-01-01T00:00:00.000Z"}));
    }

    #[test]
    fn zero_relation_becomes_null() {
        let mut modified = ModifiedFields::new();
        modified.insert("tenant", 0u64);
        let writer = PartialUpdateWriter::new(REQUIRED, modified);

        let body = WritableVirtualMachine {
            name: "vm1".into(),
            ..Default::default()
        };
        let out = writer.write(serde_json::to_vec(&body).unwrap()).unwrap();
        let out: Value = serde_json::from_slice(&out).unwrap();

        assert_eq!(out["tenant"], Value::Null);
        assert!(out.get("created").is_none());
        assert!(out.get("last_updated").is_none());
    }

    #[test]
    fn zero_float_becomes_null() {
        let mut modified = ModifiedFields::new();
        modified.insert("vcpus", 0.0);
        let writer = PartialUpdateWriter::new(REQUIRED, modified);
        assert_eq!(write(&writer, json!({})), json!({"vcpus": null}));
    }

    #[test]
    fn cleared_string_and_false_bool_are_reasserted() {
        let mut modified = ModifiedFields::new();
        modified.insert("description", "");
        modified.insert("enabled", false);
        let writer = PartialUpdateWriter::new(REQUIRED, modified);

        let body = WritableTenant {
            name: "Acme".into(),
            slug: "acme".into(),
            ..Default::default()
        };
        let out = writer.write(serde_json::to_vec(&body).unwrap()).unwrap();
        let out: Value = serde_json::from_slice(&out).unwrap();

        assert_eq!(out["description"], json!(""));
        assert_eq!(out["enabled"], json!(false));
        assert_eq!(out["name"], json!("Acme"));
    }

    #[test]
    fn nonzero_numbers_and_null_pass_through() {
        let mut modified = ModifiedFields::new();
        modified.insert("site", 4u64);
        modified.insert("mtu", Value::Null);
        let writer = PartialUpdateWriter::new(REQUIRED, modified);
        assert_eq!(
            write(&writer, json!({"site": 4, "mtu": 1500})),
            json!({"site": 4, "mtu": null})
        );
    }

    #[test]
    fn structured_modified_values_are_refused() {
        let mut modified = ModifiedFields::new();
        modified.insert("tags", json!([{"name": "a", "slug": "a"}]));
        let writer = PartialUpdateWriter::new(REQUIRED, modified);

        let err = writer.write(b"{}".to_vec()).unwrap_err();
        match err {
            NetBoxError::RequestWriter(message) => assert!(message.contains("unsupported type")),
            other => panic!("expected a request writer error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn refused_update_is_never_sent() {
        let mock = netbox_client::MockNetBoxClient::new("http://netbox/api");
        let mut modified = ModifiedFields::new();
        modified.insert("custom_fields", json!({"owner": "ops"}));
        let writer = PartialUpdateWriter::new(REQUIRED, modified);

        let result = netbox_client::TENANTS
            .partial_update(&mock, 1, &WritableTenant::default(), &writer)
            .await;

        assert!(matches!(result, Err(NetBoxError::RequestWriter(_))));
        assert!(mock.requests().is_empty());
    }

    #[test]
    fn non_object_body_is_an_error() {
        let writer = PartialUpdateWriter::new(REQUIRED, ModifiedFields::new());
        assert!(writer.write(b"[1]".to_vec()).is_err());
        assert!(writer.write(b"not json".to_vec()).is_err());
    }

    #[test]
    fn unset_timestamp_serializes_to_placeholder() {
        let body = serde_json::to_value(WritableTenant::default()).unwrap();
        assert_eq!(body["created"], json!(ZERO_TIMESTAMP));
        assert_eq!(Timestamp::default().to_string(), ZERO_TIMESTAMP);
    }

    #[test]
    fn drop_overwrite_applies_literals() {
        let writer = DropOverwriteWriter::new()
            .drop_field("created")
            .drop_field("last_updated")
            .overwrite("custom_fields", json!({"owner": null}));

        let out = write(
            &writer,
            json!({"name": "x", "created": ZERO_TIMESTAMP, "last_updated": ZERO_TIMESTAMP}),
        );

        assert_eq!(out, json!({"name": "x", "custom_fields": {"owner": null}}));
    }

    #[test]
    fn drop_overwrite_is_idempotent() {
        let writer = DropOverwriteWriter::new()
            .drop_field("created")
            .overwrite("status", "active");
        let once = writer
            .write(serde_json::to_vec(&json!({"created": ZERO_TIMESTAMP, "status": "planned"})).unwrap())
            .unwrap();
        let twice = writer.write(once.clone()).unwrap();
        assert_eq!(once, twice);
    }
}
