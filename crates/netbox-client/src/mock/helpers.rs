//! Helper functions for shaping stored objects the way NetBox returns them

use crate::models::ZERO_TIMESTAMP;
use serde_json::{json, Map, Value};

/// Attributes NetBox returns as nested objects, with the endpoint they point at
const RELATIONS: &[(&str, &str)] = &[
    ("site", "dcim/sites"),
    ("region", "dcim/regions"),
    ("location", "dcim/locations"),
    ("manufacturer", "dcim/manufacturers"),
    ("tenant", "tenancy/tenants"),
    ("cluster", "virtualization/clusters"),
    ("platform", "dcim/platforms"),
    ("virtual_machine", "virtualization/virtual-machines"),
];

/// Attributes NetBox returns as `{"value", "label"}` choices
const CHOICES: &[&str] = &["status", "mode"];

/// Fixed timestamp stamped on every stored object
pub const MOCK_TIMESTAMP: &str = "2024-01-01T00:00:00.000000Z";

/// Helper functions for building stored objects in mock implementations
#[derive(Debug, Clone)]
pub struct Helpers {
    base_url: String,
}

impl Helpers {
    pub fn new(base_url: String) -> Self {
        Self { base_url }
    }

    /// Object URL as NetBox would report it
    pub fn object_url(&self, collection: &str, id: u64) -> String {
        format!("{}/{}/{}/", self.base_url.trim_end_matches('/'), collection.trim_matches('/'), id)
    }

    /// Reject what a real NetBox would reject in a write body
    pub fn validate_body(&self, body: &Map<String, Value>) -> Result<(), String> {
        for (key, value) in body {
            if value.as_str() == Some(ZERO_TIMESTAMP) {
                return Err(format!("{}: placeholder timestamp is not a valid value", key));
            }
            if self.is_relation(key) && value.as_u64() == Some(0) {
                return Err(format!("{}: Related object not found using the provided numeric ID: 0", key));
            }
        }
        Ok(())
    }

    /// Merge a write body into a stored object, expanding ids and choices.
    ///
    /// `custom_fields` is merged key by key, as NetBox does.
    pub fn merge(&self, stored: &mut Map<String, Value>, body: Map<String, Value>) {
        for (key, value) in body {
            if key == "created" || key == "last_updated" {
                continue;
            }
            let value = match (key.as_str(), stored.get_mut(&key), value) {
                ("custom_fields", Some(Value::Object(existing)), Value::Object(incoming)) => {
                    existing.extend(incoming);
                    continue;
                }
                (_, _, value) => value,
            };
            let expanded = self.expand(&key, value);
            stored.insert(key, expanded);
        }
        stored.insert("last_updated".to_string(), json!(MOCK_TIMESTAMP));
    }

    fn expand(&self, key: &str, value: Value) -> Value {
        if let Some(id) = value.as_u64() {
            if let Some((_, collection)) = RELATIONS.iter().find(|(name, _)| *name == key) {
                return self.create_nested(collection, id);
            }
            // cluster `type`, vm `role`, tenant `group` and friends
            if matches!(key, "type" | "role" | "group") {
                return json!({ "id": id, "display": format!("{} {}", key, id) });
            }
        }
        if CHOICES.contains(&key) {
            return match value.as_str() {
                Some("") | None => Value::Null,
                Some(choice) => json!({ "value": choice, "label": choice }),
            };
        }
        if key == "tags" {
            return self.convert_tags(value);
        }
        value
    }

    fn is_relation(&self, key: &str) -> bool {
        RELATIONS.iter().any(|(name, _)| *name == key) || matches!(key, "type" | "role" | "group")
    }

    /// Helper to create a nested reference
    pub fn create_nested(&self, collection: &str, id: u64) -> Value {
        json!({
            "id": id,
            "url": self.object_url(collection, id),
            "display": format!("{} {}", collection.rsplit('/').next().unwrap_or(collection), id),
        })
    }

    /// Helper to give written tags the ids NetBox would report
    pub fn convert_tags(&self, tags: Value) -> Value {
        let Value::Array(tags) = tags else {
            return tags;
        };
        Value::Array(
            tags.into_iter()
                .enumerate()
                .map(|(index, mut tag)| {
                    if let Value::Object(fields) = &mut tag {
                        fields.entry("id").or_insert(json!(index as u64 + 1));
                    }
                    tag
                })
                .collect(),
        )
    }
}
