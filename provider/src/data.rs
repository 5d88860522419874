//! Resource data
//!
//! [`ResourceData`] is the attribute map a resource operation reads from and
//! writes to. It holds the id, the state recorded by the previous apply and the
//! planned values for this one. Reads look at the planned values; changes are
//! detected by comparing the two.

use crate::custom_fields::CustomFieldEntry;
use crate::error::ProviderError;
use netbox_client::NestedTag;
use serde_json::{Map, Value};

/// Attribute holding the custom field set
pub const CUSTOM_FIELD_ATTR: &str = "custom_field";
/// Attribute holding the tag set
pub const TAG_ATTR: &str = "tag";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResourceData {
    id: String,
    state: Map<String, Value>,
    config: Map<String, Value>,
}

impl ResourceData {
    /// Data for a resource about to be created
    pub fn new(config: Map<String, Value>) -> Self {
        Self {
            id: String::new(),
            state: Map::new(),
            config,
        }
    }

    /// Data for an existing resource without pending changes
    pub fn from_state(id: impl Into<String>, state: Map<String, Value>) -> Self {
        Self {
            id: id.into(),
            config: state.clone(),
            state,
        }
    }

    /// Data for an existing resource moving from `state` to `config`
    pub fn planned(id: impl Into<String>, state: Map<String, Value>, config: Map<String, Value>) -> Self {
        Self {
            id: id.into(),
            state,
            config,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn set_id(&mut self, id: impl ToString) {
        self.id = id.to_string();
    }

    /// Mark the resource as gone
    pub fn clear_id(&mut self) {
        self.id.clear();
    }

    /// NetBox object id
    pub fn object_id(&self) -> Result<u64, ProviderError> {
        crate::convert::parse_id(&self.id)
    }

    /// Current attribute values
    pub fn attributes(&self) -> &Map<String, Value> {
        &self.config
    }

    /// Planned value of `key`; `None` when unset or null
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.config.get(key).filter(|value| !value.is_null())
    }

    pub fn get_str(&self, key: &str) -> &str {
        self.get(key).and_then(Value::as_str).unwrap_or_default()
    }

    /// Integer attribute, `0` when unset
    pub fn get_u64(&self, key: &str) -> u64 {
        self.get(key).and_then(Value::as_u64).unwrap_or_default()
    }

    pub fn get_f64(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(Value::as_f64)
    }

    pub fn get_bool(&self, key: &str) -> bool {
        self.get(key).and_then(Value::as_bool).unwrap_or_default()
    }

    /// Required string attribute
    pub fn require_str(&self, key: &str) -> Result<String, ProviderError> {
        match self.get_str(key) {
            "" => Err(ProviderError::MissingAttribute(key.to_string())),
            value => Ok(value.to_string()),
        }
    }

    /// Required relation id
    pub fn require_u64(&self, key: &str) -> Result<u64, ProviderError> {
        match self.get_u64(key) {
            0 => Err(ProviderError::MissingAttribute(key.to_string())),
            value => Ok(value),
        }
    }

    /// Whether `key` differs between state and plan.
    ///
    /// Lists are compared as sets, the way Terraform treats `tag` and
    /// `custom_field`.
    pub fn has_change(&self, key: &str) -> bool {
        let (old, new) = self.get_change(key);
        match (old, new) {
            (Some(Value::Array(old)), Some(Value::Array(new))) => !same_elements(old, new),
            (old, new) => old != new,
        }
    }

    /// Values of `key` in state and plan, nulls reported as `None`
    pub fn get_change(&self, key: &str) -> (Option<&Value>, Option<&Value>) {
        let old = self.state.get(key).filter(|value| !value.is_null());
        (old, self.get(key))
    }

    pub fn set(&mut self, key: &str, value: impl Into<Value>) {
        self.config.insert(key.to_string(), value.into());
    }

    /// Planned custom field set
    pub fn custom_fields(&self) -> Result<Vec<CustomFieldEntry>, ProviderError> {
        entries(self.get(CUSTOM_FIELD_ATTR))
    }

    /// Custom field set recorded in state
    pub fn prior_custom_fields(&self) -> Result<Vec<CustomFieldEntry>, ProviderError> {
        entries(self.state.get(CUSTOM_FIELD_ATTR).filter(|value| !value.is_null()))
    }

    pub fn set_custom_fields(&mut self, entries: &[CustomFieldEntry]) -> Result<(), ProviderError> {
        let value = serde_json::to_value(entries)
            .map_err(|err| ProviderError::invalid_attribute(CUSTOM_FIELD_ATTR, err.to_string()))?;
        self.set(CUSTOM_FIELD_ATTR, value);
        Ok(())
    }

    /// Planned tag set
    pub fn tags(&self) -> Result<Vec<NestedTag>, ProviderError> {
        crate::convert::tags_from_attribute(self.get(TAG_ATTR))
    }
}

fn entries(value: Option<&Value>) -> Result<Vec<CustomFieldEntry>, ProviderError> {
    match value {
        None => Ok(Vec::new()),
        Some(value) => serde_json::from_value(value.clone())
            .map_err(|err| ProviderError::invalid_attribute(CUSTOM_FIELD_ATTR, err.to_string())),
    }
}

fn same_elements(old: &[Value], new: &[Value]) -> bool {
    old.len() == new.len() && old.iter().all(|item| new.contains(item)) && new.iter().all(|item| old.contains(item))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn map(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn getters_default_when_unset() {
        let data = ResourceData::new(map(json!({"name": "x", "tenant": null})));
        assert_eq!(data.get_str("name"), "x");
        assert_eq!(data.get_str("description"), "");
        assert_eq!(data.get_u64("tenant"), 0);
        assert!(!data.get_bool("enabled"));
        assert_eq!(data.get_f64("vcpus"), None);
    }

    #[test]
    fn changes_compare_state_and_plan() {
        let data = ResourceData::planned(
            "1",
            map(json!({"name": "a", "tenant": 3, "description": "d"})),
            map(json!({"name": "a", "tenant": null, "description": ""})),
        );
        assert!(!data.has_change("name"));
        assert!(data.has_change("tenant"));
        assert!(data.has_change("description"));
        assert!(!data.has_change("comments"));
        assert_eq!(data.get_change("tenant"), (Some(&json!(3)), None));
    }

    #[test]
    fn reordered_sets_are_unchanged() {
        let data = ResourceData::planned(
            "1",
            map(json!({"tag": [{"name": "a", "slug": "a"}, {"name": "b", "slug": "b"}]})),
            map(json!({"tag": [{"name": "b", "slug": "b"}, {"name": "a", "slug": "a"}]})),
        );
        assert!(!data.has_change("tag"));
    }

    #[test]
    fn custom_fields_read_from_both_sides() {
        let data = ResourceData::planned(
            "1",
            map(json!({"custom_field": [{"name": "a", "type": "text", "value": "x"}]})),
            map(json!({})),
        );
        assert_eq!(data.prior_custom_fields().unwrap().len(), 1);
        assert!(data.custom_fields().unwrap().is_empty());
        assert!(data.has_change("custom_field"));
    }

    #[test]
    fn required_values_must_be_set() {
        let data = ResourceData::new(map(json!({"name": ""})));
        assert!(matches!(data.require_str("name"), Err(ProviderError::MissingAttribute(_))));
        assert!(data.require_u64("site").is_err());
    }

    #[test]
    fn id_round_trips() {
        let mut data = ResourceData::new(Map::new());
        data.set_id(42u64);
        assert_eq!(data.object_id().unwrap(), 42);
        data.clear_id();
        assert_eq!(data.id(), "");
    }
}
