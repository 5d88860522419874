//! Test utilities for unit testing resources
//!
//! This module provides helpers for creating test data and setting up test scenarios.

#[cfg(test)]
use crate::data::ResourceData;
#[cfg(test)]
use crate::resource::ProviderMeta;
#[cfg(test)]
use netbox_client::MockNetBoxClient;
#[cfg(test)]
use serde_json::{json, Map, Value};

/// Base URL the mock reports in object URLs
#[cfg(test)]
pub const TEST_BASE_URL: &str = "http://test-netbox/api";

#[cfg(test)]
pub fn mock_client() -> MockNetBoxClient {
    MockNetBoxClient::new(TEST_BASE_URL)
}

/// Lenient provider meta over the mock
#[cfg(test)]
pub fn meta(mock: &MockNetBoxClient) -> ProviderMeta<'_> {
    ProviderMeta::new(mock)
}

/// Attribute map from a JSON object literal
#[cfg(test)]
pub fn attrs(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => panic!("attributes must be an object, got {}", other),
    }
}

/// Data for a resource about to be created
#[cfg(test)]
pub fn new_resource(config: Value) -> ResourceData {
    ResourceData::new(attrs(config))
}

/// Data moving from the current attributes of `data` to `edit(attributes)`
#[cfg(test)]
pub fn plan_change<F>(data: &ResourceData, edit: F) -> ResourceData
where
    F: FnOnce(&mut Map<String, Value>),
{
    let state = data.attributes().clone();
    let mut config = state.clone();
    edit(&mut config);
    ResourceData::planned(data.id(), state, config)
}

/// One `custom_field` block
#[cfg(test)]
pub fn custom_field(name: &str, field_type: &str, value: &str) -> Value {
    json!({"name": name, "type": field_type, "value": value})
}

/// Add a cluster with a type to the mock store
#[cfg(test)]
pub fn add_test_cluster(mock: &MockNetBoxClient, name: &str) -> u64 {
    mock.add_object(
        "virtualization/clusters",
        json!({
            "name": name,
            "type": {"id": 1, "display": "VMware"},
            "custom_fields": {}
        }),
    )
}

/// Add a tenant to the mock store
#[cfg(test)]
pub fn add_test_tenant(mock: &MockNetBoxClient, slug: &str) -> u64 {
    mock.add_object(
        "tenancy/tenants",
        json!({"name": slug.to_uppercase(), "slug": slug, "custom_fields": {}}),
    )
}
