//! Mock NetBoxClient for unit testing
//!
//! This module provides a mock implementation of NetBoxClientTrait that can be used
//! in unit tests without requiring a running NetBox instance.
//!
//! Objects are stored as JSON per endpoint path. Write bodies are validated the
//! way NetBox validates them (placeholder timestamps and `0` relation ids are
//! rejected), merged into the stored object and echoed back with nested
//! relations expanded. Every request is recorded for assertions.

mod helpers;

pub use helpers::MOCK_TIMESTAMP;

use crate::error::NetBoxError;
use crate::netbox_trait::NetBoxClientTrait;
use serde_json::{json, Map, Value};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

/// A request received by the mock
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub method: &'static str,
    pub path: String,
    pub body: Option<Value>,
}

/// Mock NetBoxClient for testing
///
/// This mock stores resources in memory and can be configured to return
/// specific responses for testing different scenarios.
#[derive(Debug, Clone)]
pub struct MockNetBoxClient {
    pub(crate) base_url: String,
    // In-memory storage: collection path -> id -> object
    pub(crate) objects: Arc<Mutex<BTreeMap<String, BTreeMap<u64, Value>>>>,
    pub(crate) requests: Arc<Mutex<Vec<RecordedRequest>>>,
    pub(crate) fail_next: Arc<Mutex<Option<String>>>,
    // Counter for generating IDs
    pub(crate) next_id: Arc<Mutex<u64>>,
}

impl MockNetBoxClient {
    /// Create a new mock client
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            objects: Arc::new(Mutex::new(BTreeMap::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
            fail_next: Arc::new(Mutex::new(None)),
            next_id: Arc::new(Mutex::new(1)),
        }
    }

    /// Add an object to the mock store (for test setup); returns its id
    pub fn add_object(&self, collection: &str, mut object: Value) -> u64 {
        let id = match object.get("id").and_then(Value::as_u64) {
            Some(id) => id,
            None => self.next_id(),
        };
        if let Value::Object(fields) = &mut object {
            fields.insert("id".to_string(), json!(id));
            fields
                .entry("url")
                .or_insert_with(|| json!(self.helpers().object_url(collection, id)));
        }
        self.objects
            .lock()
            .unwrap()
            .entry(collection_key(collection))
            .or_default()
            .insert(id, object);
        id
    }

    /// Stored object, if any
    pub fn object(&self, collection: &str, id: u64) -> Option<Value> {
        self.objects
            .lock()
            .unwrap()
            .get(&collection_key(collection))
            .and_then(|objects| objects.get(&id))
            .cloned()
    }

    /// Remove an object behind the provider's back (out-of-band deletion)
    pub fn remove_object(&self, collection: &str, id: u64) -> Option<Value> {
        self.objects
            .lock()
            .unwrap()
            .get_mut(&collection_key(collection))
            .and_then(|objects| objects.remove(&id))
    }

    /// Every request received so far
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Body of the most recent request with `method`
    pub fn last_body(&self, method: &str) -> Option<Value> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|request| request.method == method)
            .and_then(|request| request.body.clone())
    }

    /// Make the next call fail with an API error carrying `message`
    pub fn fail_next(&self, message: impl Into<String>) {
        *self.fail_next.lock().unwrap() = Some(message.into());
    }

    /// Generate next ID
    pub(crate) fn next_id(&self) -> u64 {
        let mut id = self.next_id.lock().unwrap();
        let current = *id;
        *id += 1;
        current
    }

    /// Get helpers instance
    pub(crate) fn helpers(&self) -> helpers::Helpers {
        helpers::Helpers::new(self.base_url.clone())
    }

    fn record(&self, method: &'static str, path: &str, body: Option<Value>) -> Result<(), NetBoxError> {
        self.requests.lock().unwrap().push(RecordedRequest {
            method,
            path: path.to_string(),
            body,
        });
        match self.fail_next.lock().unwrap().take() {
            Some(message) => Err(NetBoxError::Api(message)),
            None => Ok(()),
        }
    }

    fn parse_body(body: &[u8]) -> Result<Map<String, Value>, NetBoxError> {
        match serde_json::from_slice::<Value>(body)? {
            Value::Object(fields) => Ok(fields),
            other => Err(NetBoxError::InvalidRequest(format!("expected a JSON object, got {}", other))),
        }
    }
}

/// Split `dcim/sites/7/` into (`dcim/sites`, Some(7))
fn split_path(path: &str) -> (String, Option<u64>) {
    let trimmed = path.split('?').next().unwrap_or(path).trim_matches('/');
    match trimmed.rsplit_once('/') {
        Some((collection, last)) => match last.parse::<u64>() {
            Ok(id) => (collection.to_string(), Some(id)),
            Err(_) => (trimmed.to_string(), None),
        },
        None => (trimmed.to_string(), None),
    }
}

fn collection_key(collection: &str) -> String {
    collection.trim_matches('/').to_string()
}

fn not_found(path: &str) -> NetBoxError {
    NetBoxError::NotFound(format!("Resource not found: {} - {{\"detail\":\"Not found.\"}}", path))
}

/// Compare a stored attribute against a query filter value
fn matches_filter(object: &Value, key: &str, expected: &str) -> bool {
    let field = object
        .get(key)
        .or_else(|| key.strip_suffix("_id").and_then(|relation| object.get(relation)));
    match field {
        Some(Value::String(actual)) => actual == expected,
        Some(Value::Number(actual)) => actual.to_string() == expected,
        Some(Value::Bool(actual)) => actual.to_string() == expected,
        Some(Value::Object(nested)) => nested
            .get("id")
            .map(|id| id.to_string() == expected)
            .unwrap_or(false),
        _ => false,
    }
}

#[async_trait::async_trait]
impl NetBoxClientTrait for MockNetBoxClient {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn validate_token(&self) -> Result<(), NetBoxError> {
        self.record("GET", "status/", None)
    }

    async fn get(&self, path: &str) -> Result<Value, NetBoxError> {
        self.record("GET", path, None)?;
        let (collection, id) = split_path(path);
        let id = id.ok_or_else(|| NetBoxError::InvalidRequest(format!("{} is not an object path", path)))?;
        self.object(&collection, id).ok_or_else(|| not_found(path))
    }

    async fn list(&self, path: &str, filters: &[(&str, &str)]) -> Result<Vec<Value>, NetBoxError> {
        self.record("GET", path, None)?;
        let (collection, _) = split_path(path);
        let objects = self.objects.lock().unwrap();
        Ok(objects
            .get(&collection)
            .map(|stored| {
                stored
                    .values()
                    .filter(|object| filters.iter().all(|(key, value)| matches_filter(object, key, value)))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn post(&self, path: &str, body: Vec<u8>) -> Result<Value, NetBoxError> {
        let fields = Self::parse_body(&body)?;
        self.record("POST", path, Some(Value::Object(fields.clone())))?;
        let helpers = self.helpers();
        helpers.validate_body(&fields).map_err(NetBoxError::Api)?;

        let (collection, _) = split_path(path);
        let id = self.next_id();
        let mut stored = Map::new();
        stored.insert("id".to_string(), json!(id));
        stored.insert("url".to_string(), json!(helpers.object_url(&collection, id)));
        stored.insert("created".to_string(), json!(helpers::MOCK_TIMESTAMP));
        helpers.merge(&mut stored, fields);

        let stored = Value::Object(stored);
        self.objects
            .lock()
            .unwrap()
            .entry(collection)
            .or_default()
            .insert(id, stored.clone());
        Ok(stored)
    }

    async fn patch(&self, path: &str, body: Vec<u8>) -> Result<Value, NetBoxError> {
        let fields = Self::parse_body(&body)?;
        self.record("PATCH", path, Some(Value::Object(fields.clone())))?;
        let helpers = self.helpers();
        helpers.validate_body(&fields).map_err(NetBoxError::Api)?;

        let (collection, id) = split_path(path);
        let id = id.ok_or_else(|| NetBoxError::InvalidRequest(format!("{} is not an object path", path)))?;
        let mut objects = self.objects.lock().unwrap();
        let stored = objects
            .get_mut(&collection)
            .and_then(|stored| stored.get_mut(&id))
            .ok_or_else(|| not_found(path))?;
        if let Value::Object(existing) = stored {
            helpers.merge(existing, fields);
        }
        Ok(stored.clone())
    }

    async fn delete(&self, path: &str) -> Result<(), NetBoxError> {
        self.record("DELETE", path, None)?;
        let (collection, id) = split_path(path);
        let id = id.ok_or_else(|| NetBoxError::InvalidRequest(format!("{} is not an object path", path)))?;
        self.remove_object(&collection, id).map(|_| ()).ok_or_else(|| not_found(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ZERO_TIMESTAMP;

    #[test]
    fn split_path_separates_ids() {
        assert_eq!(split_path("dcim/sites/7/"), ("dcim/sites".to_string(), Some(7)));
        assert_eq!(split_path("dcim/sites/"), ("dcim/sites".to_string(), None));
        assert_eq!(split_path("dcim/sites/?slug=a"), ("dcim/sites".to_string(), None));
    }

    #[tokio::test]
    async fn post_expands_relations_and_choices() {
        let mock = MockNetBoxClient::new("http://netbox/api");
        let created = mock
            .post("dcim/sites/", br#"{"name":"FRA1","slug":"fra1","status":"active","tenant":3}"#.to_vec())
            .await
            .unwrap();
        assert_eq!(created["status"]["value"], json!("active"));
        assert_eq!(created["tenant"]["id"], json!(3));
        assert_eq!(created["created"], json!(MOCK_TIMESTAMP));
    }

    #[tokio::test]
    async fn post_rejects_placeholder_timestamps() {
        let mock = MockNetBoxClient::new("http://netbox/api");
        let body = format!(r#"{{"name":"x","created":"{}"}}"#, ZERO_TIMESTAMP);
        let result = mock.post("dcim/sites/", body.into_bytes()).await;
        assert!(matches!(result, Err(NetBoxError::Api(_))));
    }

    #[tokio::test]
    async fn patch_null_clears_relation() {
        let mock = MockNetBoxClient::new("http://netbox/api");
        let id = mock.add_object("dcim/sites", json!({"name": "FRA1", "tenant": {"id": 3}}));
        let updated = mock
            .patch(&format!("dcim/sites/{}/", id), br#"{"tenant":null}"#.to_vec())
            .await
            .unwrap();
        assert!(updated["tenant"].is_null());
        assert_eq!(mock.last_body("PATCH"), Some(json!({"tenant": null})));
    }

    #[tokio::test]
    async fn patch_merges_custom_fields_by_key() {
        let mock = MockNetBoxClient::new("http://netbox/api");
        let id = mock.add_object(
            "tenancy/tenants",
            json!({"name": "Acme", "custom_fields": {"owner": "ops", "cost_center": "42"}}),
        );
        let updated = mock
            .patch(
                &format!("tenancy/tenants/{}/", id),
                br#"{"custom_fields":{"owner":"netops","legacy":null}}"#.to_vec(),
            )
            .await
            .unwrap();
        assert_eq!(
            updated["custom_fields"],
            json!({"owner": "netops", "cost_center": "42", "legacy": null})
        );
    }

    #[tokio::test]
    async fn list_filters_on_scalars_and_nested_ids() {
        let mock = MockNetBoxClient::new("http://netbox/api");
        mock.add_object("dcim/racks", json!({"name": "R1", "site": {"id": 1}}));
        mock.add_object("dcim/racks", json!({"name": "R2", "site": {"id": 2}}));

        let by_site = mock.list("dcim/racks/", &[("site_id", "2")]).await.unwrap();
        assert_eq!(by_site.len(), 1);
        assert_eq!(by_site[0]["name"], json!("R2"));

        let by_name = mock.list("dcim/racks/", &[("name", "R1")]).await.unwrap();
        assert_eq!(by_name.len(), 1);
    }

    #[tokio::test]
    async fn missing_objects_are_not_found() {
        let mock = MockNetBoxClient::new("http://netbox/api");
        let err = mock.get("dcim/sites/99/").await.unwrap_err();
        assert!(err.is_not_found());
        let err = mock.delete("dcim/sites/99/").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn fail_next_fails_once() {
        let mock = MockNetBoxClient::new("http://netbox/api");
        mock.fail_next("boom");
        assert!(mock.validate_token().await.is_err());
        assert!(mock.validate_token().await.is_ok());
    }
}
