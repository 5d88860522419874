//! NetBoxClient trait for mocking
//!
//! This trait abstracts the NetBoxClient to enable mocking in unit tests.
//! The concrete NetBoxClient implements this trait, and tests can use mock implementations.
//!
//! The surface is deliberately untyped: paths are relative to the API root
//! (`dcim/sites/1/`), request bodies arrive already serialized and shaped, and
//! responses come back as JSON values. Typed access lives in
//! [`Endpoint`](crate::Endpoint).

use crate::error::NetBoxError;
use serde_json::Value;

/// Trait for NetBox API client operations
///
/// This trait enables mocking of NetBox API calls for unit testing.
/// All async methods must be `Send` to work with Tokio's work-stealing runtime.
#[async_trait::async_trait]
pub trait NetBoxClientTrait: Send + Sync {
    /// Get the base URL
    fn base_url(&self) -> &str;

    /// Validate the API token
    async fn validate_token(&self) -> Result<(), NetBoxError>;

    /// Fetch one object
    async fn get(&self, path: &str) -> Result<Value, NetBoxError>;

    /// Fetch every object matching `filters`, following pagination
    async fn list(&self, path: &str, filters: &[(&str, &str)]) -> Result<Vec<Value>, NetBoxError>;

    /// Create an object from a serialized JSON body
    async fn post(&self, path: &str, body: Vec<u8>) -> Result<Value, NetBoxError>;

    /// Partially update an object from a serialized JSON body
    async fn patch(&self, path: &str, body: Vec<u8>) -> Result<Value, NetBoxError>;

    /// Delete an object
    async fn delete(&self, path: &str) -> Result<(), NetBoxError>;
}
