//! NetBox API client
//!
//! Implements [`NetBoxClientTrait`] over HTTP. Paths are resolved against the
//! API root, e.g. `https://netbox.example.com` + `/api` + `dcim/sites/1/`.

use crate::common::query::query_resources;
use crate::common::HttpClient;
use crate::error::NetBoxError;
use crate::netbox_trait::NetBoxClientTrait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// Default API base path appended to the server URL
pub const DEFAULT_BASE_PATH: &str = "/api";

/// Connection options for [`NetBoxClient`]
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// Server URL including scheme, e.g. `https://netbox.example.com`
    pub server_url: String,
    /// API base path, `/api` unless NetBox is served under a prefix
    pub base_path: String,
    /// API token
    pub token: String,
    /// Skip TLS certificate verification
    pub insecure: bool,
    /// Per-request timeout
    pub timeout: Duration,
}

impl ClientOptions {
    /// Options with the default base path, TLS verification on and a 30s timeout
    pub fn new(server_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            server_url: server_url.into(),
            base_path: DEFAULT_BASE_PATH.to_string(),
            token: token.into(),
            insecure: false,
            timeout: Duration::from_secs(30),
        }
    }

    fn api_root(&self) -> String {
        let server = self.server_url.trim_end_matches('/');
        let base_path = self.base_path.trim_matches('/');
        if base_path.is_empty() {
            server.to_string()
        } else {
            format!("{}/{}", server, base_path)
        }
    }
}

/// NetBox API client
#[derive(Debug, Clone)]
pub struct NetBoxClient {
    http: HttpClient,
}

impl NetBoxClient {
    /// Create a new NetBox client
    ///
    /// # Arguments
    /// * `base_url` - NetBox base URL (e.g., "http://netbox:80")
    /// * `token` - API token for authentication
    pub fn new(base_url: String, token: String) -> Result<Self, NetBoxError> {
        Self::with_options(ClientOptions::new(base_url, token))
    }

    /// Create a client from explicit connection options
    pub fn with_options(options: ClientOptions) -> Result<Self, NetBoxError> {
        let client = Client::builder()
            .timeout(options.timeout)
            .danger_accept_invalid_certs(options.insecure)
            .build()
            .map_err(NetBoxError::Http)?;

        Ok(Self {
            http: HttpClient::new(client, options.api_root(), options.token),
        })
    }
}

#[async_trait::async_trait]
impl NetBoxClientTrait for NetBoxClient {
    fn base_url(&self) -> &str {
        self.http.base_url()
    }

    /// Validate the API token by making a simple authenticated request.
    ///
    /// Uses the status endpoint as it's lightweight and requires authentication.
    async fn validate_token(&self) -> Result<(), NetBoxError> {
        debug!("Validating NetBox token and connectivity");
        let _: Value = self.http.get("status/").await?;
        debug!("Token validated successfully");
        Ok(())
    }

    async fn get(&self, path: &str) -> Result<Value, NetBoxError> {
        self.http.get(path).await
    }

    async fn list(&self, path: &str, filters: &[(&str, &str)]) -> Result<Vec<Value>, NetBoxError> {
        debug!("Querying {} with filters: {:?}", path, filters);
        query_resources(&self.http, path, filters, true).await
    }

    async fn post(&self, path: &str, body: Vec<u8>) -> Result<Value, NetBoxError> {
        self.http.post(path, body).await
    }

    async fn patch(&self, path: &str, body: Vec<u8>) -> Result<Value, NetBoxError> {
        self.http.patch(path, body).await
    }

    async fn delete(&self, path: &str) -> Result<(), NetBoxError> {
        self.http.delete(path).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_root_joins_server_and_base_path() {
        let options = ClientOptions::new("https://netbox.example.com/", "t");
        assert_eq!(options.api_root(), "https://netbox.example.com/api");

        let mut prefixed = ClientOptions::new("https://example.com", "t");
        prefixed.base_path = "/netbox/api/".to_string();
        assert_eq!(prefixed.api_root(), "https://example.com/netbox/api");

        let mut bare = ClientOptions::new("http://localhost:8000", "t");
        bare.base_path = String::new();
        assert_eq!(bare.api_root(), "http://localhost:8000");
    }

    #[test]
    fn client_reports_api_root_as_base_url() {
        let client = NetBoxClient::new("http://netbox:80".to_string(), "token".to_string()).unwrap();
        assert_eq!(client.base_url(), "http://netbox:80/api");
    }
}
