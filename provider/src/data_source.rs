//! Lookup data sources
//!
//! Each data source finds exactly one object by `slug` or `name` and exposes
//! its id, name, slug, description and content type.

use crate::convert::content_type_from_url;
use crate::data::ResourceData;
use crate::error::ProviderError;
use crate::resource::CONTENT_TYPE_ATTR;
use async_trait::async_trait;
use netbox_client::{
    NetBoxClientTrait, CLUSTERS, DEVICE_ROLES, PLATFORMS, RACKS, SITES, TAGS, TENANTS,
};
use serde_json::Value;
use tracing::debug;

/// Attributes a lookup may filter on, in the order they are applied
const LOOKUP_KEYS: &[&str] = &["slug", "name"];

#[async_trait]
pub trait DataSource: Send + Sync {
    fn type_name(&self) -> &'static str;

    async fn read(&self, client: &dyn NetBoxClientTrait, data: &mut ResourceData) -> Result<(), ProviderError>;
}

/// Data source backed by a NetBox list endpoint
#[derive(Debug, Clone)]
pub struct LookupDataSource {
    type_name: &'static str,
    collection: String,
}

impl LookupDataSource {
    pub fn new(type_name: &'static str, collection: String) -> Self {
        Self { type_name, collection }
    }
}

/// Every data source this provider serves
pub fn all() -> Vec<Box<dyn DataSource>> {
    vec![
        Box::new(LookupDataSource::new("netbox_dcim_site", SITES.collection_path())),
        Box::new(LookupDataSource::new("netbox_dcim_rack", RACKS.collection_path())),
        Box::new(LookupDataSource::new("netbox_dcim_device_role", DEVICE_ROLES.collection_path())),
        Box::new(LookupDataSource::new("netbox_dcim_platform", PLATFORMS.collection_path())),
        Box::new(LookupDataSource::new("netbox_virtualization_cluster", CLUSTERS.collection_path())),
        Box::new(LookupDataSource::new("netbox_tenancy_tenant", TENANTS.collection_path())),
        Box::new(LookupDataSource::new("netbox_extras_tag", TAGS.collection_path())),
    ]
}

#[async_trait]
impl DataSource for LookupDataSource {
    fn type_name(&self) -> &'static str {
        self.type_name
    }

    async fn read(&self, client: &dyn NetBoxClientTrait, data: &mut ResourceData) -> Result<(), ProviderError> {
        let filters: Vec<(&str, String)> = LOOKUP_KEYS
            .iter()
            .filter_map(|key| match data.get_str(key) {
                "" => None,
                value => Some((*key, value.to_string())),
            })
            .collect();
        if filters.is_empty() {
            return Err(ProviderError::MissingAttribute("slug or name".to_string()));
        }
        let query: Vec<(&str, &str)> = filters.iter().map(|(k, v)| (*k, v.as_str())).collect();

        debug!("Looking up {} with {:?}", self.type_name, query);
        let found = client.list(&self.collection, &query).await?;
        let object = match found.as_slice() {
            [object] => object,
            [] => {
                return Err(ProviderError::Lookup(format!(
                    "no {} matches {}",
                    self.type_name,
                    describe(&query)
                )));
            }
            many => {
                return Err(ProviderError::Lookup(format!(
                    "{} objects of type {} match {}, narrow the search",
                    many.len(),
                    self.type_name,
                    describe(&query)
                )));
            }
        };

        let id = object
            .get("id")
            .and_then(Value::as_u64)
            .ok_or_else(|| ProviderError::Lookup(format!("{} returned an object without id", self.collection)))?;
        data.set_id(id);
        for key in ["name", "slug", "description"] {
            data.set(key, object.get(key).and_then(Value::as_str).unwrap_or_default());
        }
        if let Some(content_type) = object.get("url").and_then(Value::as_str).and_then(content_type_from_url) {
            data.set(CONTENT_TYPE_ATTR, content_type);
        }
        Ok(())
    }
}

fn describe(query: &[(&str, &str)]) -> String {
    query
        .iter()
        .map(|(key, value)| format!("{}={:?}", key, value))
        .collect::<Vec<_>>()
        .join(" and ")
}
