//! Provider registry
//!
//! Holds the configured NetBox client and every resource and data source,
//! dispatches calls by Terraform type name and turns errors into diagnostics.
//! Custom field values the lenient codec cannot send as written are reported
//! as warnings.

use crate::config::{ProviderConfig, ProviderSettings};
use crate::custom_fields::{invalid_entries, CustomFieldMode};
use crate::data::{ResourceData, CUSTOM_FIELD_ATTR};
use crate::data_source::{self, DataSource};
use crate::error::{Diagnostic, Diagnostics, ProviderError};
use crate::resource::{self, ProviderMeta, Resource};
use netbox_client::NetBoxClientTrait;
use std::collections::BTreeMap;
use tracing::{debug, error, warn};

pub struct Provider {
    client: Box<dyn NetBoxClientTrait>,
    custom_fields: CustomFieldMode,
    resources: BTreeMap<&'static str, Box<dyn Resource>>,
    data_sources: BTreeMap<&'static str, Box<dyn DataSource>>,
}

impl Provider {
    /// Provider serving every resource and data source through `client`
    pub fn new(client: Box<dyn NetBoxClientTrait>) -> Self {
        Self {
            client,
            custom_fields: CustomFieldMode::Lenient,
            resources: resource::all().into_iter().map(|r| (r.kind().type_name, r)).collect(),
            data_sources: data_source::all().into_iter().map(|d| (d.type_name(), d)).collect(),
        }
    }

    /// Resolve settings against the environment and connect
    pub fn configure(settings: ProviderSettings) -> Result<Self, ProviderError> {
        let config = ProviderConfig::from_env(settings)?;
        debug!("Provider configuration: {:?}", config);
        Ok(Self::new(Box::new(config.client()?)).with_custom_fields(config.custom_field_mode()))
    }

    pub fn with_custom_fields(mut self, mode: CustomFieldMode) -> Self {
        self.custom_fields = mode;
        self
    }

    pub fn client(&self) -> &dyn NetBoxClientTrait {
        self.client.as_ref()
    }

    /// What resource operations run against
    pub fn meta(&self) -> ProviderMeta<'_> {
        ProviderMeta::new(self.client()).with_custom_fields(self.custom_fields)
    }

    pub fn resource_types(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.resources.keys().copied()
    }

    pub fn data_source_types(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.data_sources.keys().copied()
    }

    fn resource(&self, type_name: &str) -> Result<&dyn Resource, ProviderError> {
        self.resources
            .get(type_name)
            .map(|r| r.as_ref())
            .ok_or_else(|| ProviderError::UnknownType(type_name.to_string()))
    }

    pub async fn create(&self, type_name: &str, data: &mut ResourceData) -> Diagnostics {
        let mut diags = self.custom_field_warnings(type_name, data);
        let result = match self.resource(type_name) {
            Ok(resource) => resource.create(self.meta(), data).await,
            Err(e) => Err(e),
        };
        diags.append(diagnostics(type_name, "create", result));
        diags
    }

    pub async fn read(&self, type_name: &str, data: &mut ResourceData) -> Diagnostics {
        let result = match self.resource(type_name) {
            Ok(resource) => resource.read(self.meta(), data).await,
            Err(e) => Err(e),
        };
        diagnostics(type_name, "read", result)
    }

    pub async fn update(&self, type_name: &str, data: &mut ResourceData) -> Diagnostics {
        let mut diags = self.custom_field_warnings(type_name, data);
        let result = match self.resource(type_name) {
            Ok(resource) => resource.update(self.meta(), data).await,
            Err(e) => Err(e),
        };
        diags.append(diagnostics(type_name, "update", result));
        diags
    }

    pub async fn delete(&self, type_name: &str, data: &mut ResourceData) -> Diagnostics {
        let result = match self.resource(type_name) {
            Ok(resource) => resource.delete(self.meta(), data).await,
            Err(e) => Err(e),
        };
        diagnostics(type_name, "delete", result)
    }

    pub async fn exists(&self, type_name: &str, data: &ResourceData) -> Result<bool, Diagnostics> {
        let resource = self
            .resource(type_name)
            .map_err(|e| Diagnostics::from_error(&summary(type_name, "exists"), &e))?;
        resource.exists(self.meta(), data).await.map_err(|e| {
            error!("{} exists check failed: {}", type_name, e);
            Diagnostics::from_error(&summary(type_name, "exists"), &e)
        })
    }

    pub async fn read_data_source(&self, type_name: &str, data: &mut ResourceData) -> Diagnostics {
        let result = match self.data_sources.get(type_name) {
            Some(source) => source.read(self.client(), data).await,
            None => Err(ProviderError::UnknownType(type_name.to_string())),
        };
        diagnostics(type_name, "read", result)
    }

    /// Warnings for changed custom field values the lenient codec will degrade
    fn custom_field_warnings(&self, type_name: &str, data: &ResourceData) -> Diagnostics {
        let mut diags = Diagnostics::new();
        if self.custom_fields == CustomFieldMode::Strict || !data.has_change(CUSTOM_FIELD_ATTR) {
            return diags;
        }
        // an unreadable set fails the operation itself
        let Ok(entries) = data.custom_fields() else {
            return diags;
        };
        for err in invalid_entries(&entries) {
            warn!("{}: {}, {}", type_name, err, err.lenient_outcome());
            diags.push(Diagnostic::warning(
                format!("{}: custom field value not sent as written", type_name),
                format!("{}, {}", err, err.lenient_outcome()),
            ));
        }
        diags
    }
}

fn summary(type_name: &str, operation: &str) -> String {
    format!("{}: {} failed", type_name, operation)
}

fn diagnostics(type_name: &str, operation: &str, result: Result<(), ProviderError>) -> Diagnostics {
    match result {
        Ok(()) => Diagnostics::new(),
        Err(e) => {
            error!("{} {} failed: {}", type_name, operation, e);
            Diagnostics::from_error(&summary(type_name, operation), &e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Severity;
    use crate::test_utils::attrs;
    use netbox_client::MockNetBoxClient;
    use serde_json::{json, Map};

    #[test]
    fn registers_every_type() {
        let provider = Provider::new(Box::new(MockNetBoxClient::new("http://netbox/api")));
        assert_eq!(
            provider.resource_types().collect::<Vec<_>>(),
            vec![
                "netbox_dcim_device_role",
                "netbox_dcim_platform",
                "netbox_dcim_rack",
                "netbox_dcim_site",
                "netbox_tenancy_tenant",
                "netbox_virtualization_cluster",
                "netbox_virtualization_interface",
                "netbox_virtualization_vm",
            ]
        );
        assert_eq!(provider.data_source_types().count(), 7);
    }

    #[tokio::test]
    async fn unknown_type_is_an_error_diagnostic() {
        let provider = Provider::new(Box::new(MockNetBoxClient::new("http://netbox/api")));
        let mut data = ResourceData::new(Map::new());
        let diags = provider.create("netbox_dcim_device", &mut data).await;
        assert!(diags.has_errors());
        let diag = diags.iter().next().unwrap();
        assert_eq!(diag.severity, Severity::Error);
        assert!(diag.detail.contains("netbox_dcim_device"));
    }

    #[tokio::test]
    async fn degraded_custom_fields_warn() {
        let mock = MockNetBoxClient::new("http://netbox/api");
        let provider = Provider::new(Box::new(mock.clone()));
        let mut data = ResourceData::new(attrs(json!({
            "name": "Acme",
            "slug": "acme",
            "custom_field": [
                {"name": "rack_units", "type": "integer", "value": "two"},
                {"name": "owner", "type": "text", "value": "ops"}
            ]
        })));

        let diags = provider.create("netbox_tenancy_tenant", &mut data).await;

        assert!(!diags.has_errors());
        let warnings: Vec<_> = diags.iter().collect();
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].severity, Severity::Warning);
        assert!(warnings[0].detail.contains("rack_units"));
        assert!(warnings[0].detail.contains("sending 0"));
        assert!(!data.id().is_empty());
    }

    #[tokio::test]
    async fn strict_provider_fails_on_bad_custom_fields() {
        let mock = MockNetBoxClient::new("http://netbox/api");
        let provider = Provider::new(Box::new(mock.clone())).with_custom_fields(CustomFieldMode::Strict);
        let mut data = ResourceData::new(attrs(json!({
            "name": "Acme",
            "slug": "acme",
            "custom_field": [{"name": "managed", "type": "boolean", "value": "yes"}]
        })));

        let diags = provider.create("netbox_tenancy_tenant", &mut data).await;

        assert!(diags.has_errors());
        assert!(diags.iter().all(|d| d.severity == Severity::Error));
        assert!(mock.requests().is_empty());
    }

    #[tokio::test]
    async fn failures_become_diagnostics() {
        let mock = MockNetBoxClient::new("http://netbox/api");
        mock.fail_next("boom");
        let provider = Provider::new(Box::new(mock));
        let mut data = ResourceData::from_state("4", Map::new());
        let diags = provider.read("netbox_tenancy_tenant", &mut data).await;
        assert!(diags.has_errors());
        assert!(diags.iter().any(|d| d.detail.contains("boom")));
        assert_eq!(data.id(), "4");
    }
}
