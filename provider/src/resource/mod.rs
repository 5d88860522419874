//! Resources
//!
//! Each resource maps one NetBox object kind onto Create/Read/Update/Delete
//! and Exists. The shared lifecycle lives here:
//!
//! - Create sends the full body through a [`DropOverwriteWriter`] that removes
//!   placeholder timestamps and sets `custom_fields`, records the id, then Reads.
//! - Read fetches the object; a 404 means it was deleted outside Terraform and
//!   clears the id.
//! - Update sends a PATCH through a [`PartialUpdateWriter`] carrying only the
//!   attributes that changed, then Reads.
//! - Delete removes the object; errors propagate.
//! - Exists answers `false` on 404.
//!
//! Resources: Site, Rack, DeviceRole, Platform, Cluster, VirtualMachine,
//! VM Interface, Tenant

pub mod dcim;
pub mod tenancy;
pub mod virtualization;

#[cfg(test)]
mod lifecycle_test;

use crate::convert::{content_type_from_url, nonzero_id, tags_to_attribute};
use crate::custom_fields::{api_to_config, to_json_map, CustomFieldMode};
use crate::data::{ResourceData, CUSTOM_FIELD_ATTR, TAG_ATTR};
use crate::error::ProviderError;
use crate::shaper::{DropOverwriteWriter, ModifiedFields, PartialUpdateWriter};
use async_trait::async_trait;
use netbox_client::{Endpoint, NestedTag, NetBoxClientTrait, NetBoxError};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, info, warn};

/// Attributes every writable model serializes with a placeholder when unset
pub const TIMESTAMP_FIELDS: &[&str] = &["created", "last_updated"];

/// Attribute exposing the object's content type
pub const CONTENT_TYPE_ATTR: &str = "content_type";

/// Static description of a resource kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceKind {
    /// Terraform type name, e.g. `netbox_dcim_site`
    pub type_name: &'static str,
    /// Wire names the writable model always serializes; removed from PATCH
    /// bodies when they only hold a placeholder
    pub required_fields: &'static [&'static str],
}

/// The configured client and the provider settings resources consult
#[derive(Clone, Copy)]
pub struct ProviderMeta<'a> {
    pub client: &'a dyn NetBoxClientTrait,
    pub custom_fields: CustomFieldMode,
}

impl<'a> ProviderMeta<'a> {
    /// Meta for `client` with lenient custom field decoding
    pub fn new(client: &'a dyn NetBoxClientTrait) -> Self {
        Self {
            client,
            custom_fields: CustomFieldMode::Lenient,
        }
    }

    pub fn with_custom_fields(mut self, mode: CustomFieldMode) -> Self {
        self.custom_fields = mode;
        self
    }
}

/// Lifecycle of one Terraform resource type
#[async_trait]
pub trait Resource: Send + Sync {
    fn kind(&self) -> ResourceKind;

    async fn create(&self, meta: ProviderMeta<'_>, data: &mut ResourceData) -> Result<(), ProviderError>;

    async fn read(&self, meta: ProviderMeta<'_>, data: &mut ResourceData) -> Result<(), ProviderError>;

    async fn update(&self, meta: ProviderMeta<'_>, data: &mut ResourceData) -> Result<(), ProviderError>;

    async fn delete(&self, meta: ProviderMeta<'_>, data: &mut ResourceData) -> Result<(), ProviderError>;

    async fn exists(&self, meta: ProviderMeta<'_>, data: &ResourceData) -> Result<bool, ProviderError>;
}

/// Every resource this provider serves
pub fn all() -> Vec<Box<dyn Resource>> {
    vec![
        Box::new(dcim::site::SiteResource),
        Box::new(dcim::rack::RackResource),
        Box::new(dcim::device_role::DeviceRoleResource),
        Box::new(dcim::platform::PlatformResource),
        Box::new(virtualization::cluster::ClusterResource),
        Box::new(virtualization::virtual_machine::VirtualMachineResource),
        Box::new(virtualization::interface::InterfaceResource),
        Box::new(tenancy::TenantResource),
    ]
}

/// Fields every NetBox object returns
pub trait NetBoxObject {
    fn id(&self) -> u64;
    fn url(&self) -> &str;
    fn tags(&self) -> &[NestedTag];
    fn custom_fields(&self) -> &Map<String, Value>;
}

macro_rules! netbox_object {
    ($($model:ty),* $(,)?) => {
        $(
            impl NetBoxObject for $model {
                fn id(&self) -> u64 { self.id }
                fn url(&self) -> &str { &self.url }
                fn tags(&self) -> &[NestedTag] { &self.tags }
                fn custom_fields(&self) -> &Map<String, Value> { &self.custom_fields }
            }
        )*
    };
}

netbox_object!(
    netbox_client::Site,
    netbox_client::Rack,
    netbox_client::DeviceRole,
    netbox_client::Platform,
    netbox_client::Cluster,
    netbox_client::VirtualMachine,
    netbox_client::VMInterface,
    netbox_client::Tenant,
);

/// Create an object and record its id
pub(crate) async fn create_object<R, W>(
    kind: ResourceKind,
    endpoint: Endpoint<R>,
    meta: ProviderMeta<'_>,
    data: &mut ResourceData,
    body: &W,
) -> Result<R, ProviderError>
where
    R: DeserializeOwned + NetBoxObject + Send,
    W: Serialize + Sync,
{
    let custom_fields = meta.custom_fields.encode(None, &data.custom_fields()?)?;
    let writer = kind
        .required_fields
        .iter()
        .fold(DropOverwriteWriter::new(), |writer, field| writer.drop_field(*field))
        .overwrite("custom_fields", Value::Object(to_json_map(custom_fields)));

    let created = endpoint.create(meta.client, body, &writer).await?;
    info!("Created {} (ID: {})", kind.type_name, created.id());
    data.set_id(created.id());
    Ok(created)
}

/// Fetch the object behind `data`; `None` when NetBox no longer has it
pub(crate) async fn read_object<R>(
    kind: ResourceKind,
    endpoint: Endpoint<R>,
    meta: ProviderMeta<'_>,
    data: &mut ResourceData,
) -> Result<Option<R>, ProviderError>
where
    R: DeserializeOwned + NetBoxObject + Send,
{
    let id = data.object_id()?;
    match endpoint.retrieve(meta.client, id).await {
        Ok(object) => {
            write_common(data, &object)?;
            Ok(Some(object))
        }
        Err(NetBoxError::NotFound(_)) => {
            warn!("{} (ID: {}) was deleted in NetBox, removing it from state", kind.type_name, id);
            data.clear_id();
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}

/// Send a PATCH built from `body` and the changes recorded in `changes`
pub(crate) async fn update_object<R, W>(
    kind: ResourceKind,
    endpoint: Endpoint<R>,
    meta: ProviderMeta<'_>,
    data: &ResourceData,
    changes: Changes<'_>,
    body: &W,
) -> Result<R, ProviderError>
where
    R: DeserializeOwned + Send,
    W: Serialize + Sync,
{
    let id = data.object_id()?;
    let modified = changes.into_modified();
    debug!("Updating {} (ID: {}), changed: {:?}", kind.type_name, id, modified);
    let writer = PartialUpdateWriter::new(kind.required_fields, modified);
    Ok(endpoint.partial_update(meta.client, id, body, &writer).await?)
}

pub(crate) async fn delete_object<R>(
    kind: ResourceKind,
    endpoint: Endpoint<R>,
    meta: ProviderMeta<'_>,
    data: &mut ResourceData,
) -> Result<(), ProviderError>
where
    R: DeserializeOwned,
{
    let id = data.object_id()?;
    endpoint.delete(meta.client, id).await?;
    info!("Deleted {} (ID: {})", kind.type_name, id);
    data.clear_id();
    Ok(())
}

pub(crate) async fn object_exists<R>(
    endpoint: Endpoint<R>,
    meta: ProviderMeta<'_>,
    data: &ResourceData,
) -> Result<bool, ProviderError>
where
    R: DeserializeOwned + Send,
{
    let id = data.object_id()?;
    match endpoint.retrieve(meta.client, id).await {
        Ok(_) => Ok(true),
        Err(NetBoxError::NotFound(_)) => Ok(false),
        Err(e) => Err(e.into()),
    }
}

/// Write back what every object has: tags, custom fields, content type
fn write_common<R: NetBoxObject>(data: &mut ResourceData, object: &R) -> Result<(), ProviderError> {
    let configured = data.custom_fields()?;
    data.set_custom_fields(&api_to_config(&configured, object.custom_fields()))?;
    data.set(TAG_ATTR, tags_to_attribute(object.tags()));
    if let Some(content_type) = content_type_from_url(object.url()) {
        data.set(CONTENT_TYPE_ATTR, content_type);
    }
    Ok(())
}

/// Builds a writable body from planned values.
///
/// On create every attribute is carried. On update only attributes that
/// changed are, so serde leaves the rest out of the PATCH; each changed one is
/// also recorded under its API name with the value NetBox should end up with.
/// Relations and numbers record `0` when cleared.
pub(crate) struct Changes<'a> {
    data: &'a ResourceData,
    full: bool,
    custom_field_mode: CustomFieldMode,
    modified: ModifiedFields,
}

impl<'a> Changes<'a> {
    /// Full body for a create
    pub fn create(data: &'a ResourceData, custom_field_mode: CustomFieldMode) -> Self {
        Self {
            data,
            full: true,
            custom_field_mode,
            modified: ModifiedFields::new(),
        }
    }

    /// Body holding only what changed, for a partial update
    pub fn update(data: &'a ResourceData, custom_field_mode: CustomFieldMode) -> Self {
        Self {
            full: false,
            ..Self::create(data, custom_field_mode)
        }
    }

    /// The data the changes are read from
    pub fn data(&self) -> &'a ResourceData {
        self.data
    }

    /// Whether `attr` goes into the body
    pub fn includes(&self, attr: &str) -> bool {
        self.full || self.data.has_change(attr)
    }

    pub fn string(&mut self, attr: &str, api_name: &str) -> String {
        let value = self.data.get_str(attr).to_string();
        if self.data.has_change(attr) {
            self.modified.insert(api_name, value.clone());
        }
        if self.includes(attr) { value } else { String::new() }
    }

    /// Required string; validated on every call, carried like [`Changes::string`]
    pub fn required_string(&mut self, attr: &str, api_name: &str) -> Result<String, ProviderError> {
        self.data.require_str(attr)?;
        Ok(self.string(attr, api_name))
    }

    pub fn boolean(&mut self, attr: &str, api_name: &str) -> bool {
        let value = self.data.get_bool(attr);
        if self.data.has_change(attr) {
            self.modified.insert(api_name, value);
        }
        value && self.includes(attr)
    }

    /// Relation id or integer; unset and `0` both mean "none"
    pub fn id(&mut self, attr: &str, api_name: &str) -> Option<u64> {
        let value = self.data.get_u64(attr);
        if self.data.has_change(attr) {
            self.modified.insert(api_name, value);
        }
        nonzero_id(value).filter(|_| self.includes(attr))
    }

    /// Plain integer; `0` clears it
    pub fn number(&mut self, attr: &str, api_name: &str) -> Option<u64> {
        self.id(attr, api_name)
    }

    pub fn float(&mut self, attr: &str, api_name: &str) -> Option<f64> {
        let value = self.data.get_f64(attr);
        if self.data.has_change(attr) {
            self.modified.insert(api_name, value.unwrap_or_default());
        }
        value.filter(|v| *v != 0.0 && self.includes(attr))
    }

    /// Nullable string, e.g. a MAC address
    pub fn optional_string(&mut self, attr: &str, api_name: &str) -> Option<String> {
        let value = Some(self.data.get_str(attr).to_string()).filter(|v| !v.is_empty());
        if self.data.has_change(attr) {
            self.modified.insert(api_name, value.clone().map(Value::String).unwrap_or(Value::Null));
        }
        value.filter(|_| self.includes(attr))
    }

    /// Record a value computed from changed attributes
    pub fn record(&mut self, api_name: &str, value: impl Into<Value>) {
        self.modified.insert(api_name, value);
    }

    /// Planned tag set, when carried
    pub fn tags(&self) -> Result<Option<Vec<NestedTag>>, ProviderError> {
        if !self.includes(TAG_ATTR) {
            return Ok(None);
        }
        self.data.tags().map(Some)
    }

    /// `custom_fields` payload, when carried.
    ///
    /// Fields dropped since the last apply are sent as `null`.
    pub fn custom_fields(&self) -> Result<Option<Map<String, Value>>, ProviderError> {
        if !self.includes(CUSTOM_FIELD_ATTR) {
            return Ok(None);
        }
        let prior = self.data.prior_custom_fields()?;
        let current = self.data.custom_fields()?;
        let fields = self.custom_field_mode.encode(Some(&prior), &current)?;
        Ok(Some(to_json_map(fields)))
    }

    pub fn into_modified(self) -> ModifiedFields {
        self.modified
    }
}
