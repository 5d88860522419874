//! Typed access to NetBox object endpoints
//!
//! An [`Endpoint`] ties an API path to its read model and exposes the five
//! operations every NetBox object supports. Mutating calls serialize the
//! typed request body, pass it through a [`RequestWriter`] and only then hand
//! it to the transport.

use crate::error::NetBoxError;
use crate::models::*;
use crate::netbox_trait::NetBoxClientTrait;
use crate::writer::RequestWriter;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;
use std::marker::PhantomData;
use tracing::debug;

/// Object endpoint under the API root, e.g. `dcim/sites`
pub struct Endpoint<R> {
    path: &'static str,
    _model: PhantomData<fn() -> R>,
}

impl<R> Endpoint<R> {
    /// Declare an endpoint at `path` (no leading or trailing slash)
    pub const fn new(path: &'static str) -> Self {
        Self { path, _model: PhantomData }
    }

    /// Collection path, e.g. `dcim/sites/`
    pub fn collection_path(&self) -> String {
        format!("{}/", self.path)
    }

    /// Object path, e.g. `dcim/sites/7/`
    pub fn object_path(&self, id: u64) -> String {
        format!("{}/{}/", self.path, id)
    }

    /// Raw path as declared
    pub fn path(&self) -> &'static str {
        self.path
    }
}

impl<R> Clone for Endpoint<R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R> Copy for Endpoint<R> {}

impl<R> fmt::Debug for Endpoint<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Endpoint").field(&self.path).finish()
    }
}

impl<R: DeserializeOwned> Endpoint<R> {
    /// Create an object; returns the object as NetBox stored it
    pub async fn create<W: Serialize + Sync>(
        &self,
        client: &dyn NetBoxClientTrait,
        body: &W,
        writer: &dyn RequestWriter,
    ) -> Result<R, NetBoxError> {
        let body = writer.write(serde_json::to_vec(body)?)?;
        debug!("Creating object at {}", self.path);
        let created = client.post(&self.collection_path(), body).await?;
        Ok(serde_json::from_value(created)?)
    }

    /// Fetch one object by id
    pub async fn retrieve(&self, client: &dyn NetBoxClientTrait, id: u64) -> Result<R, NetBoxError> {
        let raw = client.get(&self.object_path(id)).await?;
        Ok(serde_json::from_value(raw)?)
    }

    /// Patch an object; only what ends up in the written body changes server side
    pub async fn partial_update<W: Serialize + Sync>(
        &self,
        client: &dyn NetBoxClientTrait,
        id: u64,
        body: &W,
        writer: &dyn RequestWriter,
    ) -> Result<R, NetBoxError> {
        let body = writer.write(serde_json::to_vec(body)?)?;
        debug!("Updating object {} at {}", id, self.path);
        let updated = client.patch(&self.object_path(id), body).await?;
        Ok(serde_json::from_value(updated)?)
    }

    /// Delete an object by id
    pub async fn delete(&self, client: &dyn NetBoxClientTrait, id: u64) -> Result<(), NetBoxError> {
        debug!("Deleting object {} at {}", id, self.path);
        client.delete(&self.object_path(id)).await
    }

    /// List every object matching `filters`
    pub async fn list(
        &self,
        client: &dyn NetBoxClientTrait,
        filters: &[(&str, &str)],
    ) -> Result<Vec<R>, NetBoxError> {
        client
            .list(&self.collection_path(), filters)
            .await?
            .into_iter()
            .map(|raw| serde_json::from_value(raw).map_err(NetBoxError::from))
            .collect()
    }
}

// DCIM
pub const SITES: Endpoint<Site> = Endpoint::new("dcim/sites");
pub const RACKS: Endpoint<Rack> = Endpoint::new("dcim/racks");
pub const DEVICE_ROLES: Endpoint<DeviceRole> = Endpoint::new("dcim/device-roles");
pub const PLATFORMS: Endpoint<Platform> = Endpoint::new("dcim/platforms");

// Virtualization
pub const CLUSTERS: Endpoint<Cluster> = Endpoint::new("virtualization/clusters");
pub const VIRTUAL_MACHINES: Endpoint<VirtualMachine> = Endpoint::new("virtualization/virtual-machines");
pub const VM_INTERFACES: Endpoint<VMInterface> = Endpoint::new("virtualization/interfaces");

// Tenancy
pub const TENANTS: Endpoint<Tenant> = Endpoint::new("tenancy/tenants");

// Extras
pub const TAGS: Endpoint<Tag> = Endpoint::new("extras/tags");
