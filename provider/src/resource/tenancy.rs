//! Tenancy resources
//!
//! Handles: Tenant

use crate::data::ResourceData;
use crate::error::ProviderError;
use crate::resource::{self, Changes, ProviderMeta, Resource, ResourceKind, TIMESTAMP_FIELDS};
use async_trait::async_trait;
use netbox_client::{WritableTenant, TENANTS};

pub const KIND: ResourceKind = ResourceKind {
    type_name: "netbox_tenancy_tenant",
    required_fields: TIMESTAMP_FIELDS,
};

pub struct TenantResource;

fn writable(changes: &mut Changes<'_>) -> Result<WritableTenant, ProviderError> {
    let data = changes.data();
    Ok(WritableTenant {
        name: changes.required_string("name", "name")?,
        slug: changes.required_string("slug", "slug")?,
        group: changes.id("tenant_group_id", "group"),
        description: changes.string("description", "description"),
        comments: changes.string("comments", "comments"),
        tags: changes.tags()?,
        custom_fields: changes.custom_fields()?,
        ..Default::default()
    })
}

#[async_trait]
impl Resource for TenantResource {
    fn kind(&self) -> ResourceKind {
        KIND
    }

    async fn create(&self, meta: ProviderMeta<'_>, data: &mut ResourceData) -> Result<(), ProviderError> {
        let body = writable(&mut Changes::create(data, meta.custom_fields))?;
        resource::create_object(KIND, TENANTS, meta, data, &body).await?;
        self.read(meta, data).await
    }

    async fn read(&self, meta: ProviderMeta<'_>, data: &mut ResourceData) -> Result<(), ProviderError> {
        let Some(tenant) = resource::read_object(KIND, TENANTS, meta, data).await? else {
            return Ok(());
        };
        data.set("name", tenant.name);
        data.set("slug", tenant.slug);
        data.set("tenant_group_id", tenant.group.map(|g| g.id).unwrap_or_default());
        data.set("description", tenant.description);
        data.set("comments", tenant.comments);
        Ok(())
    }

    async fn update(&self, meta: ProviderMeta<'_>, data: &mut ResourceData) -> Result<(), ProviderError> {
        let mut changes = Changes::update(data, meta.custom_fields);
        let body = writable(&mut changes)?;
        resource::update_object(KIND, TENANTS, meta, data, changes, &body).await?;
        self.read(meta, data).await
    }

    async fn delete(&self, meta: ProviderMeta<'_>, data: &mut ResourceData) -> Result<(), ProviderError> {
        resource::delete_object(KIND, TENANTS, meta, data).await
    }

    async fn exists(&self, meta: ProviderMeta<'_>, data: &ResourceData) -> Result<bool, ProviderError> {
        resource::object_exists(TENANTS, meta, data).await
    }
}
