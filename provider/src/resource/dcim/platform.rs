//! netbox_dcim_platform

use crate::data::ResourceData;
use crate::error::ProviderError;
use crate::resource::{self, Changes, ProviderMeta, Resource, ResourceKind, TIMESTAMP_FIELDS};
use async_trait::async_trait;
use netbox_client::{WritablePlatform, PLATFORMS};

pub const KIND: ResourceKind = ResourceKind {
    type_name: "netbox_dcim_platform",
    required_fields: TIMESTAMP_FIELDS,
};

pub struct PlatformResource;

fn writable(changes: &mut Changes<'_>) -> Result<WritablePlatform, ProviderError> {
    let data = changes.data();
    Ok(WritablePlatform {
        name: changes.required_string("name", "name")?,
        slug: changes.required_string("slug", "slug")?,
        manufacturer: changes.id("manufacturer_id", "manufacturer"),
        description: changes.string("description", "description"),
        tags: changes.tags()?,
        custom_fields: changes.custom_fields()?,
        ..Default::default()
    })
}

#[async_trait]
impl Resource for PlatformResource {
    fn kind(&self) -> ResourceKind {
        KIND
    }

    async fn create(&self, meta: ProviderMeta<'_>, data: &mut ResourceData) -> Result<(), ProviderError> {
        let body = writable(&mut Changes::create(data, meta.custom_fields))?;
        resource::create_object(KIND, PLATFORMS, meta, data, &body).await?;
        self.read(meta, data).await
    }

    async fn read(&self, meta: ProviderMeta<'_>, data: &mut ResourceData) -> Result<(), ProviderError> {
        let Some(platform) = resource::read_object(KIND, PLATFORMS, meta, data).await? else {
            return Ok(());
        };
        data.set("name", platform.name);
        data.set("slug", platform.slug);
        data.set("manufacturer_id", platform.manufacturer.map(|m| m.id).unwrap_or_default());
        data.set("description", platform.description);
        Ok(())
    }

    async fn update(&self, meta: ProviderMeta<'_>, data: &mut ResourceData) -> Result<(), ProviderError> {
        let mut changes = Changes::update(data, meta.custom_fields);
        let body = writable(&mut changes)?;
        resource::update_object(KIND, PLATFORMS, meta, data, changes, &body).await?;
        self.read(meta, data).await
    }

    async fn delete(&self, meta: ProviderMeta<'_>, data: &mut ResourceData) -> Result<(), ProviderError> {
        resource::delete_object(KIND, PLATFORMS, meta, data).await
    }

    async fn exists(&self, meta: ProviderMeta<'_>, data: &ResourceData) -> Result<bool, ProviderError> {
        resource::object_exists(PLATFORMS, meta, data).await
    }
}
