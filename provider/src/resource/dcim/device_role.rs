//! netbox_dcim_device_role

use crate::data::ResourceData;
use crate::error::ProviderError;
use crate::resource::{self, Changes, ProviderMeta, Resource, ResourceKind, TIMESTAMP_FIELDS};
use async_trait::async_trait;
use netbox_client::{WritableDeviceRole, DEVICE_ROLES};

pub const KIND: ResourceKind = ResourceKind {
    type_name: "netbox_dcim_device_role",
    required_fields: TIMESTAMP_FIELDS,
};

/// Color NetBox assigns when none is given
pub const DEFAULT_COLOR: &str = "9e9e9e";

pub struct DeviceRoleResource;

fn writable(changes: &mut Changes<'_>) -> Result<WritableDeviceRole, ProviderError> {
    let data = changes.data();
    let color = match data.get_str("color_hex") {
        "" => DEFAULT_COLOR.to_string(),
        color => color.trim_start_matches('#').to_lowercase(),
    };
    if data.has_change("color_hex") {
        changes.record("color", color.clone());
    }
    Ok(WritableDeviceRole {
        name: changes.required_string("name", "name")?,
        slug: changes.required_string("slug", "slug")?,
        color: if changes.includes("color_hex") { color } else { String::new() },
        vm_role: changes.boolean("vm_role", "vm_role"),
        description: changes.string("description", "description"),
        tags: changes.tags()?,
        custom_fields: changes.custom_fields()?,
        ..Default::default()
    })
}

#[async_trait]
impl Resource for DeviceRoleResource {
    fn kind(&self) -> ResourceKind {
        KIND
    }

    async fn create(&self, meta: ProviderMeta<'_>, data: &mut ResourceData) -> Result<(), ProviderError> {
        let body = writable(&mut Changes::create(data, meta.custom_fields))?;
        resource::create_object(KIND, DEVICE_ROLES, meta, data, &body).await?;
        self.read(meta, data).await
    }

    async fn read(&self, meta: ProviderMeta<'_>, data: &mut ResourceData) -> Result<(), ProviderError> {
        let Some(role) = resource::read_object(KIND, DEVICE_ROLES, meta, data).await? else {
            return Ok(());
        };
        data.set("name", role.name);
        data.set("slug", role.slug);
        data.set("color_hex", role.color);
        data.set("vm_role", role.vm_role);
        data.set("description", role.description);
        Ok(())
    }

    async fn update(&self, meta: ProviderMeta<'_>, data: &mut ResourceData) -> Result<(), ProviderError> {
        let mut changes = Changes::update(data, meta.custom_fields);
        let body = writable(&mut changes)?;
        resource::update_object(KIND, DEVICE_ROLES, meta, data, changes, &body).await?;
        self.read(meta, data).await
    }

    async fn delete(&self, meta: ProviderMeta<'_>, data: &mut ResourceData) -> Result<(), ProviderError> {
        resource::delete_object(KIND, DEVICE_ROLES, meta, data).await
    }

    async fn exists(&self, meta: ProviderMeta<'_>, data: &ResourceData) -> Result<bool, ProviderError> {
        resource::object_exists(DEVICE_ROLES, meta, data).await
    }
}
