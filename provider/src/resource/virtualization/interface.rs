//! netbox_virtualization_interface

use crate::data::ResourceData;
use crate::error::ProviderError;
use crate::resource::{self, Changes, ProviderMeta, Resource, ResourceKind, TIMESTAMP_FIELDS};
use async_trait::async_trait;
use netbox_client::{WritableVMInterface, VM_INTERFACES};

pub const KIND: ResourceKind = ResourceKind {
    type_name: "netbox_virtualization_interface",
    required_fields: TIMESTAMP_FIELDS,
};

/// 802.1Q modes NetBox accepts
const MODES: &[&str] = &["access", "tagged", "tagged-all"];

pub struct InterfaceResource;

fn writable(changes: &mut Changes<'_>) -> Result<WritableVMInterface, ProviderError> {
    let data = changes.data();
    let mode = data.get_str("mode");
    if !mode.is_empty() && !MODES.contains(&mode) {
        return Err(ProviderError::invalid_attribute(
            "mode",
            format!("{:?} is not one of {}", mode, MODES.join(", ")),
        ));
    }
    Ok(WritableVMInterface {
        virtual_machine: data.require_u64("virtualmachine_id")?,
        name: changes.required_string("name", "name")?,
        enabled: changes.boolean("enabled", "enabled"),
        mtu: changes.number("mtu", "mtu"),
        mac_address: changes.optional_string("mac_address", "mac_address"),
        mode: changes.string("mode", "mode"),
        description: changes.string("description", "description"),
        tags: changes.tags()?,
        custom_fields: changes.custom_fields()?,
        ..Default::default()
    })
}

#[async_trait]
impl Resource for InterfaceResource {
    fn kind(&self) -> ResourceKind {
        KIND
    }

    async fn create(&self, meta: ProviderMeta<'_>, data: &mut ResourceData) -> Result<(), ProviderError> {
        let body = writable(&mut Changes::create(data, meta.custom_fields))?;
        resource::create_object(KIND, VM_INTERFACES, meta, data, &body).await?;
        self.read(meta, data).await
    }

    async fn read(&self, meta: ProviderMeta<'_>, data: &mut ResourceData) -> Result<(), ProviderError> {
        let Some(interface) = resource::read_object(KIND, VM_INTERFACES, meta, data).await? else {
            return Ok(());
        };
        data.set("virtualmachine_id", interface.virtual_machine.id);
        data.set("name", interface.name);
        data.set("enabled", interface.enabled);
        data.set("mtu", interface.mtu.unwrap_or_default());
        data.set("mac_address", interface.mac_address.unwrap_or_default());
        data.set("mode", interface.mode.map(|m| m.value).unwrap_or_default());
        data.set("description", interface.description);
        Ok(())
    }

    async fn update(&self, meta: ProviderMeta<'_>, data: &mut ResourceData) -> Result<(), ProviderError> {
        let mut changes = Changes::update(data, meta.custom_fields);
        let body = writable(&mut changes)?;
        resource::update_object(KIND, VM_INTERFACES, meta, data, changes, &body).await?;
        self.read(meta, data).await
    }

    async fn delete(&self, meta: ProviderMeta<'_>, data: &mut ResourceData) -> Result<(), ProviderError> {
        resource::delete_object(KIND, VM_INTERFACES, meta, data).await
    }

    async fn exists(&self, meta: ProviderMeta<'_>, data: &ResourceData) -> Result<bool, ProviderError> {
        resource::object_exists(VM_INTERFACES, meta, data).await
    }
}
