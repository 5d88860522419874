//! netbox_virtualization_vm

use crate::data::ResourceData;
use crate::error::ProviderError;
use crate::resource::{self, Changes, ProviderMeta, Resource, ResourceKind, TIMESTAMP_FIELDS};
use async_trait::async_trait;
use netbox_client::{WritableVirtualMachine, VIRTUAL_MACHINES};

pub const KIND: ResourceKind = ResourceKind {
    type_name: "netbox_virtualization_vm",
    required_fields: TIMESTAMP_FIELDS,
};

pub struct VirtualMachineResource;

fn writable(changes: &mut Changes<'_>) -> Result<WritableVirtualMachine, ProviderError> {
    let data = changes.data();
    Ok(WritableVirtualMachine {
        name: changes.required_string("name", "name")?,
        status: changes.string("status", "status"),
        cluster: changes.id("cluster_id", "cluster"),
        site: changes.id("site_id", "site"),
        role: changes.id("role_id", "role"),
        tenant: changes.id("tenant_id", "tenant"),
        platform: changes.id("platform_id", "platform"),
        vcpus: changes.float("vcpus", "vcpus"),
        memory: changes.number("memory_size_mb", "memory"),
        disk: changes.number("disk_size_gb", "disk"),
        description: changes.string("description", "description"),
        comments: changes.string("comments", "comments"),
        tags: changes.tags()?,
        custom_fields: changes.custom_fields()?,
        ..Default::default()
    })
}

#[async_trait]
impl Resource for VirtualMachineResource {
    fn kind(&self) -> ResourceKind {
        KIND
    }

    async fn create(&self, meta: ProviderMeta<'_>, data: &mut ResourceData) -> Result<(), ProviderError> {
        let body = writable(&mut Changes::create(data, meta.custom_fields))?;
        resource::create_object(KIND, VIRTUAL_MACHINES, meta, data, &body).await?;
        self.read(meta, data).await
    }

    async fn read(&self, meta: ProviderMeta<'_>, data: &mut ResourceData) -> Result<(), ProviderError> {
        let Some(vm) = resource::read_object(KIND, VIRTUAL_MACHINES, meta, data).await? else {
            return Ok(());
        };
        data.set("name", vm.name);
        data.set("status", vm.status.map(|s| s.value).unwrap_or_default());
        data.set("cluster_id", vm.cluster.map(|c| c.id).unwrap_or_default());
        data.set("site_id", vm.site.map(|s| s.id).unwrap_or_default());
        data.set("role_id", vm.role.map(|r| r.id).unwrap_or_default());
        data.set("tenant_id", vm.tenant.map(|t| t.id).unwrap_or_default());
        data.set("platform_id", vm.platform.map(|p| p.id).unwrap_or_default());
        data.set("vcpus", vm.vcpus);
        data.set("memory_size_mb", vm.memory.unwrap_or_default());
        data.set("disk_size_gb", vm.disk.unwrap_or_default());
        data.set("description", vm.description);
        data.set("comments", vm.comments);
        Ok(())
    }

    async fn update(&self, meta: ProviderMeta<'_>, data: &mut ResourceData) -> Result<(), ProviderError> {
        let mut changes = Changes::update(data, meta.custom_fields);
        let body = writable(&mut changes)?;
        resource::update_object(KIND, VIRTUAL_MACHINES, meta, data, changes, &body).await?;
        self.read(meta, data).await
    }

    async fn delete(&self, meta: ProviderMeta<'_>, data: &mut ResourceData) -> Result<(), ProviderError> {
        resource::delete_object(KIND, VIRTUAL_MACHINES, meta, data).await
    }

    async fn exists(&self, meta: ProviderMeta<'_>, data: &ResourceData) -> Result<bool, ProviderError> {
        resource::object_exists(VIRTUAL_MACHINES, meta, data).await
    }
}
