//! netbox_dcim_rack

use crate::data::ResourceData;
use crate::error::ProviderError;
use crate::resource::{self, Changes, ProviderMeta, Resource, ResourceKind, TIMESTAMP_FIELDS};
use async_trait::async_trait;
use netbox_client::{WritableRack, RACKS};

pub const KIND: ResourceKind = ResourceKind {
    type_name: "netbox_dcim_rack",
    required_fields: TIMESTAMP_FIELDS,
};

pub struct RackResource;

fn writable(changes: &mut Changes<'_>) -> Result<WritableRack, ProviderError> {
    let data = changes.data();
    Ok(WritableRack {
        name: changes.required_string("name", "name")?,
        site: data.require_u64("site_id")?,
        location: changes.id("location_id", "location"),
        tenant: changes.id("tenant_id", "tenant"),
        status: changes.string("status", "status"),
        role: changes.id("role_id", "role"),
        facility_id: changes.optional_string("facility_id", "facility_id").unwrap_or_default(),
        serial: changes.string("serial", "serial"),
        asset_tag: changes.optional_string("asset_tag", "asset_tag").unwrap_or_default(),
        u_height: changes.number("height", "u_height").unwrap_or_default(),
        desc_units: changes.boolean("desc_units", "desc_units"),
        description: changes.string("description", "description"),
        comments: changes.string("comments", "comments"),
        tags: changes.tags()?,
        custom_fields: changes.custom_fields()?,
        ..Default::default()
    })
}

#[async_trait]
impl Resource for RackResource {
    fn kind(&self) -> ResourceKind {
        KIND
    }

    async fn create(&self, meta: ProviderMeta<'_>, data: &mut ResourceData) -> Result<(), ProviderError> {
        let body = writable(&mut Changes::create(data, meta.custom_fields))?;
        resource::create_object(KIND, RACKS, meta, data, &body).await?;
        self.read(meta, data).await
    }

    async fn read(&self, meta: ProviderMeta<'_>, data: &mut ResourceData) -> Result<(), ProviderError> {
        let Some(rack) = resource::read_object(KIND, RACKS, meta, data).await? else {
            return Ok(());
        };
        data.set("name", rack.name);
        data.set("site_id", rack.site.id);
        data.set("location_id", rack.location.map(|l| l.id).unwrap_or_default());
        data.set("tenant_id", rack.tenant.map(|t| t.id).unwrap_or_default());
        data.set("status", rack.status.map(|s| s.value).unwrap_or_default());
        data.set("role_id", rack.role.map(|r| r.id).unwrap_or_default());
        data.set("facility_id", rack.facility_id.unwrap_or_default());
        data.set("serial", rack.serial);
        data.set("asset_tag", rack.asset_tag.unwrap_or_default());
        data.set("height", rack.u_height);
        data.set("desc_units", rack.desc_units);
        data.set("description", rack.description);
        data.set("comments", rack.comments);
        Ok(())
    }

    async fn update(&self, meta: ProviderMeta<'_>, data: &mut ResourceData) -> Result<(), ProviderError> {
        let mut changes = Changes::update(data, meta.custom_fields);
        let body = writable(&mut changes)?;
        resource::update_object(KIND, RACKS, meta, data, changes, &body).await?;
        self.read(meta, data).await
    }

    async fn delete(&self, meta: ProviderMeta<'_>, data: &mut ResourceData) -> Result<(), ProviderError> {
        resource::delete_object(KIND, RACKS, meta, data).await
    }

    async fn exists(&self, meta: ProviderMeta<'_>, data: &ResourceData) -> Result<bool, ProviderError> {
        resource::object_exists(RACKS, meta, data).await
    }
}
