//! netbox_dcim_site

use crate::data::ResourceData;
use crate::error::ProviderError;
use crate::resource::{self, Changes, ProviderMeta, Resource, ResourceKind, TIMESTAMP_FIELDS};
use async_trait::async_trait;
use netbox_client::{WritableSite, SITES};

pub const KIND: ResourceKind = ResourceKind {
    type_name: "netbox_dcim_site",
    required_fields: TIMESTAMP_FIELDS,
};

pub struct SiteResource;

fn writable(changes: &mut Changes<'_>) -> Result<WritableSite, ProviderError> {
    let data = changes.data();
    Ok(WritableSite {
        name: changes.required_string("name", "name")?,
        slug: changes.required_string("slug", "slug")?,
        status: changes.string("status", "status"),
        region: changes.id("region_id", "region"),
        group: changes.id("group_id", "group"),
        tenant: changes.id("tenant_id", "tenant"),
        facility: changes.string("facility", "facility"),
        time_zone: changes.string("time_zone", "time_zone"),
        description: changes.string("description", "description"),
        physical_address: changes.string("physical_address", "physical_address"),
        shipping_address: changes.string("shipping_address", "shipping_address"),
        latitude: changes.float("latitude", "latitude"),
        longitude: changes.float("longitude", "longitude"),
        comments: changes.string("comments", "comments"),
        tags: changes.tags()?,
        custom_fields: changes.custom_fields()?,
        ..Default::default()
    })
}

#[async_trait]
impl Resource for SiteResource {
    fn kind(&self) -> ResourceKind {
        KIND
    }

    async fn create(&self, meta: ProviderMeta<'_>, data: &mut ResourceData) -> Result<(), ProviderError> {
        let body = writable(&mut Changes::create(data, meta.custom_fields))?;
        resource::create_object(KIND, SITES, meta, data, &body).await?;
        self.read(meta, data).await
    }

    async fn read(&self, meta: ProviderMeta<'_>, data: &mut ResourceData) -> Result<(), ProviderError> {
        let Some(site) = resource::read_object(KIND, SITES, meta, data).await? else {
            return Ok(());
        };
        data.set("name", site.name);
        data.set("slug", site.slug);
        data.set("status", site.status.map(|s| s.value).unwrap_or_default());
        data.set("region_id", site.region.map(|r| r.id).unwrap_or_default());
        data.set("group_id", site.group.map(|g| g.id).unwrap_or_default());
        data.set("tenant_id", site.tenant.map(|t| t.id).unwrap_or_default());
        data.set("facility", site.facility);
        data.set("time_zone", site.time_zone.unwrap_or_default());
        data.set("description", site.description);
        data.set("physical_address", site.physical_address);
        data.set("shipping_address", site.shipping_address);
        data.set("latitude", site.latitude);
        data.set("longitude", site.longitude);
        data.set("comments", site.comments);
        Ok(())
    }

    async fn update(&self, meta: ProviderMeta<'_>, data: &mut ResourceData) -> Result<(), ProviderError> {
        let mut changes = Changes::update(data, meta.custom_fields);
        let body = writable(&mut changes)?;
        resource::update_object(KIND, SITES, meta, data, changes, &body).await?;
        self.read(meta, data).await
    }

    async fn delete(&self, meta: ProviderMeta<'_>, data: &mut ResourceData) -> Result<(), ProviderError> {
        resource::delete_object(KIND, SITES, meta, data).await
    }

    async fn exists(&self, meta: ProviderMeta<'_>, data: &ResourceData) -> Result<bool, ProviderError> {
        resource::object_exists(SITES, meta, data).await
    }
}
