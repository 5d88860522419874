//! netbox_virtualization_cluster

use crate::data::ResourceData;
use crate::error::ProviderError;
use crate::resource::{self, Changes, ProviderMeta, Resource, ResourceKind, TIMESTAMP_FIELDS};
use async_trait::async_trait;
use netbox_client::{WritableCluster, CLUSTERS};

pub const KIND: ResourceKind = ResourceKind {
    type_name: "netbox_virtualization_cluster",
    required_fields: TIMESTAMP_FIELDS,
};

pub struct ClusterResource;

fn writable(changes: &mut Changes<'_>) -> Result<WritableCluster, ProviderError> {
    let data = changes.data();
    Ok(WritableCluster {
        name: changes.required_string("name", "name")?,
        cluster_type: data.require_u64("type_id")?,
        group: changes.id("group_id", "group"),
        site: changes.id("site_id", "site"),
        tenant: changes.id("tenant_id", "tenant"),
        description: changes.string("description", "description"),
        comments: changes.string("comments", "comments"),
        tags: changes.tags()?,
        custom_fields: changes.custom_fields()?,
        ..Default::default()
    })
}

#[async_trait]
impl Resource for ClusterResource {
    fn kind(&self) -> ResourceKind {
        KIND
    }

    async fn create(&self, meta: ProviderMeta<'_>, data: &mut ResourceData) -> Result<(), ProviderError> {
        let body = writable(&mut Changes::create(data, meta.custom_fields))?;
        resource::create_object(KIND, CLUSTERS, meta, data, &body).await?;
        self.read(meta, data).await
    }

    async fn read(&self, meta: ProviderMeta<'_>, data: &mut ResourceData) -> Result<(), ProviderError> {
        let Some(cluster) = resource::read_object(KIND, CLUSTERS, meta, data).await? else {
            return Ok(());
        };
        data.set("name", cluster.name);
        data.set("type_id", cluster.cluster_type.id);
        data.set("group_id", cluster.group.map(|g| g.id).unwrap_or_default());
        data.set("site_id", cluster.site.map(|s| s.id).unwrap_or_default());
        data.set("tenant_id", cluster.tenant.map(|t| t.id).unwrap_or_default());
        data.set("description", cluster.description);
        data.set("comments", cluster.comments);
        Ok(())
    }

    async fn update(&self, meta: ProviderMeta<'_>, data: &mut ResourceData) -> Result<(), ProviderError> {
        let mut changes = Changes::update(data, meta.custom_fields);
        let body = writable(&mut changes)?;
        resource::update_object(KIND, CLUSTERS, meta, data, changes, &body).await?;
        self.read(meta, data).await
    }

    async fn delete(&self, meta: ProviderMeta<'_>, data: &mut ResourceData) -> Result<(), ProviderError> {
        resource::delete_object(KIND, CLUSTERS, meta, data).await
    }

    async fn exists(&self, meta: ProviderMeta<'_>, data: &ResourceData) -> Result<bool, ProviderError> {
        resource::object_exists(CLUSTERS, meta, data).await
    }
}
