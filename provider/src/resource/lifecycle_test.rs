//! Unit tests for the shared resource lifecycle

#[cfg(test)]
mod tests {
    use crate::custom_fields::{CustomFieldError, CustomFieldMode};
    use crate::error::ProviderError;
    use crate::resource::dcim::{device_role::DeviceRoleResource, rack::RackResource, site::SiteResource};
    use crate::resource::tenancy::TenantResource;
    use crate::resource::virtualization::interface::InterfaceResource;
    use crate::resource::{all, Resource};
    use crate::test_utils::*;
    use serde_json::{json, Value};

    #[tokio::test]
    async fn read_clears_id_when_deleted_out_of_band() {
        let mock = mock_client();
        let mut data = new_resource(json!({"name": "Acme", "slug": "acme"}));
        TenantResource.create(meta(&mock), &mut data).await.unwrap();
        let id: u64 = data.id().parse().unwrap();

        mock.remove_object("tenancy/tenants", id);
        TenantResource.read(meta(&mock), &mut data).await.unwrap();

        assert_eq!(data.id(), "");
    }

    #[tokio::test]
    async fn read_propagates_other_errors() {
        let mock = mock_client();
        let tenant = add_test_tenant(&mock, "acme");
        let mut data = crate::data::ResourceData::from_state(tenant.to_string(), Default::default());
        mock.fail_next("upstream unavailable");

        let err = TenantResource.read(meta(&mock), &mut data).await.unwrap_err();

        assert!(matches!(err, ProviderError::NetBox(_)));
        assert_eq!(data.id(), tenant.to_string());
    }

    #[tokio::test]
    async fn exists_reports_presence() {
        let mock = mock_client();
        let mut data = new_resource(json!({"name": "FRA1", "slug": "fra1"}));
        SiteResource.create(meta(&mock), &mut data).await.unwrap();
        assert!(SiteResource.exists(meta(&mock), &data).await.unwrap());

        let id: u64 = data.id().parse().unwrap();
        mock.remove_object("dcim/sites", id);
        assert!(!SiteResource.exists(meta(&mock), &data).await.unwrap());

        mock.fail_next("timeout");
        assert!(SiteResource.exists(meta(&mock), &data).await.is_err());
    }

    #[tokio::test]
    async fn delete_removes_object_and_propagates_errors() {
        let mock = mock_client();
        let mut data = new_resource(json!({"name": "FRA1", "slug": "fra1"}));
        SiteResource.create(meta(&mock), &mut data).await.unwrap();
        let id: u64 = data.id().parse().unwrap();

        mock.fail_next("protected");
        assert!(SiteResource.delete(meta(&mock), &mut data).await.is_err());
        assert_eq!(data.id(), id.to_string());

        SiteResource.delete(meta(&mock), &mut data).await.unwrap();
        assert!(mock.object("dcim/sites", id).is_none());
        assert_eq!(data.id(), "");
    }

    #[tokio::test]
    async fn missing_required_attribute_sends_nothing() {
        let mock = mock_client();
        let mut data = new_resource(json!({"name": "R1"}));
        let err = RackResource.create(meta(&mock), &mut data).await.unwrap_err();
        assert!(matches!(err, ProviderError::MissingAttribute(ref attr) if attr == "site_id"));
        assert!(mock.requests().is_empty());
    }

    #[tokio::test]
    async fn rack_location_can_be_cleared() {
        let mock = mock_client();
        let mut data = new_resource(json!({
            "name": "R1",
            "site_id": 10,
            "location_id": 11,
            "height": 42,
            "asset_tag": "A-100"
        }));
        RackResource.create(meta(&mock), &mut data).await.unwrap();
        assert_eq!(data.get_u64("location_id"), 11);
        assert_eq!(data.get_u64("height"), 42);

        let mut data = plan_change(&data, |config| {
            config.insert("location_id".into(), Value::Null);
            config.insert("asset_tag".into(), json!(""));
        });
        RackResource.update(meta(&mock), &mut data).await.unwrap();

        let body = mock.last_body("PATCH").unwrap();
        assert_eq!(body["location"], Value::Null);
        assert_eq!(body["asset_tag"], Value::Null);
        assert_eq!(body["site"], json!(10));
        assert_eq!(data.get_u64("location_id"), 0);
        assert_eq!(data.get_str("asset_tag"), "");
    }

    #[tokio::test]
    async fn disabling_interface_sends_false() {
        let mock = mock_client();
        let mut data = new_resource(json!({
            "virtualmachine_id": 5,
            "name": "eth0",
            "enabled": true,
            "mtu": 9000,
            "mac_address": "00:11:22:33:44:55",
            "mode": "access"
        }));
        InterfaceResource.create(meta(&mock), &mut data).await.unwrap();
        assert!(data.get_bool("enabled"));
        assert_eq!(data.get_str("mode"), "access");

        let mut data = plan_change(&data, |config| {
            config.insert("enabled".into(), json!(false));
            config.insert("mtu".into(), json!(0));
            config.insert("mac_address".into(), json!(""));
            config.insert("mode".into(), json!(""));
        });
        InterfaceResource.update(meta(&mock), &mut data).await.unwrap();

        let body = mock.last_body("PATCH").unwrap();
        assert_eq!(body["enabled"], json!(false));
        assert_eq!(body["mtu"], Value::Null);
        assert_eq!(body["mac_address"], Value::Null);
        assert_eq!(body["mode"], json!(""));
        assert!(!data.get_bool("enabled"));
        assert_eq!(data.get_str("mode"), "");
        assert_eq!(data.get_str("content_type"), "virtualization.interface");
    }

    #[tokio::test]
    async fn interface_mode_is_validated() {
        let mock = mock_client();
        let mut data = new_resource(json!({"virtualmachine_id": 5, "name": "eth0", "mode": "trunk"}));
        let err = InterfaceResource.create(meta(&mock), &mut data).await.unwrap_err();
        assert!(matches!(err, ProviderError::InvalidAttribute { .. }));
    }

    #[tokio::test]
    async fn device_role_color_is_normalized() {
        let mock = mock_client();
        let mut data = new_resource(json!({"name": "Leaf", "slug": "leaf", "color_hex": "#00FF00"}));
        DeviceRoleResource.create(meta(&mock), &mut data).await.unwrap();
        assert_eq!(mock.last_body("POST").unwrap()["color"], json!("00ff00"));

        let mut data = plan_change(&data, |config| {
            config.remove("color_hex");
        });
        DeviceRoleResource.update(meta(&mock), &mut data).await.unwrap();
        assert_eq!(mock.last_body("PATCH").unwrap()["color"], json!("9e9e9e"));
        assert_eq!(data.get_str("color_hex"), "9e9e9e");
    }

    #[tokio::test]
    async fn tags_are_written_and_read_as_a_set() {
        let mock = mock_client();
        let mut data = new_resource(json!({
            "name": "Acme",
            "slug": "acme",
            "tag": [{"name": "B", "slug": "b"}, {"name": "A", "slug": "a"}]
        }));
        TenantResource.create(meta(&mock), &mut data).await.unwrap();

        assert_eq!(
            data.get("tag").cloned(),
            Some(json!([{"name": "A", "slug": "a"}, {"name": "B", "slug": "b"}]))
        );
        let stored = mock.object("tenancy/tenants", data.id().parse().unwrap()).unwrap();
        assert!(stored["tags"][0]["id"].is_u64());
    }

    #[tokio::test]
    async fn strict_custom_fields_fail_before_any_request() {
        let mock = mock_client();
        let strict = meta(&mock).with_custom_fields(CustomFieldMode::Strict);
        let mut data = new_resource(json!({
            "name": "Acme",
            "slug": "acme",
            "custom_field": [custom_field("rack_units", "integer", "two")]
        }));

        let err = TenantResource.create(strict, &mut data).await.unwrap_err();
        assert!(matches!(
            err,
            ProviderError::CustomField(CustomFieldError::InvalidInteger { ref name, .. }) if name == "rack_units"
        ));
        assert!(mock.requests().is_empty());

        TenantResource.create(meta(&mock), &mut data).await.unwrap();
        assert_eq!(mock.last_body("POST").unwrap()["custom_fields"], json!({"rack_units": 0}));

        let requests = mock.requests().len();
        let mut data = plan_change(&data, |config| {
            config.insert("custom_field".into(), json!([custom_field("rack_units", "integer", "4 ")]));
        });
        assert!(TenantResource.update(strict, &mut data).await.is_err());
        assert_eq!(mock.requests().len(), requests);
    }

    #[test]
    fn every_kind_strips_placeholder_timestamps() {
        for resource in all() {
            let kind = resource.kind();
            assert!(kind.type_name.starts_with("netbox_"));
            assert_eq!(kind.required_fields, &["created", "last_updated"]);
        }
    }
}
