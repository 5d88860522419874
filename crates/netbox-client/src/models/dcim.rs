//! DCIM models: sites, racks, device roles and platforms

use super::common::*;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Site model (from DCIM API)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Site {
    pub id: u64,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub display: String,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub status: Option<ChoiceValue>,
    #[serde(default)]
    pub region: Option<NestedRef>,
    #[serde(default)]
    pub group: Option<NestedRef>,
    #[serde(default)]
    pub tenant: Option<NestedTenant>,
    #[serde(default)]
    pub facility: String,
    #[serde(default)]
    pub time_zone: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub physical_address: String,
    #[serde(default)]
    pub shipping_address: String,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub comments: String,
    #[serde(default)]
    pub tags: Vec<NestedTag>,
    #[serde(default)]
    pub custom_fields: Map<String, Value>,
    #[serde(default)]
    pub created: Timestamp,
    #[serde(default)]
    pub last_updated: Timestamp,
}

/// Request body for creating or patching a site
#[derive(Debug, Clone, Default, Serialize)]
pub struct WritableSite {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub slug: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tenant: Option<u64>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub facility: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub time_zone: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub physical_address: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub shipping_address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub comments: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<NestedTag>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_fields: Option<Map<String, Value>>,
    pub created: Timestamp,
    pub last_updated: Timestamp,
}

/// Rack model (from DCIM API)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Rack {
    pub id: u64,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub display: String,
    pub name: String,
    pub site: NestedSite,
    #[serde(default)]
    pub location: Option<NestedRef>,
    #[serde(default)]
    pub tenant: Option<NestedTenant>,
    #[serde(default)]
    pub status: Option<ChoiceValue>,
    #[serde(default)]
    pub role: Option<NestedRef>,
    #[serde(default)]
    pub facility_id: Option<String>,
    #[serde(default)]
    pub serial: String,
    #[serde(default)]
    pub asset_tag: Option<String>,
    #[serde(default)]
    pub u_height: u64,
    #[serde(default)]
    pub desc_units: bool,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub comments: String,
    #[serde(default)]
    pub tags: Vec<NestedTag>,
    #[serde(default)]
    pub custom_fields: Map<String, Value>,
    #[serde(default)]
    pub created: Timestamp,
    #[serde(default)]
    pub last_updated: Timestamp,
}

/// Request body for creating or patching a rack
#[derive(Debug, Clone, Default, Serialize)]
pub struct WritableRack {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    pub site: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tenant: Option<u64>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<u64>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub facility_id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub serial: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub asset_tag: String,
    #[serde(skip_serializing_if = "is_zero")]
    pub u_height: u64,
    #[serde(skip_serializing_if = "is_false")]
    pub desc_units: bool,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub comments: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<NestedTag>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_fields: Option<Map<String, Value>>,
    pub created: Timestamp,
    pub last_updated: Timestamp,
}

/// Device role model (from DCIM API)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeviceRole {
    pub id: u64,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub display: String,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub vm_role: bool,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: Vec<NestedTag>,
    #[serde(default)]
    pub custom_fields: Map<String, Value>,
    #[serde(default)]
    pub created: Timestamp,
    #[serde(default)]
    pub last_updated: Timestamp,
}

/// Request body for creating or patching a device role
#[derive(Debug, Clone, Default, Serialize)]
pub struct WritableDeviceRole {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub slug: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub color: String,
    #[serde(skip_serializing_if = "is_false")]
    pub vm_role: bool,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<NestedTag>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_fields: Option<Map<String, Value>>,
    pub created: Timestamp,
    pub last_updated: Timestamp,
}

/// Platform model (from DCIM API)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Platform {
    pub id: u64,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub display: String,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub manufacturer: Option<NestedRef>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: Vec<NestedTag>,
    #[serde(default)]
    pub custom_fields: Map<String, Value>,
    #[serde(default)]
    pub created: Timestamp,
    #[serde(default)]
    pub last_updated: Timestamp,
}

/// Request body for creating or patching a platform
#[derive(Debug, Clone, Default, Serialize)]
pub struct WritablePlatform {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub slug: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manufacturer: Option<u64>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<NestedTag>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_fields: Option<Map<String, Value>>,
    pub created: Timestamp,
    pub last_updated: Timestamp,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn writable_site_omits_empty_values_but_keeps_timestamps() {
        let site = WritableSite {
            name: "FRA1".into(),
            slug: "fra1".into(),
            tags: Some(Vec::new()),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&site).unwrap(),
            json!({
                "name": "FRA1",
                "slug": "fra1",
                "tags": [],
                "created": ZERO_TIMESTAMP,
                "last_updated": ZERO_TIMESTAMP,
            })
        );
    }

    #[test]
    fn writable_rack_skips_false_and_zero() {
        let rack = WritableRack {
            name: "R1".into(),
            site: 4,
            ..Default::default()
        };
        let value = serde_json::to_value(&rack).unwrap();
        assert!(value.get("desc_units").is_none());
        assert!(value.get("u_height").is_none());
        assert!(value.get("tags").is_none());
        assert_eq!(value["site"], json!(4));
    }

    #[test]
    fn site_reads_sparse_payload() {
        let site: Site = serde_json::from_value(json!({
            "id": 1,
            "name": "FRA1",
            "slug": "fra1",
            "status": {"value": "active", "label": "Active"},
            "tenant": null,
            "custom_fields": {"owner": "ops"},
            "created": "2024-01-02T03:04:05.123456Z"
        }))
        .unwrap();
        assert_eq!(site.status.unwrap().value, "active");
        assert!(site.tenant.is_none());
        assert_eq!(site.custom_fields["owner"], json!("ops"));
        assert!(!site.created.is_zero());
        assert!(site.last_updated.is_zero());
    }
}
