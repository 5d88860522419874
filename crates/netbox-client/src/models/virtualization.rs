//! Virtualization models: clusters, virtual machines and their interfaces

use super::common::*;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Cluster model (from Virtualization API)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Cluster {
    pub id: u64,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub display: String,
    pub name: String,
    #[serde(rename = "type")]
    pub cluster_type: NestedRef,
    #[serde(default)]
    pub group: Option<NestedRef>,
    #[serde(default)]
    pub site: Option<NestedSite>,
    #[serde(default)]
    pub tenant: Option<NestedTenant>,
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

/// Request body for creating or patching a cluster
#[derive(Debug, Clone, Default, Serialize)]
pub struct WritableCluster {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(rename = "type")]
    pub cluster_type: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tenant: Option<u64>,
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

/// Virtual machine model (from Virtualization API)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VirtualMachine {
    pub id: u64,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub display: String,
    pub name: String,
    #[serde(default)]
    pub status: Option<ChoiceValue>,
    #[serde(default)]
    pub cluster: Option<NestedCluster>,
    #[serde(default)]
    pub site: Option<NestedSite>,
    #[serde(default)]
    pub role: Option<NestedDeviceRole>,
    #[serde(default)]
    pub tenant: Option<NestedTenant>,
    #[serde(default)]
    pub platform: Option<NestedPlatform>,
    #[serde(default)]
    pub vcpus: Option<f64>,
    #[serde(default)]
    pub memory: Option<u64>,
    #[serde(default)]
    pub disk: Option<u64>,
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

/// Request body for creating or patching a virtual machine
#[derive(Debug, Clone, Default, Serialize)]
pub struct WritableVirtualMachine {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cluster: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tenant: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vcpus: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memory: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disk: Option<u64>,
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

/// Virtual machine interface model (from Virtualization API)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VMInterface {
    pub id: u64,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub display: String,
    pub virtual_machine: NestedVirtualMachine,
    pub name: String,
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub mtu: Option<u64>,
    #[serde(default)]
    pub mac_address: Option<String>,
    #[serde(default)]
    pub mode: Option<ChoiceValue>,
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

/// Request body for creating or patching a virtual machine interface
#[derive(Debug, Clone, Default, Serialize)]
pub struct WritableVMInterface {
    pub virtual_machine: u64,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(skip_serializing_if = "is_false")]
    pub enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mtu: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mac_address: Option<String>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub mode: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<NestedTag>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_fields: Option<Map<String, Value>>,
    pub created: Timestamp,
    pub last_updated: Timestamp,
}
