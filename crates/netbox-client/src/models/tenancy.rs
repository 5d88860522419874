//! Tenancy models

use super::common::*;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Tenant model (from Tenancy API)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Tenant {
    pub id: u64,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub display: String,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub group: Option<NestedRef>,
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

/// Request body for creating or patching a tenant
#[derive(Debug, Clone, Default, Serialize)]
pub struct WritableTenant {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub slug: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<u64>,
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
