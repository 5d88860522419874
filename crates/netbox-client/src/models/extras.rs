//! Extras models

use serde::{Deserialize, Serialize};

/// Tag model (from Extras API)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Tag {
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
    pub description: String,
}
