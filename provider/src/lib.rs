//! NetBox provider core for Terraform
//!
//! Maps NetBox objects onto Terraform resources and data sources:
//!
//! - [`custom_fields`]: translates the `custom_field` set to and from the
//!   `custom_fields` object NetBox expects
//! - [`shaper`]: request writers that repair serialized bodies before they are
//!   sent, so partial updates can clear attributes
//! - [`resource`]: Create/Read/Update/Delete/Exists per object kind
//! - [`data_source`]: lookups by slug or name
//! - [`Provider`]: registry that dispatches by type name and reports
//!   [`Diagnostics`]

pub mod config;
pub mod convert;
pub mod custom_fields;
pub mod data;
pub mod data_source;
pub mod error;
pub mod logging;
pub mod provider;
pub mod resource;
pub mod shaper;

#[cfg(test)]
mod test_utils;

pub use config::{ProviderConfig, ProviderSettings};
pub use custom_fields::{
    api_to_config, config_to_api, config_to_api_strict, ApiCustomFields, CustomFieldEntry, CustomFieldError,
    CustomFieldMode, CustomFieldType, CustomFieldValue,
};
pub use data::ResourceData;
pub use error::{Diagnostic, Diagnostics, ProviderError, Severity};
pub use provider::Provider;
pub use resource::{ProviderMeta, Resource, ResourceKind};
pub use shaper::{DropOverwriteWriter, ModifiedFields, PartialUpdateWriter};
