//! Provider error types and the diagnostics they surface as.
//!
//! Resource operations return [`ProviderError`]; the [`Provider`](crate::Provider)
//! turns those into [`Diagnostics`] for the caller.

use crate::custom_fields::CustomFieldError;
use netbox_client::NetBoxError;
use std::fmt;
use thiserror::Error;

/// Errors that can occur in the provider
#[derive(Debug, Error)]
pub enum ProviderError {
    /// NetBox API error
    #[error("NetBox error: {0}")]
    NetBox(#[from] NetBoxError),

    /// Custom field value rejected by the strict codec
    #[error("{0}")]
    CustomField(#[from] CustomFieldError),

    /// Invalid provider configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A required attribute is missing from configuration
    #[error("Missing required attribute: {0}")]
    MissingAttribute(String),

    /// An attribute holds a value of the wrong shape
    #[error("Invalid value for attribute {attribute}: {message}")]
    InvalidAttribute { attribute: String, message: String },

    /// State carries an id that is not a NetBox object id
    #[error("Invalid resource id {0:?}")]
    InvalidId(String),

    /// No resource or data source registered under this type name
    #[error("Unknown type: {0}")]
    UnknownType(String),

    /// A data source lookup matched zero or several objects
    #[error("Lookup failed: {0}")]
    Lookup(String),
}

impl ProviderError {
    pub(crate) fn invalid_attribute(attribute: &str, message: impl Into<String>) -> Self {
        Self::InvalidAttribute {
            attribute: attribute.to_string(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

/// A message reported back to Terraform
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub summary: String,
    pub detail: String,
}

impl Diagnostic {
    pub fn error(summary: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            summary: summary.into(),
            detail: detail.into(),
        }
    }

    pub fn warning(summary: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            summary: summary.into(),
            detail: detail.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level = match self.severity {
            Severity::Error => "Error",
            Severity::Warning => "Warning",
        };
        if self.detail.is_empty() {
            write!(f, "{}: {}", level, self.summary)
        } else {
            write!(f, "{}: {}: {}", level, self.summary, self.detail)
        }
    }
}

/// Diagnostics collected by one provider call
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics(Vec<Diagnostic>);

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.0.push(diagnostic);
    }

    /// Move every diagnostic of `other` into this collection
    pub fn append(&mut self, mut other: Diagnostics) {
        self.0.append(&mut other.0);
    }

    pub fn has_errors(&self) -> bool {
        self.0.iter().any(|d| d.severity == Severity::Error)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.0.iter()
    }

    /// Diagnostics for an operation that failed with `err`
    pub fn from_error(summary: &str, err: &ProviderError) -> Self {
        Self(vec![Diagnostic::error(summary, err.to_string())])
    }
}
