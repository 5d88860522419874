//! Provider configuration
//!
//! Every setting can be given explicitly in the provider block or fall back to
//! an environment variable:
//!
//! | Setting    | Variable          | Default          |
//! |------------|-------------------|------------------|
//! | `url`      | `NETBOX_URL`      | `127.0.0.1:8000` |
//! | `basepath` | `NETBOX_BASEPATH` | `/api`           |
//! | `token`    | `NETBOX_TOKEN`    | required         |
//! | `scheme`   | `NETBOX_SCHEME`   | `https`          |
//! | `insecure` | `NETBOX_INSECURE` | `false`          |
//! | `strict_custom_fields` | `NETBOX_STRICT_CUSTOM_FIELDS` | `false` |

use crate::custom_fields::CustomFieldMode;
use crate::error::ProviderError;
use netbox_client::{ClientOptions, NetBoxClient, DEFAULT_BASE_PATH};
use serde::Deserialize;
use std::env;
use tracing::info;

pub const DEFAULT_URL: &str = "127.0.0.1:8000";
pub const DEFAULT_SCHEME: &str = "https";

/// Values set in the provider block; unset values fall back to the environment
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProviderSettings {
    pub url: Option<String>,
    pub basepath: Option<String>,
    pub token: Option<String>,
    pub scheme: Option<String>,
    pub insecure: Option<bool>,
    /// Fail on custom field values that cannot be decoded instead of degrading them
    pub strict_custom_fields: Option<bool>,
}

/// Resolved connection settings
#[derive(Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    pub url: String,
    pub basepath: String,
    pub token: String,
    pub scheme: String,
    pub insecure: bool,
    pub strict_custom_fields: bool,
}

// Keep the token out of logs
impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("url", &self.url)
            .field("basepath", &self.basepath)
            .field("token", &"<redacted>")
            .field("scheme", &self.scheme)
            .field("insecure", &self.insecure)
            .field("strict_custom_fields", &self.strict_custom_fields)
            .finish()
    }
}

impl ProviderConfig {
    /// Resolve settings against the process environment
    pub fn from_env(settings: ProviderSettings) -> Result<Self, ProviderError> {
        Self::resolve(settings, |name| env::var(name).ok())
    }

    /// Resolve settings against an arbitrary variable lookup
    pub fn resolve<F>(settings: ProviderSettings, lookup: F) -> Result<Self, ProviderError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|value| !value.is_empty());

        let token = settings
            .token
            .filter(|token| !token.is_empty())
            .or_else(|| var("NETBOX_TOKEN"))
            .ok_or_else(|| {
                ProviderError::InvalidConfig("token must be set, or NETBOX_TOKEN exported".to_string())
            })?;

        let scheme = settings
            .scheme
            .or_else(|| var("NETBOX_SCHEME"))
            .unwrap_or_else(|| DEFAULT_SCHEME.to_string());
        if scheme != "http" && scheme != "https" {
            return Err(ProviderError::InvalidConfig(format!(
                "scheme must be http or https, got {:?}",
                scheme
            )));
        }

        let flag = |explicit: Option<bool>, name: &str| -> Result<bool, ProviderError> {
            match (explicit, var(name)) {
                (Some(value), _) => Ok(value),
                (None, Some(raw)) => parse_bool(&raw).ok_or_else(|| {
                    ProviderError::InvalidConfig(format!("{} must be a boolean, got {:?}", name, raw))
                }),
                (None, None) => Ok(false),
            }
        };
        let insecure = flag(settings.insecure, "NETBOX_INSECURE")?;
        let strict_custom_fields = flag(settings.strict_custom_fields, "NETBOX_STRICT_CUSTOM_FIELDS")?;

        Ok(Self {
            url: settings
                .url
                .or_else(|| var("NETBOX_URL"))
                .unwrap_or_else(|| DEFAULT_URL.to_string()),
            basepath: settings
                .basepath
                .or_else(|| var("NETBOX_BASEPATH"))
                .unwrap_or_else(|| DEFAULT_BASE_PATH.to_string()),
            token,
            scheme,
            insecure,
            strict_custom_fields,
        })
    }

    /// Server URL with scheme; a scheme already present in `url` wins
    pub fn server_url(&self) -> String {
        if self.url.contains("://") {
            self.url.clone()
        } else {
            format!("{}://{}", self.scheme, self.url)
        }
    }

    pub fn custom_field_mode(&self) -> CustomFieldMode {
        CustomFieldMode::from_strict(self.strict_custom_fields)
    }

    pub fn client_options(&self) -> ClientOptions {
        let mut options = ClientOptions::new(self.server_url(), self.token.clone());
        options.base_path = self.basepath.clone();
        options.insecure = self.insecure;
        options
    }

    /// Build the NetBox client
    pub fn client(&self) -> Result<NetBoxClient, ProviderError> {
        info!("Configuring NetBox client for {}{}", self.server_url(), self.basepath);
        Ok(NetBoxClient::with_options(self.client_options())?)
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Some(true),
        "0" | "false" | "no" => Some(false),
        _ => None,
    }
}
