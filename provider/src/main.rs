//! NetBox provider connectivity check
//!
//! Resolves the provider configuration from the environment, verifies the
//! token against NetBox and lists the types the provider serves.

use terraform_provider_netbox::logging::init_logging;
use terraform_provider_netbox::{Provider, ProviderError, ProviderSettings};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), ProviderError> {
    init_logging();

    info!("Starting NetBox provider check");

    let provider = Provider::configure(ProviderSettings::default())?;
    provider.client().validate_token().await?;
    info!("Connected to {}", provider.client().base_url());

    for type_name in provider.resource_types() {
        info!("  resource: {}", type_name);
    }
    for type_name in provider.data_source_types() {
        info!("  data source: {}", type_name);
    }

    Ok(())
}
