//! Logging setup
//!
//! Terraform captures a provider's stderr, so log lines go there. The filter is
//! taken from `TF_LOG_PROVIDER`, then `RUST_LOG`, and defaults to `info`.

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info";

fn filter_from(tf_log: Option<String>, rust_log: Option<String>) -> EnvFilter {
    tf_log
        .or(rust_log)
        .map(|directives| directives.to_lowercase())
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the global subscriber. Calling it again is a no-op.
pub fn init_logging() {
    let filter = filter_from(
        std::env::var("TF_LOG_PROVIDER").ok(),
        std::env::var("RUST_LOG").ok(),
    );
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terraform_level_takes_precedence() {
        let filter = filter_from(Some("DEBUG".into()), Some("warn".into()));
        assert_eq!(filter.to_string(), "debug");
    }

    #[test]
    fn falls_back_to_default() {
        assert_eq!(filter_from(None, None).to_string(), "info");
        assert_eq!(filter_from(None, Some("netbox_client=trace".into())).to_string(), "netbox_client=trace");
    }

    #[test]
    fn init_twice_is_harmless() {
        init_logging();
        init_logging();
    }
}
