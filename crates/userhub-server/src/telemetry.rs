//! Tracing subscriber setup.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use userhub_config::ObservabilityConfig;
use userhub_core::{HubError, HubResult};

/// Installs the global subscriber.
///
/// `RUST_LOG` wins over `observability.log_level` when set.
pub fn init_tracing(config: &ObservabilityConfig) -> HubResult<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .map_err(|e| HubError::Configuration(format!("Invalid log filter: {e}")))?;

    let registry = tracing_subscriber::registry().with(filter);
    let result = if config.is_json() {
        registry.with(fmt::layer().json().with_target(true)).try_init()
    } else {
        registry.with(fmt::layer().with_target(true)).try_init()
    };

    result.map_err(|e| HubError::Configuration(format!("Failed to install tracing subscriber: {e}")))
}
