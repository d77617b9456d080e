//! Server startup utilities.

use tracing::info;
use userhub_config::AppConfig;

/// Prints server startup information.
pub fn print_startup_info(config: &AppConfig) {
    let addr = config.server.addr();
    let separator = "=".repeat(60);
    info!("{}", separator);
    info!("{} v{} ({})", config.app.name, config.app.version, config.app.environment);
    info!("REST API:  http://{}/api/users", addr);
    info!("Health:    http://{}/health", addr);
    if config.app.is_development() {
        info!("API Docs:  http://{}/swagger-ui", addr);
    }
    if !config.redis.enabled {
        info!("Distributed cache disabled; lookups use the local tier only");
    }
    info!("{}", separator);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_print_startup_info_does_not_panic() {
        let _ = tracing_subscriber::fmt::try_init();
        print_startup_info(&AppConfig::default());
    }

    #[test]
    fn test_print_startup_info_without_redis() {
        let _ = tracing_subscriber::fmt::try_init();
        let mut config = AppConfig::default();
        config.redis.enabled = false;
        config.app.environment = "production".to_string();
        print_startup_info(&config);
    }
}
