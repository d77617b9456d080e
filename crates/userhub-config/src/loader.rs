//! Configuration loader with layered sources.

use crate::AppConfig;
use config::{Config, ConfigError, Environment, File};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};
use userhub_core::HubError;

/// Environment variable prefix for overrides, e.g. `USERHUB__DATABASE__URL`.
pub const ENV_PREFIX: &str = "USERHUB";

/// Configuration loader with runtime refresh support.
#[derive(Clone)]
pub struct ConfigLoader {
    config: Arc<RwLock<AppConfig>>,
    config_dir: String,
}

impl ConfigLoader {
    /// Creates a new configuration loader.
    ///
    /// Configuration is loaded from multiple sources in order:
    /// 1. `{config_dir}/default.toml` - Default values
    /// 2. `{config_dir}/{environment}.toml` - Environment-specific overrides
    /// 3. `{config_dir}/local.toml` - Local, uncommitted overrides
    /// 4. Environment variables with the `USERHUB__` prefix
    ///
    /// The environment name comes from `USERHUB_ENVIRONMENT`, defaulting to
    /// `development`.
    pub fn new(config_dir: impl Into<String>) -> Result<Self, HubError> {
        let config_dir = config_dir.into();
        let config = Self::load_config(&config_dir)?;

        Ok(Self {
            config: Arc::new(RwLock::new(config)),
            config_dir,
        })
    }

    /// Loads configuration from `USERHUB_CONFIG_DIR`, or `./config`.
    pub fn from_default_location() -> Result<Self, HubError> {
        let dir = std::env::var("USERHUB_CONFIG_DIR").unwrap_or_else(|_| "./config".to_string());
        Self::new(dir)
    }

    /// Returns the current configuration.
    pub async fn get(&self) -> AppConfig {
        self.config.read().await.clone()
    }

    /// Reloads the configuration from disk.
    pub async fn reload(&self) -> Result<(), HubError> {
        let new_config = Self::load_config(&self.config_dir)?;
        let mut config = self.config.write().await;
        *config = new_config;
        info!("Configuration reloaded successfully");
        Ok(())
    }

    fn load_config(config_dir: &str) -> Result<AppConfig, HubError> {
        if let Err(e) = dotenvy::dotenv() {
            debug!("No .env file found or error loading it: {}", e);
        }

        let environment =
            std::env::var("USERHUB_ENVIRONMENT").unwrap_or_else(|_| "development".to_string());
        info!("Loading configuration for environment: {}", environment);

        let mut builder = Config::builder();

        for name in ["default", environment.as_str(), "local"] {
            let path = format!("{config_dir}/{name}.toml");
            if Path::new(&path).exists() {
                debug!("Loading config layer from: {}", path);
                builder = builder.add_source(File::with_name(&path).required(false));
            }
        }

        builder = builder
            .set_override("app.environment", environment.clone())
            .map_err(config_error_to_hub_error)?
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            );

        let app_config: AppConfig = builder
            .build()
            .map_err(config_error_to_hub_error)?
            .try_deserialize()
            .map_err(config_error_to_hub_error)?;

        Self::validate_config(&app_config)?;

        Ok(app_config)
    }

    /// Rejects configurations the service cannot start with.
    pub fn validate_config(config: &AppConfig) -> Result<(), HubError> {
        if config.database.url.trim().is_empty() {
            return Err(HubError::Configuration("Database URL is required".to_string()));
        }

        if config.redis.enabled && config.redis.url.trim().is_empty() {
            return Err(HubError::Configuration(
                "Redis URL is required when the distributed cache is enabled".to_string(),
            ));
        }

        if config.server.port == 0 {
            return Err(HubError::Configuration("Server port must be non-zero".to_string()));
        }

        if config.cache.local_capacity == 0 {
            return Err(HubError::Configuration(
                "Local cache capacity must be at least 1".to_string(),
            ));
        }

        if config.cache.local_ttl_secs > config.cache.distributed_ttl_secs {
            return Err(HubError::Configuration(format!(
                "Local cache TTL ({}s) must not exceed distributed cache TTL ({}s)",
                config.cache.local_ttl_secs, config.cache.distributed_ttl_secs
            )));
        }

        Ok(())
    }
}

impl std::fmt::Debug for ConfigLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigLoader")
            .field("config_dir", &self.config_dir)
            .finish_non_exhaustive()
    }
}

fn config_error_to_hub_error(err: ConfigError) -> HubError {
    HubError::Configuration(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ServerConfig;
    use std::fs;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 8080);
        assert!(config.redis.enabled);
        assert!(!config.cache.evict_on_write);
        assert!(config.cache.local_ttl() < config.cache.distributed_ttl());
        assert!(ConfigLoader::validate_config(&config).is_ok());
    }

    #[test]
    fn test_shipped_layers_keep_stale_cache_default() {
        for layer in [
            include_str!("../../../config/default.toml"),
            include_str!("../../../config/production.toml"),
        ] {
            let config: AppConfig = Config::builder()
                .add_source(File::from_str(layer, config::FileFormat::Toml))
                .build()
                .unwrap()
                .try_deserialize()
                .unwrap();
            assert!(!config.cache.evict_on_write);
            assert!(ConfigLoader::validate_config(&config).is_ok());
        }
    }

    #[test]
    fn test_server_address() {
        let config = ServerConfig::default();
        assert_eq!(config.addr(), "0.0.0.0:8080");
    }

    #[tokio::test]
    async fn test_loads_default_toml_layer() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("default.toml"),
            r#"
            [server]
            host = "127.0.0.1"
            port = 9000
            cors_enabled = false

            [cache]
            local_capacity = 16
            local_ttl_secs = 10
            distributed_ttl_secs = 60
            evict_on_write = true
            "#,
        )
        .unwrap();

        let loader = ConfigLoader::new(dir.path().to_string_lossy().to_string()).unwrap();
        let config = loader.get().await;

        assert_eq!(config.server.addr(), "127.0.0.1:9000");
        assert_eq!(config.cache.local_capacity, 16);
        assert!(config.cache.evict_on_write);
        // Sections missing from the file fall back to defaults.
        assert_eq!(config.database.max_connections, 10);
    }

    #[tokio::test]
    async fn test_local_layer_overrides_default() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("default.toml"),
            "[security]\npassword_hash_cost = 3\n",
        )
        .unwrap();
        fs::write(
            dir.path().join("local.toml"),
            "[security]\npassword_hash_cost = 1\n",
        )
        .unwrap();

        let loader = ConfigLoader::new(dir.path().to_string_lossy().to_string()).unwrap();
        assert_eq!(loader.get().await.security.password_hash_cost, 1);
    }

    #[tokio::test]
    async fn test_reload_picks_up_changes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("default.toml");
        fs::write(&path, "[server]\nhost = \"0.0.0.0\"\nport = 8081\ncors_enabled = true\n").unwrap();

        let loader = ConfigLoader::new(dir.path().to_string_lossy().to_string()).unwrap();
        assert_eq!(loader.get().await.server.port, 8081);

        fs::write(&path, "[server]\nhost = \"0.0.0.0\"\nport = 8082\ncors_enabled = true\n").unwrap();
        loader.reload().await.unwrap();
        assert_eq!(loader.get().await.server.port, 8082);
    }

    #[test]
    fn test_missing_directory_yields_defaults() {
        let loader = ConfigLoader::new("/nonexistent/userhub-config-dir");
        assert!(loader.is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_database_url() {
        let mut config = AppConfig::default();
        config.database.url = String::new();
        let err = ConfigLoader::validate_config(&config).unwrap_err();
        assert_eq!(err.error_code(), "CONFIGURATION_ERROR");
    }

    #[test]
    fn test_validate_rejects_inverted_ttls() {
        let mut config = AppConfig::default();
        config.cache.local_ttl_secs = 3600;
        config.cache.distributed_ttl_secs = 60;
        assert!(ConfigLoader::validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_allows_empty_redis_url_when_disabled() {
        let mut config = AppConfig::default();
        config.redis.enabled = false;
        config.redis.url = String::new();
        assert!(ConfigLoader::validate_config(&config).is_ok());
    }

    #[test]
    fn test_observability_format() {
        let mut config = AppConfig::default();
        assert!(!config.observability.is_json());
        config.observability.log_format = "JSON".to_string();
        assert!(config.observability.is_json());
    }
}
