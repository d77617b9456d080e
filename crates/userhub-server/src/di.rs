//! Dependency injection module using Shaku.
//!
//! `AppModule` wires the whole stack for one process: the MySQL pool and
//! unit-of-work factory, the password hasher, both cache tiers and the user
//! service.

use deadpool_redis::{PoolConfig, Runtime};
use std::sync::Arc;
use tracing::info;
use userhub_config::{AppConfig, RedisConfig};
use userhub_core::{module, HasComponent, HubError, HubResult};
use userhub_repository::{
    DatabasePool, DatabasePoolInterface, DatabasePoolParameters, MySqlUnitOfWorkFactory,
    UnitOfWorkFactory,
};
use userhub_security::{PasswordHasher, PasswordHasherInterface, PasswordHasherParameters};
use userhub_service::{
    CacheInterface, CacheSettings, LocalCacheInterface, MokaLocalCache, MokaLocalCacheParameters,
    RedisCacheService, RedisCacheServiceParameters, UserService, UserServiceComponent,
    UserServiceComponentParameters,
};

module! {
    pub AppModule {
        components = [
            DatabasePool,
            MySqlUnitOfWorkFactory,
            PasswordHasher,
            MokaLocalCache,
            RedisCacheService,
            UserServiceComponent,
        ],
        providers = [],
    }
}

/// Creates the Redis pool backing the distributed tier, or `None` when the
/// tier is disabled.
pub fn create_redis_pool(config: &RedisConfig) -> HubResult<Option<Arc<deadpool_redis::Pool>>> {
    if !config.enabled {
        info!("Distributed cache disabled");
        return Ok(None);
    }

    let mut redis_cfg = deadpool_redis::Config::from_url(&config.url);
    redis_cfg.pool = Some(PoolConfig::new(config.pool_size));
    let pool = redis_cfg
        .create_pool(Some(Runtime::Tokio1))
        .map_err(|e| HubError::Cache(format!("Failed to create Redis pool: {e}")))?;

    info!("Redis pool created (max size {})", config.pool_size);
    Ok(Some(Arc::new(pool)))
}

/// Builds the module from already-connected resources.
pub fn build_app_module(
    db_pool: &DatabasePool,
    redis_pool: Option<Arc<deadpool_redis::Pool>>,
    config: &AppConfig,
) -> Arc<AppModule> {
    let password_hasher = PasswordHasher::with_cost(config.security.password_hash_cost);
    let local_cache = MokaLocalCache::new(config.cache.local_capacity, config.cache.local_ttl());

    let module = AppModule::builder()
        .with_component_parameters::<DatabasePool>(DatabasePoolParameters {
            pool: db_pool.inner().clone(),
        })
        .with_component_parameters::<PasswordHasher>(PasswordHasherParameters {
            argon2: password_hasher.argon2_arc(),
        })
        .with_component_parameters::<MokaLocalCache>(MokaLocalCacheParameters {
            cache: local_cache.cache(),
        })
        .with_component_parameters::<RedisCacheService>(RedisCacheServiceParameters {
            pool: redis_pool,
        })
        .with_component_parameters::<UserServiceComponent>(UserServiceComponentParameters {
            settings: CacheSettings::from(&config.cache),
        })
        .build();

    Arc::new(module)
}

/// Connects the database and Redis, then builds the module.
pub async fn connect_app_module(config: &AppConfig) -> HubResult<Arc<AppModule>> {
    let db_pool = DatabasePool::connect(&config.database).await?;
    if config.database.run_migrations {
        db_pool.run_migrations().await?;
    }

    let redis_pool = create_redis_pool(&config.redis)?;
    Ok(build_app_module(&db_pool, redis_pool, config))
}

/// Resolves the components the server needs from the module.
pub trait ServiceResolver {
    /// The user service.
    fn user_service(&self) -> Arc<dyn UserService>;

    /// The shared database pool.
    fn database_pool(&self) -> Arc<dyn DatabasePoolInterface>;
}

impl ServiceResolver for AppModule {
    fn user_service(&self) -> Arc<dyn UserService> {
        self.resolve()
    }

    fn database_pool(&self) -> Arc<dyn DatabasePoolInterface> {
        self.resolve()
    }
}
