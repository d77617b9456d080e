//! Core traits shared across layers.

use crate::HubResult;
use async_trait::async_trait;

/// Generic repository over a single entity type.
///
/// Reads go straight to the store. Writes are staged and only reach the
/// store when the owning unit of work commits.
#[async_trait]
pub trait Repository<T, ID>: Send + Sync
where
    T: Send + Sync,
    ID: Send + Sync,
{
    /// Fetches every entity.
    async fn get_all(&self) -> HubResult<Vec<T>>;

    /// Fetches an entity by its ID.
    async fn get_by_id(&self, id: &ID) -> HubResult<Option<T>>;

    /// Stages an insert.
    async fn add(&self, entity: T) -> HubResult<()>;

    /// Stages a full replacement of an existing entity.
    async fn update(&self, entity: T) -> HubResult<()>;

    /// Stages a delete by ID.
    async fn delete(&self, id: &ID) -> HubResult<()>;
}

/// Trait for mapping between persistence entities and transport objects.
pub trait Mapper<From, To> {
    /// Maps from source type to target type.
    fn map(from: From) -> To;
}

/// Trait for health checks.
#[async_trait]
pub trait HealthCheck: Send + Sync {
    /// Returns the name of this health check.
    fn name(&self) -> &str;

    /// Performs the health check.
    async fn check(&self) -> HealthStatus;
}

/// Health check status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// The component is healthy.
    Healthy,
    /// The component is degraded but functional.
    Degraded(String),
    /// The component is unhealthy.
    Unhealthy(String),
}

impl HealthStatus {
    /// Returns true if the status is healthy.
    #[must_use]
    pub const fn is_healthy(&self) -> bool {
        matches!(self, Self::Healthy)
    }

    /// Returns true if the status is unhealthy.
    #[must_use]
    pub const fn is_unhealthy(&self) -> bool {
        matches!(self, Self::Unhealthy(_))
    }
}
