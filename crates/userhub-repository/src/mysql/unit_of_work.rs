//! MySQL unit of work.

use super::table::TrackedRepository;
use super::user_repository::MySqlUserRepository;
use crate::traits::{UnitOfWork, UnitOfWorkFactory, UserRepository};
use crate::DatabasePoolInterface;
use async_trait::async_trait;
use shaku::Component;
use std::sync::Arc;
use tracing::{debug, warn};
use userhub_core::HubResult;

/// Unit of work over the MySQL repositories.
///
/// Repositories stage their writes; `complete` applies them all in one
/// transaction. Dropping the transaction on error rolls it back.
pub struct MySqlUnitOfWork {
    pool: Arc<dyn DatabasePoolInterface>,
    users: MySqlUserRepository,
}

impl MySqlUnitOfWork {
    /// Creates a unit of work with fresh repositories.
    #[must_use]
    pub fn new(pool: Arc<dyn DatabasePoolInterface>) -> Self {
        Self {
            users: MySqlUserRepository::new(Arc::clone(&pool)),
            pool,
        }
    }

    fn tracked(&self) -> [&dyn TrackedRepository; 1] {
        [&self.users]
    }
}

#[async_trait]
impl UnitOfWork for MySqlUnitOfWork {
    fn users(&self) -> &dyn UserRepository {
        &self.users
    }

    async fn complete(&self) -> HubResult<u64> {
        let pending: usize = self.tracked().iter().map(|repo| repo.pending()).sum();
        if pending == 0 {
            debug!("Nothing staged; skipping commit");
            return Ok(0);
        }

        let mut tx = self.pool.inner().begin().await?;
        let mut affected = 0;
        for repo in self.tracked() {
            match repo.flush(&mut tx).await {
                Ok(rows) => affected += rows,
                Err(e) => {
                    warn!("Flush failed, rolling back {} staged changes: {}", pending, e);
                    return Err(e);
                }
            }
        }
        tx.commit().await?;

        debug!("Committed {} staged changes ({} rows)", pending, affected);
        Ok(affected)
    }
}

impl std::fmt::Debug for MySqlUnitOfWork {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MySqlUnitOfWork")
            .field("users", &self.users)
            .finish_non_exhaustive()
    }
}

/// Creates one [`MySqlUnitOfWork`] per service call over the shared pool.
#[derive(Component)]
#[shaku(interface = UnitOfWorkFactory)]
pub struct MySqlUnitOfWorkFactory {
    #[shaku(inject)]
    pool: Arc<dyn DatabasePoolInterface>,
}

impl MySqlUnitOfWorkFactory {
    /// Creates a factory over the given pool.
    #[must_use]
    pub fn new(pool: Arc<dyn DatabasePoolInterface>) -> Self {
        Self { pool }
    }
}

impl UnitOfWorkFactory for MySqlUnitOfWorkFactory {
    fn begin(&self) -> Box<dyn UnitOfWork> {
        Box::new(MySqlUnitOfWork::new(Arc::clone(&self.pool)))
    }
}
