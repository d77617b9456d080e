//! Generic MySQL repository over any table-mapped entity.

use crate::change_set::{Change, ChangeSet};
use crate::DatabasePoolInterface;
use async_trait::async_trait;
use sqlx::mysql::{MySqlArguments, MySqlRow};
use sqlx::query::Query;
use sqlx::{FromRow, MySql, Transaction};
use std::fmt::Display;
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::debug;
use userhub_core::{HubResult, Repository};

/// A bindable MySQL statement.
pub type MySqlQuery<'q> = Query<'q, MySql, MySqlArguments>;

/// Describes how an entity maps onto a single MySQL table.
pub trait MySqlEntity: Clone + Send + Sync + 'static {
    /// Primary key type, stored in its `Display` form.
    type Id: Clone + Display + Send + Sync + 'static;

    /// Raw row decoded by sqlx.
    type Row: for<'r> FromRow<'r, MySqlRow> + Send + Unpin;

    /// Table name.
    const TABLE: &'static str;

    /// Primary key column.
    const KEY: &'static str;

    /// Every column, in `bind_insert` order.
    const COLUMNS: &'static [&'static str];

    /// Columns rewritten on update, in `bind_update` order.
    const UPDATE_COLUMNS: &'static [&'static str];

    /// Converts a decoded row into the entity.
    fn from_row(row: Self::Row) -> HubResult<Self>;

    /// Primary key of this entity.
    fn key(&self) -> Self::Id;

    /// Binds every column value in `COLUMNS` order.
    fn bind_insert<'q>(&self, query: MySqlQuery<'q>) -> MySqlQuery<'q>;

    /// Binds the updatable column values in `UPDATE_COLUMNS` order.
    fn bind_update<'q>(&self, query: MySqlQuery<'q>) -> MySqlQuery<'q>;
}

/// `SELECT` over every column.
#[must_use]
pub fn select_all_sql<E: MySqlEntity>() -> String {
    format!("SELECT {} FROM {}", E::COLUMNS.join(", "), E::TABLE)
}

/// `SELECT` of a single row by key.
#[must_use]
pub fn select_by_key_sql<E: MySqlEntity>() -> String {
    format!("{} WHERE {} = ?", select_all_sql::<E>(), E::KEY)
}

/// `INSERT` of every column.
#[must_use]
pub fn insert_sql<E: MySqlEntity>() -> String {
    let placeholders = vec!["?"; E::COLUMNS.len()].join(", ");
    format!(
        "INSERT INTO {} ({}) VALUES ({})",
        E::TABLE,
        E::COLUMNS.join(", "),
        placeholders
    )
}

/// `UPDATE` of the updatable columns by key.
#[must_use]
pub fn update_sql<E: MySqlEntity>() -> String {
    let assignments = E::UPDATE_COLUMNS
        .iter()
        .map(|column| format!("{column} = ?"))
        .collect::<Vec<_>>()
        .join(", ");
    format!("UPDATE {} SET {} WHERE {} = ?", E::TABLE, assignments, E::KEY)
}

/// `DELETE` by key.
#[must_use]
pub fn delete_sql<E: MySqlEntity>() -> String {
    format!("DELETE FROM {} WHERE {} = ?", E::TABLE, E::KEY)
}

/// A repository with staged writes.
#[async_trait]
pub trait TrackedRepository: Send + Sync {
    /// Number of staged writes.
    fn pending(&self) -> usize;

    /// Applies and clears every staged write inside `tx`.
    async fn flush(&self, tx: &mut Transaction<'static, MySql>) -> HubResult<u64>;
}

/// Generic repository: reads hit the pool, writes are staged until flushed.
pub struct MySqlRepository<E: MySqlEntity> {
    pool: Arc<dyn DatabasePoolInterface>,
    changes: ChangeSet<E, E::Id>,
    _entity: PhantomData<fn() -> E>,
}

impl<E: MySqlEntity> MySqlRepository<E> {
    /// Creates a repository over the given pool.
    #[must_use]
    pub fn new(pool: Arc<dyn DatabasePoolInterface>) -> Self {
        Self {
            pool,
            changes: ChangeSet::new(),
            _entity: PhantomData,
        }
    }

    /// The pool reads run against.
    #[must_use]
    pub fn pool(&self) -> &Arc<dyn DatabasePoolInterface> {
        &self.pool
    }
}

#[async_trait]
impl<E: MySqlEntity> Repository<E, E::Id> for MySqlRepository<E> {
    async fn get_all(&self) -> HubResult<Vec<E>> {
        debug!("Fetching all rows from {}", E::TABLE);

        let sql = select_all_sql::<E>();
        let rows = sqlx::query_as::<_, E::Row>(&sql)
            .fetch_all(self.pool.inner())
            .await?;

        rows.into_iter().map(E::from_row).collect()
    }

    async fn get_by_id(&self, id: &E::Id) -> HubResult<Option<E>> {
        debug!("Fetching {} row by key: {}", E::TABLE, id);

        let sql = select_by_key_sql::<E>();
        let row = sqlx::query_as::<_, E::Row>(&sql)
            .bind(id.to_string())
            .fetch_optional(self.pool.inner())
            .await?;

        row.map(E::from_row).transpose()
    }

    async fn add(&self, entity: E) -> HubResult<()> {
        debug!("Staging insert into {}: {}", E::TABLE, entity.key());
        self.changes.stage(Change::Insert(entity));
        Ok(())
    }

    async fn update(&self, entity: E) -> HubResult<()> {
        debug!("Staging update of {}: {}", E::TABLE, entity.key());
        self.changes.stage(Change::Update(entity));
        Ok(())
    }

    async fn delete(&self, id: &E::Id) -> HubResult<()> {
        debug!("Staging delete from {}: {}", E::TABLE, id);
        self.changes.stage(Change::Delete(id.clone()));
        Ok(())
    }
}

#[async_trait]
impl<E: MySqlEntity> TrackedRepository for MySqlRepository<E> {
    fn pending(&self) -> usize {
        self.changes.len()
    }

    async fn flush(&self, tx: &mut Transaction<'static, MySql>) -> HubResult<u64> {
        let insert = insert_sql::<E>();
        let update = update_sql::<E>();
        let delete = delete_sql::<E>();

        let mut affected = 0;
        for change in self.changes.drain() {
            let result = match change {
                Change::Insert(entity) => {
                    entity.bind_insert(sqlx::query(&insert)).execute(&mut **tx).await?
                }
                Change::Update(entity) => {
                    entity
                        .bind_update(sqlx::query(&update))
                        .bind(entity.key().to_string())
                        .execute(&mut **tx)
                        .await?
                }
                Change::Delete(id) => {
                    sqlx::query(&delete)
                        .bind(id.to_string())
                        .execute(&mut **tx)
                        .await?
                }
            };
            affected += result.rows_affected();
        }

        debug!("Flushed {} affected rows in {}", affected, E::TABLE);
        Ok(affected)
    }
}

impl<E: MySqlEntity> std::fmt::Debug for MySqlRepository<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MySqlRepository")
            .field("table", &E::TABLE)
            .field("pending", &self.changes.len())
            .finish_non_exhaustive()
    }
}
