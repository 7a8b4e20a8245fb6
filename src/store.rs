//! Persistence port for users and its PostgreSQL adapter.

use std::time::Duration;

use async_trait::async_trait;
use futures::TryStreamExt;
use log::{error, info};
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::{PgPool, Postgres};

use crate::config::DatabaseConfig;
use crate::error::StoreError;
use crate::user::User;

pub const CREATE_TABLE_SQL: &str = "CREATE TABLE IF NOT EXISTS users ( \
        id SERIAL PRIMARY KEY, \
        name VARCHAR(255) NOT NULL \
     )";

const LIST_SQL: &str = "SELECT id, name FROM users";

const INSERT_SQL: &str = "INSERT INTO users (name) VALUES ($1) RETURNING id, name";

/// Storage operations backing the users API.
///
/// Each call runs exactly one statement; there are no transactions spanning
/// calls.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Idempotently create the users table.
    async fn bootstrap(&self) -> Result<(), StoreError>;

    /// All users, in whatever order the store returns them.
    async fn list(&self) -> Result<Vec<User>, StoreError>;

    /// Insert a user and return it with its assigned id. A `None` name is
    /// passed through and rejected by the store.
    async fn create(&self, name: Option<String>) -> Result<User, StoreError>;
}

/// Run bootstrap, logging the outcome. A failure is not fatal: the service
/// keeps running and later queries report the missing table.
pub async fn bootstrap_logged(store: &dyn UserStore) {
    match store.bootstrap().await {
        Ok(()) => info!("database initialized"),
        Err(e) => error!("error initializing database: {e}"),
    }
}

#[derive(Clone, Debug)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Build a lazily-connecting pool, so startup never blocks on or fails
    /// because of an unreachable database.
    pub fn connect_lazy(config: &DatabaseConfig) -> Result<Self, StoreError> {
        let options: PgConnectOptions = config.url.parse()?;
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
            .connect_lazy_with(options);
        Ok(Self::new(pool))
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn bootstrap(&self) -> Result<(), StoreError> {
        sqlx::query(CREATE_TABLE_SQL).execute(&self.pool).await?;
        Ok(())
    }

    async fn list(&self) -> Result<Vec<User>, StoreError> {
        let users: Vec<User> = sqlx::query_as::<Postgres, User>(LIST_SQL)
            .fetch(&self.pool)
            .try_collect()
            .await?;
        Ok(users)
    }

    async fn create(&self, name: Option<String>) -> Result<User, StoreError> {
        let user = sqlx::query_as::<Postgres, User>(INSERT_SQL)
            .bind(name)
            .fetch_one(&self.pool)
            .await?;
        Ok(user)
    }
}
