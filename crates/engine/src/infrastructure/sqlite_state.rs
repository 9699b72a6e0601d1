//! SQLite-backed world state.

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Row, SqlitePool};
use std::path::Path;
use std::time::Duration;

use crate::infrastructure::ports::{WorldState, WorldStateError};

/// SQLite implementation of [`WorldState`].
///
/// One table, `world_state(key, value)`. `put` is an upsert and
/// `put_if_absent` is a single conditional upsert, so it is atomic.
pub struct SqliteWorldState {
    pool: SqlitePool,
}

impl SqliteWorldState {
    /// Open (or create) the database file at `db_path`, creating parent
    /// directories as needed.
    pub async fn new(db_path: &str) -> Result<Self, WorldStateError> {
        if let Some(parent) = Path::new(db_path)
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
        {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| WorldStateError::backend("open", e))?;
        }

        let options = SqliteConnectOptions::new()
            .filename(db_path)
            .create_if_missing(true);
        let pool = SqlitePool::connect_with(options)
            .await
            .map_err(|e| db_error("open", e))?;

        Self::with_pool(pool).await
    }

    /// Private in-memory database. Held on a single connection that never
    /// expires, since every new SQLite memory connection starts empty.
    pub async fn in_memory() -> Result<Self, WorldStateError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None::<Duration>)
            .max_lifetime(None::<Duration>)
            .connect("sqlite::memory:")
            .await
            .map_err(|e| db_error("open", e))?;

        Self::with_pool(pool).await
    }

    async fn with_pool(pool: SqlitePool) -> Result<Self, WorldStateError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS world_state (
                key TEXT PRIMARY KEY NOT NULL,
                value BLOB NOT NULL
            )
            "#,
        )
        .execute(&pool)
        .await
        .map_err(|e| db_error("migrate", e))?;

        tracing::debug!("World state table ready");

        Ok(Self { pool })
    }

    /// Close the pool, waiting for in-flight queries to finish.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

fn db_error(operation: &'static str, err: sqlx::Error) -> WorldStateError {
    match err {
        sqlx::Error::PoolClosed | sqlx::Error::PoolTimedOut => WorldStateError::unavailable(err),
        other => WorldStateError::backend(operation, other),
    }
}

#[async_trait]
impl WorldState for SqliteWorldState {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, WorldStateError> {
        let row = sqlx::query("SELECT value FROM world_state WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("get", e))?;

        match row {
            Some(row) => {
                let value: Vec<u8> = row.try_get("value").map_err(|e| db_error("get", e))?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    async fn put(&self, key: &str, value: Vec<u8>) -> Result<(), WorldStateError> {
        sqlx::query(
            r#"
            INSERT INTO world_state (key, value)
            VALUES (?, ?)
            ON CONFLICT(key) DO UPDATE SET value = excluded.value
            "#,
        )
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("put", e))?;

        Ok(())
    }

    async fn put_if_absent(&self, key: &str, value: Vec<u8>) -> Result<bool, WorldStateError> {
        // An empty stored value counts as absent, so it may be replaced.
        let result = sqlx::query(
            r#"
            INSERT INTO world_state (key, value)
            VALUES (?, ?)
            ON CONFLICT(key) DO UPDATE SET value = excluded.value
            WHERE length(world_state.value) = 0
            "#,
        )
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("put_if_absent", e))?;

        Ok(result.rows_affected() > 0)
    }
}
