use super::{OperationLease, PersistentStore};
use crate::error::StoreError;
use anyhow::{Context, Result};
use chrono::Utc;
use sqlx::Row;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::future::Future;
use std::path::Path;
use std::pin::Pin;

/// SQLite-backed record store using a sqlx async pool.
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Open (creating if needed) the database file at `path`.
    pub async fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("create store directory {}", parent.display()))?;
        }

        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .map_err(|err| StoreError::BackendUnavailable(format!("{}: {err}", path.display())))?;

        Self::new(pool).await
    }

    /// Create a store with an existing pool and ensure the table exists.
    pub async fn new(pool: SqlitePool) -> Result<Self> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS kv_records (
                 key        TEXT PRIMARY KEY,
                 value      TEXT NOT NULL,
                 updated_at TEXT NOT NULL
             )",
        )
        .execute(&pool)
        .await
        .context("create kv_records table")?;

        sqlx::query(
            "CREATE TABLE IF NOT EXISTS operation_lease (
                 slot       INTEGER PRIMARY KEY CHECK (slot = 1),
                 owner      TEXT NOT NULL,
                 operation  TEXT NOT NULL,
                 expires_at INTEGER NOT NULL
             )",
        )
        .execute(&pool)
        .await
        .context("create operation_lease table")?;

        Ok(Self { pool })
    }

    /// Access the underlying pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

impl PersistentStore for SqliteStore {
    fn name(&self) -> &str {
        "sqlite"
    }

    fn load_raw<'a>(
        &'a self,
        key: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Option<String>>> + Send + 'a>> {
        Box::pin(async move {
            let row = sqlx::query("SELECT value FROM kv_records WHERE key = $1")
                .bind(key)
                .fetch_optional(&self.pool)
                .await
                .map_err(|err| StoreError::Sqlx(format!("load {key}: {err}")))?;

            row.map(|r| r.try_get::<String, _>("value"))
                .transpose()
                .map_err(|err| anyhow::Error::from(StoreError::Sqlx(format!("decode {key}: {err}"))))
        })
    }

    fn save_raw<'a>(
        &'a self,
        key: &'a str,
        value: String,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + 'a>> {
        Box::pin(async move {
            sqlx::query(
                "INSERT INTO kv_records (key, value, updated_at) VALUES ($1, $2, $3)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            )
            .bind(key)
            .bind(value)
            .bind(Utc::now().to_rfc3339())
            .execute(&self.pool)
            .await
            .map_err(|err| StoreError::Sqlx(format!("save {key}: {err}")))?;
            Ok(())
        })
    }

    fn try_claim<'a>(
        &'a self,
        lease: &'a OperationLease,
    ) -> Pin<Box<dyn Future<Output = Result<Option<String>>> + Send + 'a>> {
        Box::pin(async move {
            // No row changes while another owner holds an unexpired lease.
            let claimed = sqlx::query(
                "INSERT INTO operation_lease (slot, owner, operation, expires_at) VALUES (1, $1, $2, $3)
                 ON CONFLICT(slot) DO UPDATE SET
                     owner = excluded.owner,
                     operation = excluded.operation,
                     expires_at = excluded.expires_at
                 WHERE operation_lease.expires_at <= $4 OR operation_lease.owner = excluded.owner",
            )
            .bind(&lease.owner)
            .bind(&lease.operation)
            .bind(lease.expires_at.timestamp_millis())
            .bind(Utc::now().timestamp_millis())
            .execute(&self.pool)
            .await
            .map_err(|err| StoreError::Sqlx(format!("claim operation lease: {err}")))?
            .rows_affected();

            if claimed > 0 {
                return Ok(None);
            }

            let holder: Option<(String,)> =
                sqlx::query_as("SELECT operation FROM operation_lease WHERE slot = 1")
                    .fetch_optional(&self.pool)
                    .await
                    .map_err(|err| StoreError::Sqlx(format!("read operation lease: {err}")))?;
            // Released between the two statements; report it as still pending.
            Ok(Some(holder.map_or_else(|| "another operation".to_string(), |(op,)| op)))
        })
    }

    fn release<'a>(
        &'a self,
        owner: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + 'a>> {
        Box::pin(async move {
            sqlx::query("DELETE FROM operation_lease WHERE slot = 1 AND owner = $1")
                .bind(owner)
                .execute(&self.pool)
                .await
                .map_err(|err| StoreError::Sqlx(format!("release operation lease: {err}")))?;
            Ok(())
        })
    }
}
