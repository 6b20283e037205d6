use flashdeck_core::{CoreError, KeyValueStore};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Row, SqlitePool};
use std::future::Future;
use std::path::Path;
use tokio::runtime::{Builder, Runtime};
use tracing::debug;

/// Key-value slots in a single SQLite table. Queries run on a private
/// runtime and block the caller, so the store looks synchronous from outside.
pub struct SqliteKv {
    // Declared before `rt` so the pool is dropped while the runtime still exists.
    pool: SqlitePool,
    rt: Runtime,
}

impl SqliteKv {
    pub fn open_file(path: impl AsRef<Path>) -> Result<Self, CoreError> {
        let opts = SqliteConnectOptions::new()
            .filename(path.as_ref())
            .create_if_missing(true);
        debug!(path = %path.as_ref().display(), "opening sqlite store");
        Self::connect(SqlitePoolOptions::new().max_connections(5), opts)
    }

    pub fn open_memory() -> Result<Self, CoreError> {
        // Each in-memory connection is its own database, so keep exactly one
        // alive for the lifetime of the pool.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None);
        let opts = "sqlite::memory:"
            .parse::<SqliteConnectOptions>()
            .map_err(|e| CoreError::storage(format!("sqlite options: {e}")))?;
        Self::connect(pool, opts)
    }

    fn connect(pool: SqlitePoolOptions, opts: SqliteConnectOptions) -> Result<Self, CoreError> {
        let rt = Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
            .map_err(|e| CoreError::storage(format!("sqlite runtime: {e}")))?;
        let pool = rt
            .block_on(pool.connect_with(opts))
            .map_err(|e| CoreError::storage(format!("sqlite connect: {e}")))?;
        let kv = Self { pool, rt };
        kv.ensure_schema()?;
        Ok(kv)
    }

    fn block_on<F: Future>(&self, fut: F) -> F::Output {
        self.rt.block_on(fut)
    }

    fn ensure_schema(&self) -> Result<(), CoreError> {
        const STMT: &str = r#"
        CREATE TABLE IF NOT EXISTS kv (
          key         TEXT PRIMARY KEY,
          value       TEXT NOT NULL,
          updated_at  TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#;
        self.block_on(sqlx::query(STMT).execute(&self.pool))
            .map_err(|e| CoreError::storage(format!("sqlite schema: {e}")))?;
        Ok(())
    }
}

impl KeyValueStore for SqliteKv {
    fn get(&self, key: &str) -> Result<Option<String>, CoreError> {
        let row = self
            .block_on(
                sqlx::query("SELECT value FROM kv WHERE key=?")
                    .bind(key)
                    .fetch_optional(&self.pool),
            )
            .map_err(|e| CoreError::storage(format!("read {key}: {e}")))?;
        Ok(row.map(|r| r.get::<String, _>("value")))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), CoreError> {
        self.block_on(
            sqlx::query(
                "INSERT INTO kv (key,value,updated_at) VALUES (?,?,CURRENT_TIMESTAMP) \
                 ON CONFLICT(key) DO UPDATE SET value=excluded.value, updated_at=excluded.updated_at",
            )
            .bind(key)
            .bind(value)
            .execute(&self.pool),
        )
        .map_err(|e| CoreError::storage(format!("write {key}: {e}")))?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), CoreError> {
        self.block_on(sqlx::query("DELETE FROM kv WHERE key=?").bind(key).execute(&self.pool))
            .map_err(|e| CoreError::storage(format!("delete {key}: {e}")))?;
        Ok(())
    }
}
