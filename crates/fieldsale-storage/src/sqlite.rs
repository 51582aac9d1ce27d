//! Durable key-value store on SQLite.
//!
//! All statements run on the dedicated `tokio-rusqlite` thread; callers
//! await the result without blocking the runtime. Only SQL runs inside
//! `call()`; encoding happens on the caller's side.

use crate::{KeyValueStore, StorageError, StorageResult};
use async_trait::async_trait;
use rusqlite::OptionalExtension;
use std::path::Path;
use tokio_rusqlite::Connection;
use tracing::{debug, info};

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS kv_store (
        key TEXT PRIMARY KEY NOT NULL,
        value TEXT NOT NULL,
        updated_at TEXT NOT NULL
    );
";

/// Convert a tokio_rusqlite::Error to StorageError.
fn from_tokio_rusqlite(e: tokio_rusqlite::Error) -> StorageError {
    match e {
        tokio_rusqlite::Error::Rusqlite(e) => StorageError::Sqlite(e),
        tokio_rusqlite::Error::Close(_) => StorageError::Connection("Connection closed".to_string()),
        other => StorageError::Connection(other.to_string()),
    }
}

/// SQLite-backed implementation of [`KeyValueStore`].
#[derive(Clone)]
pub struct SqliteStore {
    conn: Connection,
    path: String,
}

impl SqliteStore {
    /// Open (or create) the store at `path`.
    pub async fn open(path: &Path) -> StorageResult<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let path_str = path.to_string_lossy().to_string();
        info!(path = %path_str, "Opening key-value store");

        let conn = Connection::open(path_str.clone())
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;

        conn.call(|conn| {
            conn.execute_batch(
                "
                PRAGMA journal_mode = WAL;
                PRAGMA synchronous = NORMAL;
                PRAGMA busy_timeout = 5000;
                ",
            )?;
            Ok(())
        })
        .await
        .map_err(from_tokio_rusqlite)?;

        Self::initialize(conn, path_str).await
    }

    /// Open a throwaway store that lives in memory.
    pub async fn open_in_memory() -> StorageResult<Self> {
        let conn = Connection::open_in_memory()
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Self::initialize(conn, ":memory:".to_string()).await
    }

    async fn initialize(conn: Connection, path: String) -> StorageResult<Self> {
        conn.call(|conn| {
            conn.execute_batch(SCHEMA)?;
            Ok(())
        })
        .await
        .map_err(from_tokio_rusqlite)?;

        debug!(path = %path, "Key-value store ready");
        Ok(Self { conn, path })
    }

    /// Get the database file path.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Close the store, waiting for pending statements.
    pub async fn close(self) -> StorageResult<()> {
        self.conn
            .close()
            .await
            .map_err(|e| StorageError::Connection(format!("Failed to close store: {:?}", e)))?;
        info!(path = %self.path, "Key-value store closed");
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for SqliteStore {
    async fn put(&self, key: &str, value: &str) -> StorageResult<()> {
        debug!(key = %key, "Storing value");

        let key = key.to_string();
        let value = value.to_string();
        let updated_at = chrono::Utc::now().to_rfc3339();

        self.conn
            .call(move |conn| {
                conn.execute(
                    "INSERT INTO kv_store (key, value, updated_at) VALUES (?1, ?2, ?3)
                     ON CONFLICT(key) DO UPDATE SET
                        value = excluded.value,
                        updated_at = excluded.updated_at",
                    [&key, &value, &updated_at],
                )?;
                Ok(())
            })
            .await
            .map_err(from_tokio_rusqlite)
    }

    async fn get(&self, key: &str) -> StorageResult<Option<String>> {
        debug!(key = %key, "Reading value");

        let key = key.to_string();
        self.conn
            .call(move |conn| {
                let value = conn
                    .query_row(
                        "SELECT value FROM kv_store WHERE key = ?1",
                        [&key],
                        |row| row.get::<_, String>(0),
                    )
                    .optional()?;
                Ok(value)
            })
            .await
            .map_err(from_tokio_rusqlite)
    }

    async fn remove(&self, key: &str) -> StorageResult<()> {
        debug!(key = %key, "Removing value");

        let key = key.to_string();
        self.conn
            .call(move |conn| {
                conn.execute("DELETE FROM kv_store WHERE key = ?1", [&key])?;
                Ok(())
            })
            .await
            .map_err(from_tokio_rusqlite)
    }
}
