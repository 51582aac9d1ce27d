//! Persistent key-value storage and session management for the fieldsale client.
//!
//! This crate provides:
//! - **`KeyValueStore`**: the async storage seam used by the rest of the client
//! - **`SqliteStore`**: durable store on SQLite via `tokio-rusqlite`
//! - **`MemoryStore`**: in-process store for tests and ephemeral sessions
//! - **`SessionManager`**: single-slot cache of the signed-in identity

mod keys;
mod memory;
mod session;
mod sqlite;
mod traits;

pub use keys::StorageKeys;
pub use memory::MemoryStore;
pub use session::{Identity, SessionManager};
pub use sqlite::SqliteStore;
pub use traits::KeyValueStore;

use fieldsale_config::Paths;
use std::sync::Arc;
use thiserror::Error;

/// Error type for storage operations.
#[derive(Error, Debug)]
pub enum StorageError {
    /// SQLite error
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Executor connection error
    #[error("Connection error: {0}")]
    Connection(String),

    /// Encoding/decoding error
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Open the default durable store at `Paths::store_file()`.
pub async fn create_store(paths: &Paths) -> StorageResult<Arc<dyn KeyValueStore>> {
    let store = SqliteStore::open(&paths.store_file()).await?;
    Ok(Arc::new(store))
}

/// Create a SessionManager over the default durable store.
pub async fn create_session_manager(paths: &Paths) -> StorageResult<SessionManager> {
    let store = create_store(paths).await?;
    Ok(SessionManager::new(store))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_create_store_at_paths() {
        let dir = tempdir().unwrap();
        let paths = Paths::with_base_dir(dir.path().join("client"));

        let store = create_store(&paths).await.unwrap();
        store.put("k", "v").await.unwrap();

        assert!(paths.store_file().exists());
        assert_eq!(store.get("k").await.unwrap(), Some("v".to_string()));
    }

    #[tokio::test]
    async fn test_create_session_manager_starts_signed_out() {
        let dir = tempdir().unwrap();
        let paths = Paths::with_base_dir(dir.path().to_path_buf());

        let session = create_session_manager(&paths).await.unwrap();

        assert!(session.get().await.unwrap().is_none());
        assert!(session.token().await.unwrap().is_none());
    }

    #[test]
    fn test_storage_keys_are_distinct() {
        assert!(!StorageKeys::SESSION.is_empty());
        assert!(!StorageKeys::ACCESS_TOKEN.is_empty());
        assert_ne!(StorageKeys::SESSION, StorageKeys::ACCESS_TOKEN);
    }
}
