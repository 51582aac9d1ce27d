//! Storage trait definitions.

use crate::StorageResult;
use async_trait::async_trait;

/// Durable key to string storage.
///
/// Every method suspends instead of blocking the calling task. Writes to the
/// same key are last-write-wins; there are no cross-key transactions.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Store a value, overwriting any previous value for the key
    async fn put(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Retrieve a value; a missing key is `Ok(None)`
    async fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Delete a value. Removing a missing key is a no-op.
    async fn remove(&self, key: &str) -> StorageResult<()>;

    /// Check if a key exists
    async fn has(&self, key: &str) -> StorageResult<bool> {
        Ok(self.get(key).await?.is_some())
    }
}
