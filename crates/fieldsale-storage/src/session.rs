//! Single-identity session cache on top of a [`KeyValueStore`].

use crate::{KeyValueStore, StorageError, StorageKeys, StorageResult};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};

/// The authenticated principal.
///
/// Replaced wholesale on every login; never updated field by field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub email: String,
    pub id: i64,
    pub role: String,
    pub username: String,
}

impl Identity {
    /// Encode as the canonical session record.
    pub fn encode(&self) -> StorageResult<String> {
        serde_json::to_string(self).map_err(|e| StorageError::Encoding(e.to_string()))
    }

    /// Decode a session record.
    pub fn decode(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }
}

/// Owns the session and token keys of the store.
///
/// Constructed once at startup and shared by `Arc` with every repository
/// that needs the signed-in identity.
pub struct SessionManager {
    store: Arc<dyn KeyValueStore>,
}

impl SessionManager {
    /// Create a session manager over the given store.
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    // ==========================================
    // Identity
    // ==========================================

    /// Persist `identity` as the current session, replacing any previous one.
    pub async fn save(&self, identity: &Identity) -> StorageResult<()> {
        let record = identity.encode()?;
        self.store.put(StorageKeys::SESSION, &record).await?;
        debug!(user_id = identity.id, "Session identity saved");
        Ok(())
    }

    /// Read the current session.
    ///
    /// A missing record and a record that does not decode both mean
    /// "signed out" and yield `Ok(None)`. Only store failures are errors.
    pub async fn get(&self) -> StorageResult<Option<Identity>> {
        let Some(raw) = self.store.get(StorageKeys::SESSION).await? else {
            return Ok(None);
        };

        match Identity::decode(&raw) {
            Ok(identity) => Ok(Some(identity)),
            Err(e) => {
                warn!(error = %e, "Ignoring malformed session record");
                Ok(None)
            }
        }
    }

    /// Remove the current session. Idempotent.
    pub async fn clear(&self) -> StorageResult<()> {
        self.store.remove(StorageKeys::SESSION).await
    }

    /// Check whether a decodable session exists.
    pub async fn has_session(&self) -> StorageResult<bool> {
        Ok(self.get().await?.is_some())
    }

    // ==========================================
    // Access token
    // ==========================================

    /// Persist the bearer token issued at login.
    pub async fn save_token(&self, token: &str) -> StorageResult<()> {
        self.store.put(StorageKeys::ACCESS_TOKEN, token).await
    }

    /// Retrieve the bearer token, if any.
    pub async fn token(&self) -> StorageResult<Option<String>> {
        self.store.get(StorageKeys::ACCESS_TOKEN).await
    }

    /// Remove the bearer token. Idempotent.
    pub async fn clear_token(&self) -> StorageResult<()> {
        self.store.remove(StorageKeys::ACCESS_TOKEN).await
    }

    /// Clear both the identity and the token.
    pub async fn sign_out(&self) -> StorageResult<()> {
        self.clear_token().await?;
        self.clear().await
    }
}
