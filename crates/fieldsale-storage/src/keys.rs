//! Storage key constants.

/// Reserved keys in the client's key-value namespace.
pub struct StorageKeys;

impl StorageKeys {
    /// Serialized identity of the signed-in user (JSON)
    pub const SESSION: &'static str = "session_identity";

    /// Bearer token issued at login
    pub const ACCESS_TOKEN: &'static str = "access_token";
}
