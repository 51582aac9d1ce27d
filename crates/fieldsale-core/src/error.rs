//! Client-side error types.

use fieldsale_api::ApiError;
use fieldsale_config::ConfigError;
use fieldsale_storage::StorageError;
use thiserror::Error;

/// Any failure a repository operation can run into.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Remote call failed
    #[error("Transport error: {0}")]
    Api(#[from] ApiError),

    /// Local store failed
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// A value from the server or the store could not be decoded
    #[error("Decode error: {0}")]
    Decode(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl ClientError {
    /// Transport status code behind this error, if any.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ClientError::Api(e) => e.status_code(),
            _ => None,
        }
    }
}

/// Result type alias using ClientError.
pub type ClientResult<T> = Result<T, ClientError>;
