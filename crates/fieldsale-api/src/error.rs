//! Transport error types.

use thiserror::Error;

/// Failure of a remote call.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Server answered with a non-success status (HTTP or envelope code)
    #[error("Request failed with status {code}: {message}")]
    Status { code: u16, message: String },

    /// HTTP request error (connect, TLS, body read)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body did not match the expected shape
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Success envelope without a payload
    #[error("Response envelope carried no data")]
    MissingData,

    /// URL parse error
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Token could not be read from storage
    #[error("Storage error: {0}")]
    Storage(#[from] fieldsale_storage::StorageError),
}

impl ApiError {
    /// Transport status code carried by this error, if any.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ApiError::Status { code, .. } => Some(*code),
            ApiError::Http(e) => e.status().map(|status| status.as_u16()),
            _ => None,
        }
    }

    /// Returns true if the server rejected the caller's credentials.
    pub fn is_unauthorized(&self) -> bool {
        self.status_code() == Some(crate::UNAUTHORIZED)
    }
}

/// Result type alias using ApiError.
pub type ApiResult<T> = Result<T, ApiError>;
