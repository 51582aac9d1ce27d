//! Response envelope shared by every endpoint.

use crate::{ApiError, ApiResult};
use serde::{Deserialize, Serialize};

/// `{code, data, message, status}` wrapper around every response payload.
///
/// `code` mirrors the transport status when present; a missing code falls
/// back to the HTTP status of the response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    #[serde(default)]
    pub code: Option<u16>,
    pub data: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

/// Acknowledgement returned by endpoints that only confirm a mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Confirmation {
    pub code: u16,
    pub status: Option<String>,
    pub message: Option<String>,
    /// Whatever payload the server attached (created ids, URLs).
    pub data: Option<serde_json::Value>,
}

impl<T> ApiEnvelope<T> {
    /// Effective status code of the envelope.
    pub fn effective_code(&self, http_status: u16) -> u16 {
        self.code.unwrap_or(http_status)
    }

    fn check(&self, http_status: u16) -> ApiResult<u16> {
        let code = self.effective_code(http_status);
        if (200..300).contains(&code) {
            Ok(code)
        } else {
            Err(ApiError::Status {
                code,
                message: self
                    .message
                    .clone()
                    .unwrap_or_else(|| "request rejected".to_string()),
            })
        }
    }

    /// Unwrap the payload, failing on a non-success code or missing data.
    pub fn into_data(self, http_status: u16) -> ApiResult<T> {
        self.check(http_status)?;
        self.data.ok_or(ApiError::MissingData)
    }
}

impl ApiEnvelope<serde_json::Value> {
    /// Turn an acknowledgement envelope into a [`Confirmation`].
    pub fn into_confirmation(self, http_status: u16) -> ApiResult<Confirmation> {
        let code = self.check(http_status)?;
        Ok(Confirmation {
            code,
            status: self.status,
            message: self.message,
            data: self.data.filter(|value| !value.is_null()),
        })
    }
}
