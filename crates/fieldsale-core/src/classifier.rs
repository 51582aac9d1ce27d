//! Maps failures to the categories shown to users.
//!
//! Only rejected credentials get their own category; everything else is
//! reported as a generic failure.

use crate::ClientError;
use fieldsale_api::UNAUTHORIZED;

/// User-facing failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// The server rejected the supplied credentials (status 401).
    InvalidCredentials,
    /// Any other failure: network, decoding, other status codes.
    OperationFailed,
}

impl ErrorCategory {
    /// Message suitable for showing to the user.
    pub fn user_message(&self) -> &'static str {
        match self {
            ErrorCategory::InvalidCredentials => "Invalid email or password",
            ErrorCategory::OperationFailed => "The operation could not be completed",
        }
    }
}

/// Classify a transport status code.
pub fn classify_code(code: Option<u16>) -> ErrorCategory {
    match code {
        Some(UNAUTHORIZED) => ErrorCategory::InvalidCredentials,
        _ => ErrorCategory::OperationFailed,
    }
}

/// Classify a failure.
pub fn classify(error: &ClientError) -> ErrorCategory {
    classify_code(error.status_code())
}
