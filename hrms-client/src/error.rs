//! Client error types

use thiserror::Error;

/// Client error type
///
/// Every failed request is terminal for the user action that issued it;
/// no retries are attempted anywhere.
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed at the transport level
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Authentication required or token rejected; carries the backend
    /// `detail` when the body had one
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Request rejected by server-side validation
    #[error("Validation error: {0}")]
    Validation(String),

    /// Any other backend failure; `detail` is the server message when present
    #[error("Backend error ({status}): {detail}")]
    Backend { status: u16, detail: String },

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Payslip payload could not be decoded
    #[error("Payslip decode error: {0}")]
    PayslipDecode(#[from] base64::DecodeError),
}

impl ClientError {
    /// Message suitable for a transient user-facing notification;
    /// the backend `detail` is surfaced verbatim when present.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ClientError::Unauthorized(detail) if detail.is_empty() => {
                "Authentication required".to_string()
            }
            ClientError::Unauthorized(detail)
            | ClientError::NotFound(detail)
            | ClientError::Validation(detail)
            | ClientError::Backend { detail, .. }
                if !detail.is_empty() =>
            {
                detail.clone()
            }
            _ => fallback.to_string(),
        }
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
