//! API Client Error Types
//!
//! Failures of a single backend request. They integrate with the unified
//! `kernel::error::AppError` system and each one maps to the short message a
//! screen shows in place of its data.

use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

use crate::storage::StoreError;

/// API result type alias
pub type ApiResult<T> = Result<T, ApiError>;

/// API client error variants
#[derive(Debug, Error)]
pub enum ApiError {
    /// No bearer token in the credential store
    #[error("No token found")]
    MissingToken,

    /// Caller cancelled the request (e.g. the screen went away)
    #[error("Request cancelled")]
    Cancelled,

    /// Backend answered with a non-success status
    #[error("Backend returned status {status}")]
    Status { status: u16, body: String },

    /// Request never produced a response (DNS, connect, TLS, timeout)
    #[error("Transport error: {0}")]
    Transport(#[source] reqwest::Error),

    /// Response body could not be decoded
    #[error("Invalid response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// Pre-signed upload ticket is past its expiry
    #[error("Upload ticket expired")]
    UploadExpired,

    /// HTTP client could not be constructed
    #[error("HTTP client setup failed: {0}")]
    Setup(String),

    /// Credential store write failed
    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Transport(err)
    }
}

impl ApiError {
    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::MissingToken => ErrorKind::Unauthorized,
            ApiError::Cancelled => ErrorKind::Cancelled,
            ApiError::Status { status, .. } => ErrorKind::from_status(*status),
            ApiError::Transport(e) if e.is_timeout() => ErrorKind::RequestTimeout,
            ApiError::Transport(_) => ErrorKind::Network,
            ApiError::Decode(_) => ErrorKind::InvalidResponse,
            ApiError::UploadExpired => ErrorKind::Gone,
            ApiError::Setup(_) => ErrorKind::InternalServerError,
            ApiError::Storage(_) => ErrorKind::Storage,
        }
    }

    /// HTTP status, when the backend answered
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Message a screen shows instead of its data
    pub fn user_message(&self) -> String {
        match self {
            ApiError::MissingToken => "No token found".to_string(),
            ApiError::Cancelled => "Request cancelled".to_string(),
            ApiError::UploadExpired => "Upload link expired, please try again".to_string(),
            _ => AppError::from(self).user_message(),
        }
    }

    /// Log the error with appropriate level
    pub fn log(&self) {
        match self {
            ApiError::Transport(e) => {
                tracing::warn!(error = %e, "Backend unreachable");
            }
            ApiError::Status { status, .. } if *status >= 500 => {
                tracing::error!(status = status, "Backend server error");
            }
            ApiError::Setup(msg) => {
                tracing::error!(message = %msg, "HTTP client setup failed");
            }
            ApiError::Storage(e) => {
                tracing::error!(error = %e, "Credential store error");
            }
            ApiError::Cancelled => {
                tracing::debug!("Request cancelled");
            }
            _ => {
                tracing::debug!(error = %self, "API error");
            }
        }
    }
}

impl From<&ApiError> for AppError {
    fn from(err: &ApiError) -> Self {
        match err {
            ApiError::MissingToken => {
                AppError::unauthorized("No token found").with_action("Please log in again")
            }
            ApiError::Status { status, .. } => {
                let kind = ErrorKind::from_status(*status);
                let message = match kind {
                    ErrorKind::Unauthorized | ErrorKind::Forbidden => {
                        "Your session is no longer valid"
                    }
                    ErrorKind::NotFound => "Nothing found",
                    k if k.is_server_error() => "The server could not complete the request",
                    _ => "The request was rejected",
                };
                let app = AppError::from_status(*status, message);
                if kind.is_auth_failure() {
                    app.with_action("Please log in again")
                } else {
                    app
                }
            }
            other => AppError::new(other.kind(), other.to_string()),
        }
    }
}

impl From<ApiError> for AppError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Transport(e) => AppError::from(e),
            ApiError::Decode(e) => AppError::from(e),
            ApiError::Storage(e) => AppError::from(e),
            other => AppError::from(&other),
        }
    }
}
