//! Error conversions - From implementations for common error types
//!
//! Provides automatic conversion from common error types to [`AppError`].

use super::app_error::AppError;
use super::kind::ErrorKind;

// ============================================================================
// Standard library conversions
// ============================================================================

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        let kind = match err.kind() {
            std::io::ErrorKind::TimedOut => ErrorKind::RequestTimeout,
            std::io::ErrorKind::ConnectionRefused
            | std::io::ErrorKind::ConnectionReset
            | std::io::ErrorKind::ConnectionAborted
            | std::io::ErrorKind::NotConnected => ErrorKind::Network,
            _ => ErrorKind::Storage,
        };
        AppError::new(kind, "I/O operation failed").with_source(err)
    }
}

// ============================================================================
// serde_json conversions
// ============================================================================

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_syntax() || err.is_data() || err.is_eof() {
            AppError::invalid_response(format!("JSON parse error: {}", err)).with_source(err)
        } else {
            AppError::internal("JSON serialization error").with_source(err)
        }
    }
}

// ============================================================================
// reqwest conversions (feature-gated)
// ============================================================================

#[cfg(feature = "reqwest")]
impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            return AppError::new(ErrorKind::RequestTimeout, "The server took too long to respond")
                .with_source(err);
        }
        if err.is_connect() {
            return AppError::network("Could not reach the server")
                .with_action("Check your connection and try again")
                .with_source(err);
        }
        if let Some(status) = err.status() {
            let status = status.as_u16();
            return AppError::from_status(status, ErrorKind::from_status(status).as_str())
                .with_source(err);
        }
        if err.is_decode() {
            return AppError::invalid_response("Unexpected response from server").with_source(err);
        }
        AppError::network("Request failed").with_source(err)
    }
}
