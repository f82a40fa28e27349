//! Session Error Types
//!
//! This module provides session-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use kernel::error::{app_error::AppError, kind::ErrorKind};
use platform::{ApiError, StoreError};
use thiserror::Error;

use crate::domain::value_object::role::Role;

/// Login rejected for any reason the backend gives (or no answer at all)
pub const INVALID_CREDENTIALS_MESSAGE: &str =
    "Incorrect Email or Password or Select the role again";

/// Backend answered 200 but left out the token or the user id
pub const INCOMPLETE_GRANT_MESSAGE: &str = "Failed to Login: Token or userId not received";

/// Backend answered with a success status other than 200
pub const UNEXPECTED_STATUS_MESSAGE: &str = "Failed to Login: Invalid response status";

/// Session-specific result type alias
pub type SessionResult<T> = Result<T, SessionError>;

/// Session-specific error variants
#[derive(Debug, Error)]
pub enum SessionError {
    /// Input rejected before any request was made
    #[error("{0}")]
    Validation(String),

    /// Role string outside user/retailer/manufacturer
    #[error("Unknown role: {0}")]
    UnknownRole(String),

    /// Role has no self-service registration
    #[error("{0} accounts cannot be registered from the app")]
    RegistrationNotAllowed(Role),

    /// A login is already awaiting the backend
    #[error("A login is already in progress")]
    LoginInProgress,

    /// Backend refused the credentials (or could not be reached)
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// 200 response without `token` or `id`
    #[error("Token or userId not received")]
    IncompleteGrant,

    /// 2xx response other than 200
    #[error("Unexpected response status {0}")]
    UnexpectedStatus(u16),

    /// Backend refused a registration; carries its message
    #[error("{0}")]
    Rejected(String),

    /// Caller cancelled the attempt
    #[error("Cancelled")]
    Cancelled,

    /// Backend request failed
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// Credential store write failed
    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),
}

impl SessionError {
    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            SessionError::Validation(_) | SessionError::UnknownRole(_) => ErrorKind::BadRequest,
            SessionError::RegistrationNotAllowed(_) => ErrorKind::Forbidden,
            SessionError::LoginInProgress => ErrorKind::Conflict,
            SessionError::InvalidCredentials => ErrorKind::Unauthorized,
            SessionError::IncompleteGrant | SessionError::UnexpectedStatus(_) => {
                ErrorKind::InvalidResponse
            }
            SessionError::Rejected(_) => ErrorKind::BadRequest,
            SessionError::Cancelled => ErrorKind::Cancelled,
            SessionError::Api(e) => e.kind(),
            SessionError::Storage(_) => ErrorKind::Storage,
        }
    }

    /// Display string for the login / registration screen
    pub fn user_message(&self) -> String {
        match self {
            SessionError::InvalidCredentials => INVALID_CREDENTIALS_MESSAGE.to_string(),
            SessionError::IncompleteGrant => INCOMPLETE_GRANT_MESSAGE.to_string(),
            SessionError::UnexpectedStatus(_) => UNEXPECTED_STATUS_MESSAGE.to_string(),
            SessionError::Api(e) => e.user_message(),
            SessionError::Storage(_) => AppError::from(self).user_message(),
            other => other.to_string(),
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        AppError::from(self)
    }

    /// Log the error with appropriate level
    pub fn log(&self) {
        match self {
            SessionError::Storage(e) => {
                tracing::error!(error = %e, "Credential store error");
            }
            SessionError::InvalidCredentials => {
                tracing::warn!("Login rejected");
            }
            SessionError::IncompleteGrant | SessionError::UnexpectedStatus(_) => {
                tracing::warn!(error = %self, "Malformed login response");
            }
            SessionError::Api(e) => e.log(),
            _ => {
                tracing::debug!(error = %self, "Session error");
            }
        }
    }
}

impl From<&SessionError> for AppError {
    fn from(err: &SessionError) -> Self {
        match err {
            SessionError::Storage(_) => AppError::storage("Could not access saved login data")
                .with_action("Please clear storage and log in again"),
            SessionError::Api(e) => AppError::from(e),
            other => AppError::new(other.kind(), other.user_message()),
        }
    }
}

impl From<SessionError> for AppError {
    fn from(err: SessionError) -> Self {
        AppError::from(&err)
    }
}
