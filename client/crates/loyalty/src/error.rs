//! Loyalty Error Types
//!
//! This module provides capability-level error variants that integrate
//! with the unified `kernel::error::AppError` system.

use kernel::error::{app_error::AppError, kind::ErrorKind};
use platform::ApiError;
use session::Role;
use thiserror::Error;

use crate::domain::capability::Capability;
use crate::domain::value_objects::KycStatus;

/// Loyalty result type alias
pub type LoyaltyResult<T> = Result<T, LoyaltyError>;

/// Loyalty error variants
#[derive(Debug, Error)]
pub enum LoyaltyError {
    /// Role has no such screen
    #[error("{capability} is not available for {role} accounts")]
    Unsupported { role: Role, capability: Capability },

    /// Form input rejected before any request was made
    #[error("{0}")]
    Validation(String),

    /// KYC not approved; redemption and transfer are locked
    #[error("You cannot redeem or transfer points while KYC status is {0}")]
    KycBlocked(KycStatus),

    /// `loggedId` absent from the credential store
    #[error("No user id found")]
    MissingUserId,

    /// Backend request failed
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// Backend reply did not have the expected shape
    #[error("Unexpected response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl LoyaltyError {
    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            LoyaltyError::Unsupported { .. } | LoyaltyError::KycBlocked(_) => ErrorKind::Forbidden,
            LoyaltyError::Validation(_) => ErrorKind::BadRequest,
            LoyaltyError::MissingUserId => ErrorKind::Unauthorized,
            LoyaltyError::Api(e) => e.kind(),
            LoyaltyError::Decode(_) => ErrorKind::InvalidResponse,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, LoyaltyError::Api(ApiError::Cancelled))
    }

    /// Message a screen shows in place of its data
    ///
    /// Backend rejections use the capability's own wording; session and
    /// transport problems keep their generic text.
    pub fn screen_message(&self, capability: Capability) -> String {
        match self {
            LoyaltyError::Api(ApiError::Status { status, .. })
                if !ErrorKind::from_status(*status).is_auth_failure() =>
            {
                capability.failure_message().to_string()
            }
            LoyaltyError::Api(e) => e.user_message(),
            LoyaltyError::Decode(_) => capability.failure_message().to_string(),
            other => other.to_string(),
        }
    }

    /// Log the error with appropriate level
    pub fn log(&self) {
        match self {
            LoyaltyError::Api(e) => e.log(),
            LoyaltyError::Decode(e) => {
                tracing::warn!(error = %e, "Malformed backend reply");
            }
            LoyaltyError::Unsupported { role, capability } => {
                tracing::warn!(
                    role = %role,
                    capability = %capability,
                    "Capability requested for wrong role"
                );
            }
            _ => {
                tracing::debug!(error = %self, "Loyalty error");
            }
        }
    }
}

impl From<LoyaltyError> for AppError {
    fn from(err: LoyaltyError) -> Self {
        match err {
            LoyaltyError::Api(e) => AppError::from(e),
            LoyaltyError::Decode(e) => AppError::from(e),
            LoyaltyError::MissingUserId => {
                AppError::unauthorized("No user id found").with_action("Please log in again")
            }
            other => AppError::new(other.kind(), other.to_string()),
        }
    }
}
