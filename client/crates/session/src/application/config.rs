//! Application Configuration
//!
//! Route layout of the backend auth endpoints and the fixed strings the
//! login screen shows.

use crate::domain::value_object::role::Role;
use crate::error::{
    INCOMPLETE_GRANT_MESSAGE, INVALID_CREDENTIALS_MESSAGE, SessionError,
    UNEXPECTED_STATUS_MESSAGE,
};

/// Session application configuration
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Prefix shared by every backend route
    pub api_prefix: String,
    /// Shown for any rejected login (bad password, wrong role, no network)
    pub invalid_credentials_message: String,
    /// Shown when a 200 reply lacks the token or user id
    pub incomplete_grant_message: String,
    /// Shown for a 2xx reply other than 200
    pub unexpected_status_message: String,
    /// Shown after a successful registration
    pub account_created_message: String,
    /// Shown for a 2xx registration reply other than 200
    pub account_failed_message: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            api_prefix: "/api".to_string(),
            invalid_credentials_message: INVALID_CREDENTIALS_MESSAGE.to_string(),
            incomplete_grant_message: INCOMPLETE_GRANT_MESSAGE.to_string(),
            unexpected_status_message: UNEXPECTED_STATUS_MESSAGE.to_string(),
            account_created_message: "Account created successfully".to_string(),
            account_failed_message: "Failed to create account".to_string(),
        }
    }
}

impl SessionConfig {
    /// `/api/users/login`, `/api/retailer/login`, `/api/manufacturer/login`
    pub fn login_path(&self, role: Role) -> String {
        format!("{}/{}/login", self.api_prefix, role.path_segment())
    }

    /// `/api/users/register`, `/api/retailer/register`
    pub fn register_path(&self, role: Role) -> String {
        format!("{}/{}/register", self.api_prefix, role.path_segment())
    }

    /// Text stored in `AuthState::error` for a failed login
    ///
    /// Everything that went wrong on the wire collapses into the generic
    /// message; only the two malformed-success cases are told apart.
    pub fn login_failure_message(&self, err: &SessionError) -> String {
        match err {
            SessionError::IncompleteGrant => self.incomplete_grant_message.clone(),
            SessionError::UnexpectedStatus(_) => self.unexpected_status_message.clone(),
            SessionError::Validation(_)
            | SessionError::UnknownRole(_)
            | SessionError::LoginInProgress => err.user_message(),
            _ => self.invalid_credentials_message.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use platform::ApiError;

    #[test]
    fn test_paths() {
        let config = SessionConfig::default();
        assert_eq!(config.login_path(Role::User), "/api/users/login");
        assert_eq!(config.login_path(Role::Retailer), "/api/retailer/login");
        assert_eq!(
            config.login_path(Role::Manufacturer),
            "/api/manufacturer/login"
        );
        assert_eq!(config.register_path(Role::User), "/api/users/register");
    }

    #[test]
    fn test_failure_messages_hide_cause() {
        let config = SessionConfig::default();
        let network = SessionError::Api(ApiError::Setup("boom".into()));
        let rejected = SessionError::Api(ApiError::Status {
            status: 401,
            body: "wrong password".into(),
        });
        assert_eq!(
            config.login_failure_message(&network),
            INVALID_CREDENTIALS_MESSAGE
        );
        assert_eq!(
            config.login_failure_message(&rejected),
            INVALID_CREDENTIALS_MESSAGE
        );
        assert_eq!(
            config.login_failure_message(&SessionError::IncompleteGrant),
            INCOMPLETE_GRANT_MESSAGE
        );
    }
}
