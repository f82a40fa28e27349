//! Email Value Object
//!
//! Login identifier and the handle retailers use to link users.
//! Basic validation only; the backend decides whether the account exists.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::{SessionError, SessionResult};

/// Maximum email length (per RFC 5321)
const EMAIL_MAX_LENGTH: usize = 254;

/// Email address value object
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    /// Create a new email with validation
    pub fn new(email: impl Into<String>) -> SessionResult<Self> {
        let email = email.into().trim().to_lowercase();

        if email.is_empty() {
            return Err(SessionError::Validation("Email cannot be empty".into()));
        }

        if email.len() > EMAIL_MAX_LENGTH {
            return Err(SessionError::Validation(format!(
                "Email must be at most {} characters",
                EMAIL_MAX_LENGTH
            )));
        }

        if !Self::is_valid_format(&email) {
            return Err(SessionError::Validation("Invalid email format".into()));
        }

        Ok(Self(email))
    }

    /// Exactly one `@`, non-empty local part, dotted domain
    fn is_valid_format(email: &str) -> bool {
        let Some((local, domain)) = email.split_once('@') else {
            return false;
        };

        if local.is_empty() || local.len() > 64 || domain.contains('@') {
            return false;
        }

        if domain.is_empty() || !domain.contains('.') {
            return false;
        }

        if !domain
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-')
        {
            return false;
        }

        !(domain.starts_with(['.', '-']) || domain.ends_with(['.', '-']))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn domain(&self) -> &str {
        self.0.split('@').nth(1).unwrap_or("")
    }
}

impl FromStr for Email {
    type Err = SessionError;

    fn from_str(s: &str) -> SessionResult<Self> {
        Email::new(s)
    }
}

impl std::fmt::Display for Email {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_email_is_normalized() {
        let email = Email::new("  A@B.com ").unwrap();
        assert_eq!(email.as_str(), "a@b.com");
        assert_eq!(email.domain(), "b.com");
    }

    #[test]
    fn test_invalid_emails() {
        assert!(Email::new("").is_err());
        assert!(Email::new("plain").is_err());
        assert!(Email::new("a@@b.com").is_err());
        assert!(Email::new("a@b").is_err());
        assert!(Email::new("@b.com").is_err());
        assert!(Email::new("a@.b.com").is_err());
        assert!(Email::new("a@b.com-").is_err());
        assert!(Email::new(format!("a@{}.com", "b".repeat(260))).is_err());
    }
}
