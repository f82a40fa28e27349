//! Password Value Object
//!
//! Clear-text password held only for the duration of one login or
//! registration request. Memory is zeroized on drop and never printed.

use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{SessionError, SessionResult};

/// Clear-text password from user input
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Password(String);

impl Password {
    /// Reject empty or whitespace-only input; anything else goes to the backend
    pub fn new(raw: impl Into<String>) -> SessionResult<Self> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(SessionError::Validation("Password cannot be empty".into()));
        }
        Ok(Self(raw))
    }

    /// Clear text for the request body
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Password").field(&"[REDACTED]").finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_password_rejected() {
        assert!(Password::new("").is_err());
        assert!(Password::new("   ").is_err());
        assert_eq!(Password::new(" pw ").unwrap().expose(), " pw ");
    }

    #[test]
    fn test_debug_is_redacted() {
        let pw = Password::new("hunter2").unwrap();
        let printed = format!("{:?}", pw);
        assert!(!printed.contains("hunter2"));
        assert!(printed.contains("REDACTED"));
    }
}
