//! Login Identifier Value Object
//!
//! Whatever the user typed into the login field. The backend owns the
//! comparison, so the text is sent exactly as entered.

use serde::Serialize;

use crate::error::{SessionError, SessionResult};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct LoginId(String);

impl LoginId {
    /// Reject blank input; no other checks
    pub fn new(raw: impl Into<String>) -> SessionResult<Self> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(SessionError::Validation("Email cannot be empty".into()));
        }
        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for LoginId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
