//! Display name given at registration

use serde::{Deserialize, Serialize};

use crate::error::{SessionError, SessionResult};

pub const DISPLAY_NAME_MIN_LENGTH: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DisplayName(String);

impl DisplayName {
    /// Trimmed, at least three characters
    pub fn new(name: impl AsRef<str>) -> SessionResult<Self> {
        let name = name.as_ref().trim();
        if name.chars().count() < DISPLAY_NAME_MIN_LENGTH {
            return Err(SessionError::Validation(format!(
                "Name must be at least {} characters",
                DISPLAY_NAME_MIN_LENGTH
            )));
        }
        Ok(Self(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
