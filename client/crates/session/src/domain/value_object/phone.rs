//! Phone number value object (10-digit national number)

use serde::{Deserialize, Serialize};

use crate::error::{SessionError, SessionResult};

pub const PHONE_DIGITS: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Phone(String);

impl Phone {
    pub fn new(phone: impl AsRef<str>) -> SessionResult<Self> {
        let phone = phone.as_ref().trim();
        if phone.len() != PHONE_DIGITS || !phone.chars().all(|c| c.is_ascii_digit()) {
            return Err(SessionError::Validation(format!(
                "Phone number must be exactly {} digits",
                PHONE_DIGITS
            )));
        }
        Ok(Self(phone.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
