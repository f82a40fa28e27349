//! Login and registration inputs, validated before any request is made

use crate::domain::value_object::{
    display_name::DisplayName, login_id::LoginId, password::Password, phone::Phone,
};
use crate::error::{SessionError, SessionResult};

/// Login form
#[derive(Debug, Clone)]
pub struct Credentials {
    pub identifier: LoginId,
    pub password: Password,
}

impl Credentials {
    pub fn new(identifier: &str, password: impl Into<String>) -> SessionResult<Self> {
        Ok(Self {
            identifier: LoginId::new(identifier)?,
            password: Password::new(password)?,
        })
    }
}

/// Registration form (users and retailers)
#[derive(Debug, Clone)]
pub struct Registration {
    pub name: DisplayName,
    pub place: String,
    pub password: Password,
    pub phone: Phone,
}

impl Registration {
    pub fn new(
        name: &str,
        place: &str,
        password: impl Into<String>,
        phone: &str,
    ) -> SessionResult<Self> {
        let place = place.trim();
        if place.is_empty() {
            return Err(SessionError::Validation("Place cannot be empty".into()));
        }

        Ok(Self {
            name: DisplayName::new(name)?,
            place: place.to_string(),
            password: Password::new(password)?,
            phone: Phone::new(phone)?,
        })
    }
}
