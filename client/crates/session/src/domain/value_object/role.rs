use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::SessionError;

/// Account type; decides the screen group and the API routes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// End user (plumber)
    User,
    Retailer,
    Manufacturer,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::User, Role::Retailer, Role::Manufacturer];

    /// Value persisted under the `role` key
    #[inline]
    pub const fn code(&self) -> &'static str {
        use Role::*;
        match self {
            User => "user",
            Retailer => "retailer",
            Manufacturer => "manufacturer",
        }
    }

    /// Path segment of the role's API routes (`/api/<segment>/...`)
    #[inline]
    pub const fn path_segment(&self) -> &'static str {
        use Role::*;
        match self {
            User => "users",
            Retailer => "retailer",
            Manufacturer => "manufacturer",
        }
    }

    /// Manufacturers are provisioned by the backend
    #[inline]
    pub const fn can_self_register(&self) -> bool {
        matches!(self, Role::User | Role::Retailer)
    }

    /// Parse a persisted role; `None` for anything unrecognized
    #[inline]
    pub fn from_code(code: &str) -> Option<Self> {
        use Role::*;
        match code {
            "user" => Some(User),
            "retailer" => Some(Retailer),
            "manufacturer" => Some(Manufacturer),
            _ => None,
        }
    }
}

impl FromStr for Role {
    type Err = SessionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::from_code(&s.trim().to_ascii_lowercase())
            .ok_or_else(|| SessionError::UnknownRole(s.to_string()))
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_from_code() {
        assert_eq!(Role::from_code("user"), Some(Role::User));
        assert_eq!(Role::from_code("retailer"), Some(Role::Retailer));
        assert_eq!(Role::from_code("manufacturer"), Some(Role::Manufacturer));
        assert_eq!(Role::from_code("admin"), None);
        assert_eq!(Role::from_code("User"), None);
    }

    #[test]
    fn test_role_from_str_is_lenient() {
        assert_eq!(" Retailer ".parse::<Role>().unwrap(), Role::Retailer);
        assert!(matches!(
            "plumber".parse::<Role>(),
            Err(SessionError::UnknownRole(s)) if s == "plumber"
        ));
    }

    #[test]
    fn test_role_path_segments() {
        assert_eq!(Role::User.path_segment(), "users");
        assert_eq!(Role::Retailer.path_segment(), "retailer");
        assert_eq!(Role::Manufacturer.path_segment(), "manufacturer");
    }

    #[test]
    fn test_role_display_roundtrip() {
        for role in Role::ALL {
            assert_eq!(Role::from_code(&role.to_string()), Some(role));
        }
    }

    #[test]
    fn test_self_registration() {
        assert!(Role::User.can_self_register());
        assert!(Role::Retailer.can_self_register());
        assert!(!Role::Manufacturer.can_self_register());
    }
}
