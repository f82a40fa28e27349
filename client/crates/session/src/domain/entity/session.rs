//! Session Entity
//!
//! The persisted `{token, loggedId, role}` triple, as written at login and as
//! read back from the credential store.

use crate::domain::value_object::{role::Role, token::SessionToken, user_id::UserId};

/// Complete session, ready to be persisted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: SessionToken,
    pub user_id: UserId,
    /// Role string exactly as the backend returned it
    pub role: String,
}

impl Session {
    /// Role as a known variant; `None` for values the guard cannot route
    pub fn known_role(&self) -> Option<Role> {
        Role::from_code(&self.role)
    }
}

/// Raw store contents; any key may be absent
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoredSession {
    pub token: Option<String>,
    pub user_id: Option<String>,
    pub role: Option<String>,
}

impl StoredSession {
    /// Token and role both present (the guard's redirect condition)
    pub fn is_routable(&self) -> bool {
        self.token.as_deref().is_some_and(|t| !t.is_empty())
            && self.role.as_deref().is_some_and(|r| !r.is_empty())
    }

    pub fn known_role(&self) -> Option<Role> {
        self.role.as_deref().and_then(Role::from_code)
    }

    pub fn is_empty(&self) -> bool {
        self.token.is_none() && self.user_id.is_none() && self.role.is_none()
    }

    /// Promote to a complete session when all three keys are present
    pub fn into_session(self) -> Option<Session> {
        Some(Session {
            token: SessionToken::new(self.token?)?,
            user_id: UserId::new(self.user_id?)?,
            role: self.role.filter(|r| !r.is_empty())?,
        })
    }
}

/// Body of a login or registration reply, before validation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginGrant {
    /// HTTP status of the reply (always 2xx here)
    pub status: u16,
    pub token: Option<String>,
    pub user_id: Option<String>,
    pub role: Option<String>,
    /// Free-text message some endpoints include
    pub message: Option<String>,
}

impl LoginGrant {
    pub fn is_ok_status(&self) -> bool {
        self.status == 200
    }

    /// Session carried by the reply; `None` unless both token and id came back
    ///
    /// The backend role is kept verbatim. `fallback` only fills in a reply
    /// that omits the role altogether.
    pub fn session(&self, fallback: Role) -> Option<Session> {
        let token = SessionToken::new(self.token.clone()?)?;
        let user_id = UserId::new(self.user_id.clone()?)?;
        let role = self
            .role
            .clone()
            .filter(|r| !r.is_empty())
            .unwrap_or_else(|| fallback.code().to_string());
        Some(Session {
            token,
            user_id,
            role,
        })
    }
}

/// Change notification emitted by the session repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// Session written (login or registration)
    Saved { role: String },
    /// Session keys removed (logout)
    Cleared,
    /// Every app-scoped key removed ("clear storage")
    Wiped,
}
