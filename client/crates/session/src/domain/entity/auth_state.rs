//! Auth State Entity
//!
//! In-memory shadow of the persisted session. It is never merged: every
//! transition builds a fresh value. On cold start it sits at its defaults
//! (`authenticated = None`) even when the store holds a valid session.

use serde::Serialize;

use crate::domain::value_object::role::Role;

/// Observable auth state
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthState {
    /// `None` = not yet determined
    pub authenticated: Option<bool>,
    pub username: Option<String>,
    pub role: Option<Role>,
    pub error: Option<String>,
    /// Set by every login attempt, cleared by logout
    pub attempted_login: bool,
    /// A login request is awaiting the backend
    pub authenticating: bool,
}

/// Coarse state machine view of [`AuthState`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthPhase {
    Unauthenticated,
    Authenticating,
    Authenticated(Option<Role>),
    Failed(String),
}

impl AuthState {
    /// After logout (or a cold start with an empty store)
    pub fn signed_out() -> Self {
        Self {
            authenticated: Some(false),
            ..Self::default()
        }
    }

    /// Request in flight
    pub fn authenticating(username: impl Into<String>, role: Role) -> Self {
        Self {
            authenticated: None,
            username: Some(username.into()),
            role: Some(role),
            error: None,
            attempted_login: true,
            authenticating: true,
        }
    }

    pub fn authenticated(username: Option<String>, role: Option<Role>) -> Self {
        Self {
            authenticated: Some(true),
            username,
            role,
            error: None,
            attempted_login: true,
            authenticating: false,
        }
    }

    /// Terminal failure of one attempt; the message stays on screen
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            authenticated: Some(false),
            username: None,
            role: None,
            error: Some(message.into()),
            attempted_login: true,
            authenticating: false,
        }
    }

    /// Session found in the store at startup
    pub fn restored(role: Option<Role>) -> Self {
        Self {
            authenticated: Some(true),
            role,
            ..Self::default()
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated == Some(true)
    }

    /// A login was tried and did not succeed
    pub fn has_failed_attempt(&self) -> bool {
        self.attempted_login && !self.is_authenticated()
    }

    pub fn phase(&self) -> AuthPhase {
        if self.authenticating {
            return AuthPhase::Authenticating;
        }
        match (self.authenticated, &self.error) {
            (Some(true), _) => AuthPhase::Authenticated(self.role),
            (_, Some(err)) => AuthPhase::Failed(err.clone()),
            _ => AuthPhase::Unauthenticated,
        }
    }
}
