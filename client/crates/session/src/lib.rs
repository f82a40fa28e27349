//! Session (Authentication) Client Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository traits
//! - `application/` - Use cases and the session manager
//! - `infra/` - Credential store and HTTP implementations
//! - `presentation/` - Role-based router guard
//!
//! ## Features
//! - Email + password login per role (user, retailer, manufacturer)
//! - Self-service registration for users and retailers
//! - Observable auth state (`tokio::sync::watch`) with single-flight login
//! - Store-first routing guard re-evaluated on every state change
//!
//! ## Trust Model
//! - The backend is the sole judge of token validity; no client-side TTL
//! - The role the backend returns is the one persisted and routed on
//! - Logout is local only

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::SessionConfig;
pub use application::manager::SessionManager;
pub use domain::{AuthPhase, AuthState, Role};
pub use error::{SessionError, SessionResult};
pub use infra::{http::HttpAuthGateway, store::StoreSessionRepository};
pub use presentation::guard::{GuardDecision, Navigator, RouterGuard, ScreenGroup};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

pub mod config {
    pub use crate::application::config::*;
}

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
}

#[cfg(test)]
mod tests;
