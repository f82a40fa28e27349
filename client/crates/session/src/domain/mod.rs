//! Domain Layer
//!
//! Contains entities, value objects, and repository traits.

pub mod entity;
pub mod repository;
pub mod value_object;

// Re-exports
pub use entity::{
    auth_state::{AuthPhase, AuthState},
    credentials::{Credentials, Registration},
    session::{LoginGrant, Session, SessionEvent, StoredSession},
};
pub use repository::{AuthGateway, SessionRepository};
pub use value_object::role::Role;
