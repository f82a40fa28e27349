//! Repository Traits
//!
//! Interfaces for session persistence and the backend auth endpoints.
//! Implementations are in the infrastructure layer.

use tokio::sync::broadcast;
use tokio_util::sync::CancellationToken;

use crate::domain::entity::credentials::{Credentials, Registration};
use crate::domain::entity::session::{LoginGrant, Session, SessionEvent, StoredSession};
use crate::domain::value_object::role::Role;
use crate::error::SessionResult;

/// Session repository trait
///
/// Single owner of the `token` / `loggedId` / `role` keys. Every write is
/// announced to subscribers.
#[trait_variant::make(SessionRepository: Send)]
pub trait LocalSessionRepository {
    /// Read the three keys; absent keys are `None`, never an error
    async fn load(&self) -> StoredSession;

    /// Persist a complete session
    async fn save(&self, session: &Session) -> SessionResult<()>;

    /// Remove the three session keys (no-op when absent)
    async fn clear(&self) -> SessionResult<()>;

    /// Remove every app-scoped key
    async fn wipe(&self) -> SessionResult<()>;

    /// Change notifications
    fn subscribe(&self) -> broadcast::Receiver<SessionEvent>;
}

/// Backend auth endpoints
#[trait_variant::make(AuthGateway: Send)]
pub trait LocalAuthGateway {
    /// POST the credentials to the role's login route
    ///
    /// Any 2xx reply is returned as a grant; non-2xx replies and transport
    /// failures are errors.
    async fn login(
        &self,
        role: Role,
        credentials: &Credentials,
        cancel: &CancellationToken,
    ) -> SessionResult<LoginGrant>;

    /// POST a registration to the role's register route
    async fn register(
        &self,
        role: Role,
        registration: &Registration,
        cancel: &CancellationToken,
    ) -> SessionResult<LoginGrant>;
}
