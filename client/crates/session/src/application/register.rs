//! Register Use Case
//!
//! Self-service sign up for users and retailers. A reply carrying a token
//! and id signs the new account in straight away.

use std::sync::Arc;

use platform::{ApiError, CancellationToken};

use crate::application::config::SessionConfig;
use crate::domain::entity::credentials::Registration;
use crate::domain::entity::session::Session;
use crate::domain::repository::{AuthGateway, SessionRepository};
use crate::domain::value_object::role::Role;
use crate::error::{SessionError, SessionResult};

/// Register output
#[derive(Debug, Clone)]
pub struct RegisterOutput {
    /// Present when the backend signed the new account in
    pub session: Option<Session>,
    /// Confirmation text for the screen
    pub message: String,
}

/// Register use case
pub struct RegisterUseCase<R, G>
where
    R: SessionRepository,
    G: AuthGateway,
{
    session_repo: Arc<R>,
    gateway: Arc<G>,
    config: Arc<SessionConfig>,
}

impl<R, G> RegisterUseCase<R, G>
where
    R: SessionRepository,
    G: AuthGateway,
{
    pub fn new(session_repo: Arc<R>, gateway: Arc<G>, config: Arc<SessionConfig>) -> Self {
        Self {
            session_repo,
            gateway,
            config,
        }
    }

    pub async fn execute(
        &self,
        registration: &Registration,
        role: Role,
        cancel: &CancellationToken,
    ) -> SessionResult<RegisterOutput> {
        if !role.can_self_register() {
            return Err(SessionError::RegistrationNotAllowed(role));
        }

        let grant = match self.gateway.register(role, registration, cancel).await {
            Ok(grant) => grant,
            Err(SessionError::Api(ApiError::Cancelled)) => return Err(SessionError::Cancelled),
            Err(e) => {
                e.log();
                return Err(e);
            }
        };

        if !grant.is_ok_status() {
            return Err(SessionError::Rejected(self.config.account_failed_message.clone()));
        }

        let session = grant.session(role);
        if let Some(session) = &session {
            self.session_repo.save(session).await?;
            tracing::info!(
                user_id = %session.user_id,
                role = %session.role,
                "Account registered and signed in"
            );
        } else {
            tracing::info!(role = %role, "Account registered");
        }

        Ok(RegisterOutput {
            session,
            message: self.config.account_created_message.clone(),
        })
    }
}
