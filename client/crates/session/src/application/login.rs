//! Login Use Case
//!
//! Exchanges credentials for a session and persists it.

use std::sync::Arc;

use platform::{ApiError, CancellationToken};

use crate::domain::entity::credentials::Credentials;
use crate::domain::entity::session::Session;
use crate::domain::repository::{AuthGateway, SessionRepository};
use crate::domain::value_object::role::Role;
use crate::error::{SessionError, SessionResult};

/// Login output
#[derive(Debug, Clone)]
pub struct LoginOutput {
    pub session: Session,
    /// Role the caller asked for
    pub requested_role: Role,
}

impl LoginOutput {
    /// Role the backend granted, when it is one the client knows
    pub fn granted_role(&self) -> Option<Role> {
        self.session.known_role()
    }

    /// The backend answered with a different role than the one selected
    pub fn role_mismatch(&self) -> bool {
        self.granted_role() != Some(self.requested_role)
    }
}

/// Login use case
pub struct LoginUseCase<R, G>
where
    R: SessionRepository,
    G: AuthGateway,
{
    session_repo: Arc<R>,
    gateway: Arc<G>,
}

impl<R, G> LoginUseCase<R, G>
where
    R: SessionRepository,
    G: AuthGateway,
{
    pub fn new(session_repo: Arc<R>, gateway: Arc<G>) -> Self {
        Self {
            session_repo,
            gateway,
        }
    }

    pub async fn execute(
        &self,
        credentials: &Credentials,
        role: Role,
        cancel: &CancellationToken,
    ) -> SessionResult<LoginOutput> {
        let grant = match self.gateway.login(role, credentials, cancel).await {
            Ok(grant) => grant,
            Err(SessionError::Api(ApiError::Cancelled)) | Err(SessionError::Cancelled) => {
                return Err(SessionError::Cancelled);
            }
            Err(e) => {
                e.log();
                return Err(SessionError::InvalidCredentials);
            }
        };

        if !grant.is_ok_status() {
            return Err(SessionError::UnexpectedStatus(grant.status));
        }

        // Nothing is written unless both token and id came back
        let session = grant
            .session(role)
            .ok_or(SessionError::IncompleteGrant)?;

        self.session_repo.save(&session).await?;

        let output = LoginOutput {
            session,
            requested_role: role,
        };

        if output.role_mismatch() {
            tracing::warn!(
                requested = %role,
                granted = %output.session.role,
                "Backend granted a different role than requested"
            );
        }

        tracing::info!(
            user_id = %output.session.user_id,
            role = %output.session.role,
            "User signed in"
        );

        Ok(output)
    }
}
