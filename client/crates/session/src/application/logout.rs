//! Logout Use Case
//!
//! Purely local: the token stays valid server-side until it expires.

use std::sync::Arc;

use crate::domain::repository::SessionRepository;
use crate::error::SessionResult;

/// Logout use case
pub struct LogoutUseCase<R>
where
    R: SessionRepository,
{
    session_repo: Arc<R>,
}

impl<R> LogoutUseCase<R>
where
    R: SessionRepository,
{
    pub fn new(session_repo: Arc<R>) -> Self {
        Self { session_repo }
    }

    /// Remove the session keys; idempotent
    pub async fn execute(&self) -> SessionResult<()> {
        self.session_repo.clear().await?;
        tracing::info!("User signed out");
        Ok(())
    }

    /// Remove every app-scoped key ("clear storage" screen)
    pub async fn execute_wipe(&self) -> SessionResult<()> {
        self.session_repo.wipe().await?;
        tracing::info!("Local storage cleared");
        Ok(())
    }
}
