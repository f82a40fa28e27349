//! Session Manager
//!
//! Owns the observable [`AuthState`] and drives every transition:
//! `Unauthenticated -> Authenticating -> Authenticated | Failed`, and back to
//! `Unauthenticated` on logout. Each transition publishes a freshly built
//! state on a watch channel; nothing is merged with the previous value.

use std::sync::Arc;

use platform::CancellationToken;
use tokio::sync::{Mutex, watch};

use crate::application::config::SessionConfig;
use crate::application::login::{LoginOutput, LoginUseCase};
use crate::application::logout::LogoutUseCase;
use crate::application::register::{RegisterOutput, RegisterUseCase};
use crate::domain::entity::auth_state::AuthState;
use crate::domain::entity::credentials::{Credentials, Registration};
use crate::domain::repository::{AuthGateway, SessionRepository};
use crate::domain::value_object::role::Role;
use crate::error::{SessionError, SessionResult};

/// Auth session manager
pub struct SessionManager<R, G>
where
    R: SessionRepository,
    G: AuthGateway,
{
    session_repo: Arc<R>,
    login: LoginUseCase<R, G>,
    logout: LogoutUseCase<R>,
    register: RegisterUseCase<R, G>,
    config: Arc<SessionConfig>,
    state: watch::Sender<AuthState>,
    // Held for the whole login attempt
    login_gate: Mutex<()>,
}

impl<R, G> SessionManager<R, G>
where
    R: SessionRepository,
    G: AuthGateway,
{
    pub fn new(session_repo: Arc<R>, gateway: Arc<G>, config: Arc<SessionConfig>) -> Self {
        let (state, _) = watch::channel(AuthState::default());
        Self {
            login: LoginUseCase::new(session_repo.clone(), gateway.clone()),
            logout: LogoutUseCase::new(session_repo.clone()),
            register: RegisterUseCase::new(session_repo.clone(), gateway, config.clone()),
            session_repo,
            config,
            state,
            login_gate: Mutex::new(()),
        }
    }

    /// Current state snapshot
    pub fn state(&self) -> AuthState {
        self.state.borrow().clone()
    }

    /// Receiver that observes every published state
    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.state.subscribe()
    }

    pub fn repository(&self) -> &Arc<R> {
        &self.session_repo
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Publish the state matching whatever the store holds (cold start)
    pub async fn restore(&self) -> AuthState {
        let stored = self.session_repo.load().await;
        let state = if stored.is_routable() {
            AuthState::restored(stored.known_role())
        } else {
            AuthState::signed_out()
        };

        tracing::debug!(
            authenticated = state.is_authenticated(),
            role = ?state.role,
            "Session restored from store"
        );

        self.publish(state.clone());
        state
    }

    /// Log in with an email and password for the selected role
    ///
    /// Failures are also published as `AuthState::failed`; the returned
    /// error carries the cause for logging. A second call while one is in
    /// flight is refused without touching the state.
    pub async fn login(
        &self,
        identifier: &str,
        password: impl Into<String>,
        role: Role,
        cancel: &CancellationToken,
    ) -> SessionResult<LoginOutput> {
        let Ok(_gate) = self.login_gate.try_lock() else {
            tracing::debug!(role = %role, "Login ignored, another attempt is in flight");
            return Err(SessionError::LoginInProgress);
        };

        let credentials = match Credentials::new(identifier, password) {
            Ok(credentials) => credentials,
            Err(e) => {
                self.publish(AuthState::failed(self.config.login_failure_message(&e)));
                return Err(e);
            }
        };

        let previous = self.state();
        self.publish(AuthState::authenticating(credentials.identifier.as_str(), role));

        match self.login.execute(&credentials, role, cancel).await {
            Ok(output) => {
                self.publish(AuthState::authenticated(
                    Some(credentials.identifier.as_str().to_string()),
                    output.granted_role(),
                ));
                Ok(output)
            }
            Err(SessionError::Cancelled) => {
                tracing::debug!(role = %role, "Login cancelled");
                self.publish(previous);
                Err(SessionError::Cancelled)
            }
            Err(e) => {
                e.log();
                self.publish(AuthState::failed(self.config.login_failure_message(&e)));
                Err(e)
            }
        }
    }

    /// Register a user or retailer account
    ///
    /// The auth state only changes when the backend signs the account in.
    pub async fn register(
        &self,
        name: &str,
        place: &str,
        password: impl Into<String>,
        phone: &str,
        role: Role,
        cancel: &CancellationToken,
    ) -> SessionResult<RegisterOutput> {
        let registration = Registration::new(name, place, password, phone)?;
        let output = self.register.execute(&registration, role, cancel).await?;

        if let Some(session) = &output.session {
            self.publish(AuthState::authenticated(None, session.known_role()));
        }
        Ok(output)
    }

    /// Remove the session keys and reset to `Unauthenticated`
    ///
    /// Safe to call repeatedly. The state is reset even if the store fails.
    pub async fn logout(&self) -> SessionResult<()> {
        let result = self.logout.execute().await;
        self.publish(AuthState::signed_out());
        result
    }

    /// Remove every app-scoped key and reset to `Unauthenticated`
    pub async fn clear_storage(&self) -> SessionResult<()> {
        let result = self.logout.execute_wipe().await;
        self.publish(AuthState::signed_out());
        result
    }

    fn publish(&self, state: AuthState) {
        tracing::debug!(phase = ?state.phase(), "Auth state changed");
        self.state.send_replace(state);
    }
}
