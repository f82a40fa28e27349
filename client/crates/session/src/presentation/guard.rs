//! Role-Based Router Guard
//!
//! Decides which top-level screen group is visible. The persisted store is
//! consulted first because the in-memory auth state is still at its defaults
//! on cold start; the auth state only matters when the store holds no
//! routable session.
//!
//! ## Algorithm
//! 1. Read `role` and `token` from the store.
//! 2. Both present: the group for `role` (unknown role: public login).
//! 3. Otherwise, after a login attempt that did not succeed: stay put, so
//!    the error stays visible.
//! 4. Otherwise: public login.

use std::sync::Arc;

use derive_more::Display;
use platform::CancellationToken;
use tokio::sync::{broadcast, watch};

use crate::domain::entity::auth_state::AuthState;
use crate::domain::entity::session::StoredSession;
use crate::domain::repository::SessionRepository;
use crate::domain::value_object::role::Role;

/// Top-level screen group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum ScreenGroup {
    /// Login / registration
    #[display("public")]
    Public,
    #[display("user")]
    User,
    #[display("retailer")]
    Retailer,
    #[display("manufacturer")]
    Manufacturer,
}

impl ScreenGroup {
    pub const fn for_role(role: Role) -> Self {
        match role {
            Role::User => ScreenGroup::User,
            Role::Retailer => ScreenGroup::Retailer,
            Role::Manufacturer => ScreenGroup::Manufacturer,
        }
    }

    /// Group for a persisted role string; unrecognized values go public
    pub fn from_role_code(code: &str) -> Self {
        Role::from_code(code).map_or(ScreenGroup::Public, Self::for_role)
    }

    pub const fn role(&self) -> Option<Role> {
        match self {
            ScreenGroup::Public => None,
            ScreenGroup::User => Some(Role::User),
            ScreenGroup::Retailer => Some(Role::Retailer),
            ScreenGroup::Manufacturer => Some(Role::Manufacturer),
        }
    }
}

/// Outcome of one guard evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    Redirect(ScreenGroup),
    /// Leave the current screen alone
    Stay,
}

/// Pure guard rule
pub fn decide(stored: &StoredSession, state: &AuthState) -> GuardDecision {
    if stored.is_routable() {
        let role = stored.role.as_deref().unwrap_or_default();
        return GuardDecision::Redirect(ScreenGroup::from_role_code(role));
    }

    if state.has_failed_attempt() {
        return GuardDecision::Stay;
    }

    GuardDecision::Redirect(ScreenGroup::Public)
}

/// Navigation sink (the UI shell)
pub trait Navigator: Send {
    fn navigate(&mut self, group: ScreenGroup);
}

/// Guard bound to a session repository
pub struct RouterGuard<R>
where
    R: SessionRepository,
{
    session_repo: Arc<R>,
}

impl<R> Clone for RouterGuard<R>
where
    R: SessionRepository,
{
    fn clone(&self) -> Self {
        Self {
            session_repo: self.session_repo.clone(),
        }
    }
}

impl<R> RouterGuard<R>
where
    R: SessionRepository,
{
    pub fn new(session_repo: Arc<R>) -> Self {
        Self { session_repo }
    }

    /// Evaluate once against the current store contents
    pub async fn evaluate(&self, state: &AuthState) -> GuardDecision {
        let stored = self.session_repo.load().await;
        decide(&stored, state)
    }

    /// Re-evaluate on mount and on every auth state or store change
    ///
    /// Redirects to the group already shown are skipped. Returns the
    /// navigator when `shutdown` fires or the auth state sender is dropped.
    pub async fn run<N>(
        &self,
        mut states: watch::Receiver<AuthState>,
        mut navigator: N,
        shutdown: CancellationToken,
    ) -> N
    where
        N: Navigator,
    {
        let mut events = self.session_repo.subscribe();
        let mut events_open = true;
        let mut current: Option<ScreenGroup> = None;

        loop {
            let state = states.borrow_and_update().clone();
            if let GuardDecision::Redirect(group) = self.evaluate(&state).await {
                if current != Some(group) {
                    tracing::info!(from = ?current, to = %group, "Guard redirect");
                    navigator.navigate(group);
                    current = Some(group);
                }
            }

            tokio::select! {
                _ = shutdown.cancelled() => break,
                changed = states.changed() => {
                    if changed.is_err() {
                        break;
                    }
                }
                event = events.recv(), if events_open => {
                    if let Err(broadcast::error::RecvError::Closed) = event {
                        events_open = false;
                    }
                }
            }
        }

        tracing::debug!("Router guard stopped");
        navigator
    }
}
