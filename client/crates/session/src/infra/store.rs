//! Session repository over a [`KeyValueStore`]

use std::sync::Arc;

use platform::KeyValueStore;
use platform::storage::{StoreResult, keys};
use tokio::sync::broadcast;

use crate::domain::entity::session::{Session, SessionEvent, StoredSession};
use crate::domain::repository::SessionRepository;
use crate::error::SessionResult;

/// Buffered change notifications per subscriber
const EVENT_CAPACITY: usize = 16;

/// Credential-store session repository
pub struct StoreSessionRepository<S>
where
    S: KeyValueStore,
{
    store: Arc<S>,
    events: broadcast::Sender<SessionEvent>,
}

impl<S> StoreSessionRepository<S>
where
    S: KeyValueStore,
{
    pub fn new(store: Arc<S>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self { store, events }
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    fn notify(&self, event: SessionEvent) {
        // No subscribers is fine
        let _ = self.events.send(event);
    }
}

impl<S> StoreSessionRepository<S>
where
    S: KeyValueStore + Sync,
{
    async fn write_session(&self, session: &Session) -> StoreResult<()> {
        self.store.set(keys::TOKEN, session.token.as_str()).await?;
        self.store
            .set(keys::LOGGED_ID, session.user_id.as_str())
            .await?;
        self.store.set(keys::ROLE, &session.role).await
    }
}

impl<S> SessionRepository for StoreSessionRepository<S>
where
    S: KeyValueStore + Sync,
{
    async fn load(&self) -> StoredSession {
        StoredSession {
            token: self.store.get(keys::TOKEN).await,
            user_id: self.store.get(keys::LOGGED_ID).await,
            role: self.store.get(keys::ROLE).await,
        }
    }

    async fn save(&self, session: &Session) -> SessionResult<()> {
        if let Err(e) = self.write_session(session).await {
            // Never leave a token behind without its id and role
            for key in keys::SESSION {
                if let Err(cleanup) = self.store.remove(key).await {
                    tracing::warn!(key, error = %cleanup, "Could not roll back partial session");
                }
            }
            return Err(e.into());
        }

        self.notify(SessionEvent::Saved {
            role: session.role.clone(),
        });
        Ok(())
    }

    async fn clear(&self) -> SessionResult<()> {
        for key in keys::SESSION {
            self.store.remove(key).await?;
        }
        self.notify(SessionEvent::Cleared);
        Ok(())
    }

    async fn wipe(&self) -> SessionResult<()> {
        self.store.clear().await?;
        self.notify(SessionEvent::Wiped);
        Ok(())
    }

    fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }
}
