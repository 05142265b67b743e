use crate::session::SessionId;

use bm_core::AuthSession;

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::RwLock;
use tokio::time::Instant;
use uuid::Uuid;

/// Signed-in browser sessions, in memory. Lost on restart, after which users
/// sign in again.
#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<HashMap<SessionId, StoredSession>>>,
}

struct StoredSession {
    session: AuthSession,
    /// Last successful revalidation
    last_used: Instant,
}

impl StoredSession {
    fn new(session: AuthSession) -> Self {
        Self {
            session,
            last_used: Instant::now(),
        }
    }

    /// Nothing can bring it back: unused for too long, or expired with no
    /// way to refresh.
    fn is_dead(&self, idle_timeout: Duration) -> bool {
        self.last_used.elapsed() >= idle_timeout
            || (self.session.is_expired(Utc::now()) && !self.session.has_refresh_token())
    }
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, id: SessionId, session: AuthSession) {
        let mut inner = self.inner.write().await;
        log::info!("Session {id} opened for {}", session.user.email);
        inner.insert(id, StoredSession::new(session));
    }

    pub async fn get(&self, id: &SessionId) -> Option<AuthSession> {
        let inner = self.inner.read().await;
        inner.get(id).map(|stored| stored.session.clone())
    }

    /// Overwrite after a refresh or user re-read and mark the session used.
    /// No-op if the session was removed in the meantime.
    pub async fn replace(&self, id: &SessionId, session: AuthSession) {
        let mut inner = self.inner.write().await;
        if let Some(existing) = inner.get_mut(id) {
            *existing = StoredSession::new(session);
        }
    }

    pub async fn remove(&self, id: &SessionId) -> Option<AuthSession> {
        let mut inner = self.inner.write().await;
        let removed = inner.remove(id).map(|stored| stored.session);
        if removed.is_some() {
            log::info!("Session {id} closed");
        }
        removed
    }

    /// Sessions of `owner`, most recently used first.
    pub async fn owner_sessions(&self, owner: Uuid) -> Vec<SessionId> {
        let inner = self.inner.read().await;
        let mut sessions: Vec<_> = inner
            .iter()
            .filter(|(_, stored)| stored.session.user.id == owner)
            .map(|(id, stored)| (id.clone(), stored.last_used))
            .collect();
        sessions.sort_by(|a, b| b.1.cmp(&a.1));
        sessions.into_iter().map(|(id, _)| id).collect()
    }

    /// Drop sessions unused for `idle_timeout`, and expired ones that cannot be
    /// refreshed. Returns how many were dropped.
    pub async fn sweep(&self, idle_timeout: Duration) -> usize {
        let mut inner = self.inner.write().await;
        let before = inner.len();
        inner.retain(|id, stored| {
            let dead = stored.is_dead(idle_timeout);
            if dead {
                log::info!("Session {id} for {} expired", stored.session.user.email);
            }
            !dead
        });
        before - inner.len()
    }

    pub async fn len(&self) -> usize {
        let inner = self.inner.read().await;
        inner.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
