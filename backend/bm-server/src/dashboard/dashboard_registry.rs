use crate::dashboard::{DashboardServices, DashboardSession};

use bm_supabase::Result as BackendResult;

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use uuid::Uuid;

/// Open dashboard sessions, one per owner.
#[derive(Clone)]
pub struct DashboardRegistry {
    inner: Arc<RwLock<HashMap<Uuid, Arc<DashboardSession>>>>,
    services: DashboardServices,
}

impl DashboardRegistry {
    pub fn new(services: DashboardServices) -> Self {
        Self {
            inner: Arc::new(RwLock::new(HashMap::new())),
            services,
        }
    }

    /// The owner's session, created with a fresh fetch on first use. A session
    /// whose live subscription ended is re-fetched and resubscribed.
    pub async fn open(&self, owner: Uuid, access_token: &str) -> BackendResult<Arc<DashboardSession>> {
        if let Some(session) = self.get(owner).await {
            session.touch().await;
            if session.is_stale().await {
                let rows = self.services.store.list(access_token, owner).await?;
                session.reload(rows).await;
                session.ensure_live(access_token).await;
            }
            return Ok(session);
        }

        let rows = self.services.store.list(access_token, owner).await?;
        let session = {
            let mut inner = self.inner.write().await;
            let session = inner.entry(owner).or_insert_with(|| {
                log::info!("Dashboard opened for {owner} ({} bookmarks)", rows.len());
                Arc::new(DashboardSession::new(owner, rows, self.services.clone()))
            });
            Arc::clone(session)
        };

        session.ensure_live(access_token).await;
        Ok(session)
    }

    pub async fn get(&self, owner: Uuid) -> Option<Arc<DashboardSession>> {
        let inner = self.inner.read().await;
        inner.get(&owner).cloned()
    }

    /// Drop the owner's session once no tab is listening. Returns whether it
    /// was dropped.
    pub async fn release_if_idle(&self, owner: Uuid) -> bool {
        if self.services.broadcaster.subscriber_count(owner).await > 0 {
            return false;
        }

        let mut inner = self.inner.write().await;
        let released = inner.remove(&owner).is_some();
        if released {
            log::info!("Dashboard released for {owner}");
        }
        released
    }

    /// Drop sessions no tab has listened to and no page has loaded for
    /// `idle_timeout`. Sessions still held by a request are kept. Returns how
    /// many were dropped.
    pub async fn sweep_idle(&self, idle_timeout: Duration) -> usize {
        let sessions: Vec<_> = {
            let inner = self.inner.read().await;
            inner
                .iter()
                .map(|(owner, session)| (*owner, Arc::clone(session)))
                .collect()
        };

        let mut idle = Vec::new();
        for (owner, session) in sessions {
            if self.services.broadcaster.subscriber_count(owner).await == 0
                && session.idle_for().await >= idle_timeout
            {
                idle.push(owner);
            }
        }

        let mut inner = self.inner.write().await;
        let mut released = 0;
        for owner in idle {
            let in_use = inner
                .get(&owner)
                .is_none_or(|session| Arc::strong_count(session) > 1);
            if !in_use {
                inner.remove(&owner);
                log::info!("Idle dashboard released for {owner}");
                released += 1;
            }
        }
        released
    }

    pub async fn len(&self) -> usize {
        let inner = self.inner.read().await;
        inner.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    pub fn services(&self) -> &DashboardServices {
        &self.services
    }
}
