//! Per-owner dashboard state.
//!
//! All open tabs of an owner share one `DashboardSession`. It holds the
//! optimistic bookmark list, the pending delete confirmations and the live
//! subscription status, and pushes a fresh snapshot to every tab after each
//! change. The lock is never held across a backend call.

use crate::dashboard::{DashboardError, DashboardServices};
use crate::handlers::error::PageError;
use crate::pages::views::{BookmarkRow, ListView};
use crate::session::owner_access_token;

use bm_core::{
    Bookmark, BookmarkForm, BookmarkList, ConfirmOutcome, DeleteConfirmation, LiveEvent,
    NewBookmark, SubscriptionStatus,
};
use bm_live::Snapshot;
use bm_supabase::LiveSubscription;

use std::collections::HashMap;
use std::pin::Pin;
use std::sync::{Arc, Weak};
use std::time::{Duration, Instant};

use tokio::sync::Mutex;
use tokio::task::AbortHandle;
use uuid::Uuid;

/// Current time on the runtime clock, so timers and confirmation windows
/// agree under a paused test clock.
pub fn now() -> Instant {
    tokio::time::Instant::now().into_std()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// First press; the row now asks for confirmation.
    Armed,
    /// Second press; the row is gone on the server too.
    Deleted,
    /// The server refused; the list was re-fetched.
    RolledBack,
    /// No such confirmed row (already deleted, or still pending).
    NotFound,
}

/// Rendered state at one instant.
#[derive(Debug, Clone)]
pub struct DashboardData {
    pub list: ListView,
    pub online: bool,
}

struct DashboardState {
    list: BookmarkList,
    confirmations: HashMap<Uuid, DeleteConfirmation>,
    status: SubscriptionStatus,
    live_task: Option<AbortHandle>,
    /// Failed resubscribes since the last `Subscribed`
    reconnect_attempts: u32,
    reconnect_pending: bool,
    last_used: tokio::time::Instant,
}

pub struct DashboardSession {
    owner: Uuid,
    services: DashboardServices,
    state: Mutex<DashboardState>,
}

impl DashboardSession {
    pub fn new(owner: Uuid, rows: Vec<Bookmark>, services: DashboardServices) -> Self {
        Self {
            owner,
            services,
            state: Mutex::new(DashboardState {
                list: BookmarkList::from_rows(rows),
                confirmations: HashMap::new(),
                status: SubscriptionStatus::Connecting,
                live_task: None,
                reconnect_attempts: 0,
                reconnect_pending: false,
                last_used: tokio::time::Instant::now(),
            }),
        }
    }

    pub fn owner(&self) -> Uuid {
        self.owner
    }

    /// Record a page load or tab connection.
    pub async fn touch(&self) {
        let mut state = self.state.lock().await;
        state.last_used = tokio::time::Instant::now();
    }

    /// Time since the last page load or tab connection.
    pub async fn idle_for(&self) -> Duration {
        let state = self.state.lock().await;
        state.last_used.elapsed()
    }

    /// Start the live subscription unless one is already running. A closed or
    /// errored subscription is replaced.
    pub async fn ensure_live(self: &Arc<Self>, access_token: &str) {
        {
            let state = self.state.lock().await;
            if state.live_task.is_some() && !state.status.is_terminal() {
                return;
            }
        }

        let subscription = match self.services.live.subscribe(access_token, self.owner).await {
            Ok(subscription) => subscription,
            Err(e) => {
                log::warn!("Live subscription for {} failed: {e}", self.owner);
                self.apply_live(LiveEvent::Status(SubscriptionStatus::Errored))
                    .await;
                self.schedule_resubscribe().await;
                return;
            }
        };

        let task = tokio::spawn(forward_live(Arc::downgrade(self), subscription));

        let mut state = self.state.lock().await;
        if let Some(previous) = state.live_task.replace(task.abort_handle()) {
            previous.abort();
        }
        if state.status.is_terminal() {
            state.status = SubscriptionStatus::Connecting;
        }
        log::info!("Live subscription started for {}", self.owner);
    }

    /// Whether the live subscription has ended and missed changes are possible.
    pub async fn is_stale(&self) -> bool {
        let state = self.state.lock().await;
        state.live_task.is_none() || state.status.is_terminal()
    }

    /// Replace the list with the server's rows.
    pub async fn reload(&self, rows: Vec<Bookmark>) {
        {
            let mut guard = self.state.lock().await;
            let state = &mut *guard;
            state.list.replace_all(rows);
            state
                .confirmations
                .retain(|id, _| state.list.contains(*id));
        }
        self.publish().await;
    }

    /// Validate and insert. The row shows up as pending at once and is
    /// replaced by the stored row when the insert returns.
    pub async fn add(
        &self,
        access_token: &str,
        form: &BookmarkForm,
    ) -> Result<Bookmark, DashboardError> {
        let valid = form.validate(self.services.max_title_length)?;
        let new_bookmark = NewBookmark::new(valid, self.owner);

        let local_id = {
            let mut state = self.state.lock().await;
            state.list.insert_pending(
                new_bookmark.title.clone(),
                new_bookmark.url.clone(),
                self.owner,
            )
        };
        self.publish().await;

        let result = self.services.store.insert(access_token, &new_bookmark).await;

        let outcome = {
            let mut state = self.state.lock().await;
            match result {
                Ok(row) => {
                    state.list.confirm(local_id, row.clone());
                    Ok(row)
                }
                Err(e) => {
                    log::warn!("Insert for {} failed: {e}", self.owner);
                    state.list.reject(local_id);
                    Err(DashboardError::from(e))
                }
            }
        };
        self.publish().await;

        outcome
    }

    /// One press of a row's delete button.
    pub async fn request_delete(
        self: &Arc<Self>,
        access_token: &str,
        id: Uuid,
        now: Instant,
    ) -> DeleteOutcome {
        let pressed = {
            let mut state = self.state.lock().await;
            let deletable = state.list.get(id).is_some_and(|entry| !entry.is_pending());
            if !deletable {
                state.confirmations.remove(&id);
                return DeleteOutcome::NotFound;
            }

            let window = self.services.confirm_window;
            let confirmation = state
                .confirmations
                .entry(id)
                .or_insert_with(|| DeleteConfirmation::new(window));
            match confirmation.press(now) {
                ConfirmOutcome::Armed => ConfirmOutcome::Armed,
                ConfirmOutcome::Confirmed => {
                    state.confirmations.remove(&id);
                    state.list.remove_optimistic(id);
                    ConfirmOutcome::Confirmed
                }
            }
        };
        self.publish().await;

        if pressed == ConfirmOutcome::Armed {
            self.schedule_expiry(id);
            return DeleteOutcome::Armed;
        }

        match self.services.store.delete(access_token, id, self.owner).await {
            Ok(()) => DeleteOutcome::Deleted,
            Err(e) => {
                log::warn!("Delete of {id} failed: {e}; re-fetching bookmarks");
                let rows = self
                    .services
                    .store
                    .list(access_token, self.owner)
                    .await
                    .unwrap_or_else(|e| {
                        log::error!("Re-fetch for {} failed: {e}", self.owner);
                        Vec::new()
                    });
                self.reload(rows).await;
                DeleteOutcome::RolledBack
            }
        }
    }

    /// Live notification or subscription status change. Returns whether the
    /// dashboard changed.
    pub async fn apply_live(&self, event: LiveEvent) -> bool {
        let changed = {
            let mut state = self.state.lock().await;
            match event {
                LiveEvent::Inserted(row) => {
                    self.services.metrics.live_event_received("inserted");
                    if row.user_id != self.owner {
                        log::warn!("Ignoring live insert of {} for another owner", row.id);
                        false
                    } else {
                        state.list.apply_remote_insert(row)
                    }
                }
                LiveEvent::Deleted(id) => {
                    self.services.metrics.live_event_received("deleted");
                    state.confirmations.remove(&id);
                    state.list.apply_remote_delete(id)
                }
                LiveEvent::Status(status) => {
                    self.services.metrics.live_event_received("status");
                    log::debug!("Live status for {}: {status}", self.owner);
                    if status.is_online() {
                        state.reconnect_attempts = 0;
                    }
                    let changed = state.status != status;
                    state.status = status;
                    changed
                }
            }
        };

        if changed {
            self.publish().await;
        }
        changed
    }

    pub async fn view(&self, now: Instant) -> DashboardData {
        let state = self.state.lock().await;
        let rows = state
            .list
            .iter()
            .map(|entry| {
                let confirming = state
                    .confirmations
                    .get(&entry.bookmark.id)
                    .is_some_and(|c| c.is_armed(now));
                BookmarkRow::new(entry, confirming)
            })
            .collect();

        DashboardData {
            list: ListView::new(rows),
            online: state.status.is_online(),
        }
    }

    pub async fn snapshot(&self) -> Result<Snapshot, PageError> {
        let data = self.view(now()).await;
        let html = self.services.pages.bookmark_list(&data.list)?;
        Ok(Snapshot {
            count: data.list.count,
            online: data.online,
            html,
        })
    }

    pub async fn len(&self) -> usize {
        let state = self.state.lock().await;
        state.list.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Push the current snapshot to every open tab of the owner.
    pub async fn publish(&self) {
        let message = match self.snapshot().await {
            Ok(snapshot) => snapshot.to_message(),
            Err(e) => {
                log::error!("Snapshot for {} failed: {e}", self.owner);
                return;
            }
        };

        match message {
            Ok(message) => {
                let reached = self
                    .services
                    .broadcaster
                    .broadcast(self.owner, message)
                    .await;
                self.services.metrics.broadcast_published(reached);
            }
            Err(e) => log::error!("Snapshot for {} failed: {e}", self.owner),
        }
    }

    /// Re-render once the confirmation window lapses so the row stops asking.
    fn schedule_expiry(self: &Arc<Self>, id: Uuid) {
        let session = Arc::downgrade(self);
        let window = self.services.confirm_window;

        tokio::spawn(async move {
            tokio::time::sleep(window).await;
            let Some(session) = session.upgrade() else {
                return;
            };

            let expired = {
                let mut state = session.state.lock().await;
                let now = now();
                let expired = state
                    .confirmations
                    .get(&id)
                    .is_some_and(|c| !c.is_armed(now));
                if expired {
                    state.confirmations.remove(&id);
                }
                expired
            };

            if expired {
                session.publish().await;
            }
        });
    }
}

impl DashboardSession {
    /// The backend channel ended. Show the tabs offline and try again later.
    async fn live_ended(self: &Arc<Self>) {
        let changed = {
            let mut state = self.state.lock().await;
            let changed = !state.status.is_terminal();
            if changed {
                state.status = SubscriptionStatus::Closed;
            }
            changed
        };
        if changed {
            self.publish().await;
        }
        self.schedule_resubscribe().await;
    }

    /// Resubscribe after a delay that doubles with every failed attempt.
    async fn schedule_resubscribe(self: &Arc<Self>) {
        let delay = {
            let mut state = self.state.lock().await;
            if state.reconnect_pending {
                return;
            }
            state.reconnect_pending = true;
            let delay = self
                .services
                .realtime
                .reconnect_delay(state.reconnect_attempts);
            state.reconnect_attempts = state.reconnect_attempts.saturating_add(1);
            delay
        };
        log::info!("Live updates for {} resubscribe in {delay:?}", self.owner);

        let session = Arc::downgrade(self);
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if let Some(session) = session.upgrade() {
                session.resubscribe().await;
            }
        });
    }

    /// Resubscribe with a token from one of the owner's sessions. Without one,
    /// the tabs are disconnected; their reconnect goes through sign-in.
    ///
    /// Boxed because it re-enters `ensure_live`, which can schedule it again.
    fn resubscribe(self: Arc<Self>) -> Pin<Box<dyn Future<Output = ()> + Send>> {
        Box::pin(async move {
            {
                let mut state = self.state.lock().await;
                state.reconnect_pending = false;
            }
            if !self.is_stale().await {
                return;
            }

            let token = owner_access_token(
                self.services.auth.as_ref(),
                &self.services.sessions,
                self.owner,
            )
            .await;
            match token {
                Some(token) => self.ensure_live(&token).await,
                None => {
                    log::info!("No signed-in session left for {}; closing its tabs", self.owner);
                    self.services.broadcaster.close(self.owner).await;
                }
            }
        })
    }
}

impl Drop for DashboardSession {
    fn drop(&mut self) {
        if let Some(task) = self.state.get_mut().live_task.take() {
            task.abort();
            log::debug!("Live subscription for {} stopped", self.owner);
        }
    }
}

/// Feed live events into the session until the subscription ends or the
/// session is dropped, then arrange a resubscribe.
async fn forward_live(session: Weak<DashboardSession>, mut subscription: LiveSubscription) {
    while let Some(event) = subscription.next().await {
        let Some(session) = session.upgrade() else {
            return;
        };
        let terminal = matches!(event, LiveEvent::Status(status) if status.is_terminal());
        session.apply_live(event).await;
        if terminal {
            break;
        }
    }
    drop(subscription);

    if let Some(session) = session.upgrade() {
        session.live_ended().await;
    }
}
