use crate::pages::pages::Pages;
use crate::session::SessionStore;

use bm_config::RealtimeConfig;
use bm_live::{Metrics, OwnerBroadcaster};
use bm_supabase::{AuthService, BookmarkStore, LiveChannel};

use std::sync::Arc;
use std::time::Duration;

/// What a dashboard session needs from the rest of the server.
#[derive(Clone)]
pub struct DashboardServices {
    pub store: Arc<dyn BookmarkStore>,
    pub live: Arc<dyn LiveChannel>,
    /// Tokens for resubscribing when no request is in flight
    pub auth: Arc<dyn AuthService>,
    pub sessions: SessionStore,
    pub broadcaster: OwnerBroadcaster,
    pub pages: Pages,
    pub metrics: Metrics,
    pub confirm_window: Duration,
    pub max_title_length: usize,
    /// Resubscribe backoff
    pub realtime: RealtimeConfig,
}
