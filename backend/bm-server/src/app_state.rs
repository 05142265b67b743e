use crate::dashboard::{DashboardRegistry, DashboardServices};
use crate::pages::pages::Pages;
use crate::session::SessionStore;

use bm_config::Config;
use bm_live::{
    BroadcastConfig, ConnectionConfig, ConnectionLimits, ConnectionRegistry, Metrics,
    OwnerBroadcaster, ShutdownCoordinator,
};
use bm_supabase::{AuthService, BookmarkStore, LiveChannel};

use std::sync::Arc;
use std::time::Duration;

/// Request-facing settings taken from the configuration.
#[derive(Debug, Clone)]
pub struct AppSettings {
    pub cookie_name: String,
    pub secure_cookies: bool,
    /// Base URL the browser sees, used for email confirmation links
    pub public_origin: String,
    pub delete_confirm_window: Duration,
    pub max_title_length: usize,
    pub session_idle_timeout: Duration,
    pub dashboard_idle_timeout: Duration,
    pub sweep_interval: Duration,
}

impl AppSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            cookie_name: config.session.cookie_name.clone(),
            secure_cookies: config.session.secure,
            public_origin: config.server.origin(),
            delete_confirm_window: config.dashboard.delete_confirm_window(),
            max_title_length: config.dashboard.max_title_length,
            session_idle_timeout: config.session.idle_timeout(),
            dashboard_idle_timeout: config.dashboard.idle_timeout(),
            sweep_interval: config.dashboard.sweep_interval(),
        }
    }
}

impl Default for AppSettings {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

/// Backend capabilities the server is wired to.
#[derive(Clone)]
pub struct Backends {
    pub auth: Arc<dyn AuthService>,
    pub store: Arc<dyn BookmarkStore>,
    pub live: Arc<dyn LiveChannel>,
}

/// Shared application state for all handlers
#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<dyn AuthService>,
    pub sessions: SessionStore,
    pub dashboards: DashboardRegistry,
    pub pages: Pages,
    pub registry: ConnectionRegistry,
    pub broadcaster: OwnerBroadcaster,
    pub metrics: Metrics,
    pub shutdown: ShutdownCoordinator,
    pub config: ConnectionConfig,
    pub settings: AppSettings,
}

impl AppState {
    pub fn new(
        backends: Backends,
        pages: Pages,
        config: &Config,
        shutdown: ShutdownCoordinator,
    ) -> Self {
        let settings = AppSettings::from_config(config);
        let broadcaster = OwnerBroadcaster::new(BroadcastConfig::from(&config.websocket));
        let metrics = Metrics::new();
        let sessions = SessionStore::new();

        let dashboards = DashboardRegistry::new(DashboardServices {
            store: backends.store,
            live: backends.live,
            auth: Arc::clone(&backends.auth),
            sessions: sessions.clone(),
            broadcaster: broadcaster.clone(),
            pages: pages.clone(),
            metrics: metrics.clone(),
            confirm_window: settings.delete_confirm_window,
            max_title_length: settings.max_title_length,
            realtime: config.realtime.clone(),
        });

        Self {
            auth: backends.auth,
            sessions,
            dashboards,
            pages,
            registry: ConnectionRegistry::new(ConnectionLimits {
                max_total: config.server.max_connections,
                ..ConnectionLimits::default()
            }),
            broadcaster,
            metrics,
            shutdown,
            config: ConnectionConfig::from(&config.websocket),
            settings,
        }
    }
}
