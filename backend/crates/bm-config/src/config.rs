use crate::{
    CONFIG_DIR_ENV, CONFIG_DIR_NAME, CONFIG_FILE_NAME, ConfigError, ConfigErrorResult,
    DashboardConfig, LoggingConfig, RealtimeConfig, ServerConfig, SessionConfig, SupabaseConfig,
    WebSocketConfig,
};

use std::path::{Path, PathBuf};

use log::info;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub supabase: SupabaseConfig,
    pub session: SessionConfig,
    pub dashboard: DashboardConfig,
    pub websocket: WebSocketConfig,
    pub realtime: RealtimeConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Load config.
    ///
    /// Loading order:
    /// 1. BM_CONFIG_DIR env var, else ./.bm/
    /// 2. Auto-create the config directory
    /// 3. Load config.toml if it exists, else defaults
    /// 4. Apply BM_* (and SUPABASE_* fallback) environment overrides
    ///
    /// Does NOT validate - call validate() after load().
    pub fn load() -> ConfigErrorResult<Self> {
        let config_dir = Self::config_dir()?;

        if !config_dir.exists() {
            std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::Io {
                path: config_dir.clone(),
                source: e,
            })?;
        }

        let config_path = config_dir.join(CONFIG_FILE_NAME);

        let mut config = if config_path.exists() {
            Self::load_toml(&config_path)?
        } else {
            Config::default()
        };

        config.apply_env_overrides();

        Ok(config)
    }

    fn load_toml(path: &Path) -> ConfigErrorResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::Toml {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Priority: BM_CONFIG_DIR env var > ./.bm/ (relative to cwd)
    pub fn config_dir() -> ConfigErrorResult<PathBuf> {
        if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
            return Ok(PathBuf::from(dir));
        }

        let cwd = std::env::current_dir()
            .map_err(|_| ConfigError::config("Cannot determine current working directory"))?;
        Ok(cwd.join(CONFIG_DIR_NAME))
    }

    /// Validate all sections. Call after load() to catch all errors at startup.
    pub fn validate(&self) -> ConfigErrorResult<()> {
        self.server.validate()?;
        self.supabase.validate()?;
        self.session.validate()?;
        self.dashboard.validate()?;
        self.websocket.validate()?;
        self.realtime.validate()?;

        let log_dir = Path::new(&self.logging.dir);
        if log_dir.is_absolute() || self.logging.dir.contains("..") {
            return Err(ConfigError::config(
                "logging.dir must be relative and cannot contain '..'",
            ));
        }

        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Absolute path of the log file, if file logging is configured.
    pub fn log_file_path(&self) -> ConfigErrorResult<Option<PathBuf>> {
        match self.logging.file {
            Some(ref file) => {
                let dir = Self::config_dir()?.join(&self.logging.dir);
                Ok(Some(dir.join(file)))
            }
            None => Ok(None),
        }
    }

    /// Log configuration summary (NEVER logs the anon key).
    pub fn log_summary(&self) {
        info!("Configuration loaded:");
        info!(
            "  server: {}:{} (max {} connections, origin {})",
            self.server.host,
            self.server.port,
            self.server.max_connections,
            self.server.origin()
        );
        info!(
            "  supabase: {} (table={}, timeout={}s, anon_key={})",
            self.supabase.url,
            self.supabase.table,
            self.supabase.request_timeout_secs,
            if self.supabase.anon_key.is_empty() {
                "missing"
            } else {
                "set"
            }
        );
        info!(
            "  session: cookie={} (secure: {}, idle {}s)",
            self.session.cookie_name, self.session.secure, self.session.idle_timeout_secs
        );
        info!(
            "  dashboard: confirm_window={}ms, max_title={}, idle {}s, sweep every {}s",
            self.dashboard.delete_confirm_window_ms,
            self.dashboard.max_title_length,
            self.dashboard.idle_timeout_secs,
            self.dashboard.sweep_interval_secs
        );
        info!(
            "  websocket: buffer={}, broadcast={}, heartbeat={}s",
            self.websocket.send_buffer_size,
            self.websocket.broadcast_capacity,
            self.websocket.heartbeat_interval_secs
        );
        info!(
            "  realtime: channel={}, heartbeat={}s, buffer={}, reconnect {}-{}ms",
            self.realtime.channel,
            self.realtime.heartbeat_interval_secs,
            self.realtime.event_buffer_size,
            self.realtime.reconnect_delay_ms,
            self.realtime.max_reconnect_delay_ms
        );
        info!(
            "  logging: {} (colored: {})",
            *self.logging.level, self.logging.colored
        );
    }

    fn apply_env_overrides(&mut self) {
        // Server
        Self::apply_env_string("BM_SERVER_HOST", &mut self.server.host);
        Self::apply_env_parse("BM_SERVER_PORT", &mut self.server.port);
        Self::apply_env_parse(
            "BM_SERVER_MAX_CONNECTIONS",
            &mut self.server.max_connections,
        );
        Self::apply_env_option_string("BM_PUBLIC_URL", &mut self.server.public_url);

        // Supabase (the unprefixed names are what the hosted dashboard hands out)
        Self::apply_env_string("SUPABASE_URL", &mut self.supabase.url);
        Self::apply_env_string("BM_SUPABASE_URL", &mut self.supabase.url);
        Self::apply_env_string("SUPABASE_ANON_KEY", &mut self.supabase.anon_key);
        Self::apply_env_string("BM_SUPABASE_ANON_KEY", &mut self.supabase.anon_key);
        Self::apply_env_string("BM_SUPABASE_TABLE", &mut self.supabase.table);
        Self::apply_env_parse(
            "BM_SUPABASE_TIMEOUT_SECS",
            &mut self.supabase.request_timeout_secs,
        );

        // Session
        Self::apply_env_string("BM_SESSION_COOKIE_NAME", &mut self.session.cookie_name);
        Self::apply_env_bool("BM_SESSION_SECURE", &mut self.session.secure);
        Self::apply_env_parse(
            "BM_SESSION_IDLE_TIMEOUT_SECS",
            &mut self.session.idle_timeout_secs,
        );

        // Dashboard
        Self::apply_env_parse(
            "BM_DELETE_CONFIRM_WINDOW_MS",
            &mut self.dashboard.delete_confirm_window_ms,
        );
        Self::apply_env_parse("BM_MAX_TITLE_LENGTH", &mut self.dashboard.max_title_length);
        Self::apply_env_parse(
            "BM_DASHBOARD_IDLE_TIMEOUT_SECS",
            &mut self.dashboard.idle_timeout_secs,
        );
        Self::apply_env_parse(
            "BM_SWEEP_INTERVAL_SECS",
            &mut self.dashboard.sweep_interval_secs,
        );

        // WebSocket
        Self::apply_env_parse(
            "BM_WS_SEND_BUFFER_SIZE",
            &mut self.websocket.send_buffer_size,
        );
        Self::apply_env_parse(
            "BM_WS_BROADCAST_CAPACITY",
            &mut self.websocket.broadcast_capacity,
        );

        // Realtime
        Self::apply_env_parse(
            "BM_REALTIME_HEARTBEAT_SECS",
            &mut self.realtime.heartbeat_interval_secs,
        );
        Self::apply_env_parse(
            "BM_REALTIME_RECONNECT_DELAY_MS",
            &mut self.realtime.reconnect_delay_ms,
        );
        Self::apply_env_parse(
            "BM_REALTIME_MAX_RECONNECT_DELAY_MS",
            &mut self.realtime.max_reconnect_delay_ms,
        );

        // Logging
        Self::apply_env_parse("BM_LOG_LEVEL", &mut self.logging.level);
        Self::apply_env_bool("BM_LOG_COLORED", &mut self.logging.colored);
        Self::apply_env_option_string("BM_LOG_FILE", &mut self.logging.file);
    }

    fn apply_env_string(var_name: &str, target: &mut String) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val;
        }
    }

    /// Accepts "true"/"1"
    fn apply_env_bool(var_name: &str, target: &mut bool) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val == "true" || val == "1";
        }
    }

    /// Unparseable values are ignored.
    fn apply_env_parse<T: std::str::FromStr>(var_name: &str, target: &mut T) {
        if let Ok(val) = std::env::var(var_name)
            && let Ok(parsed) = val.parse()
        {
            *target = parsed;
        }
    }

    fn apply_env_option_string(var_name: &str, target: &mut Option<String>) {
        if let Ok(val) = std::env::var(var_name) {
            *target = Some(val);
        }
    }
}
