mod config;
mod dashboard_config;
mod error;
mod log_level;
mod logging_config;
mod realtime_config;
mod server_config;
mod session_config;
mod supabase_config;
mod websocket_config;

#[cfg(test)]
mod tests;

pub use config::Config;
pub use dashboard_config::DashboardConfig;
pub use error::{ConfigError, ConfigErrorResult};
pub use log_level::LogLevel;
pub use logging_config::LoggingConfig;
pub use realtime_config::RealtimeConfig;
pub use server_config::ServerConfig;
pub use session_config::SessionConfig;
pub use supabase_config::SupabaseConfig;
pub use websocket_config::WebSocketConfig;

pub const CONFIG_DIR_ENV: &str = "BM_CONFIG_DIR";
pub const CONFIG_DIR_NAME: &str = ".bm";
pub const CONFIG_FILE_NAME: &str = "config.toml";

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8000;
const MIN_PORT: u16 = 1024;
const DEFAULT_MAX_CONNECTIONS: usize = 1000;
const MIN_MAX_CONNECTIONS: usize = 1;
const MAX_MAX_CONNECTIONS: usize = 100_000;

const DEFAULT_LOG_LEVEL: log::LevelFilter = log::LevelFilter::Info;
const DEFAULT_LOG_DIRECTORY: &str = "log";
