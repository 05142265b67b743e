mod config;
mod realtime;
mod web_socket;

use crate::CONFIG_DIR_ENV;

use std::env;

use tempfile::TempDir;

/// Restores an environment variable on drop
pub(crate) struct EnvGuard {
    key: &'static str,
    original: Option<String>,
}

impl EnvGuard {
    pub(crate) fn set(key: &'static str, value: &str) -> Self {
        unsafe {
            let original = env::var(key).ok();
            env::set_var(key, value);
            Self { key, original }
        }
    }

    pub(crate) fn remove(key: &'static str) -> Self {
        unsafe {
            let original = env::var(key).ok();
            env::remove_var(key);
            Self { key, original }
        }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        unsafe {
            match &self.original {
                Some(val) => env::set_var(self.key, val),
                None => env::remove_var(self.key),
            }
        }
    }
}

/// Temp config directory with BM_CONFIG_DIR pointing at it
pub(crate) fn setup_config_dir() -> (TempDir, EnvGuard) {
    let temp = TempDir::new().unwrap();
    let guard = EnvGuard::set(CONFIG_DIR_ENV, temp.path().to_str().unwrap());
    (temp, guard)
}

/// Clears every backend variable so ambient shell settings don't leak in
pub(crate) fn clear_backend_env() -> Vec<EnvGuard> {
    vec![
        EnvGuard::remove("SUPABASE_URL"),
        EnvGuard::remove("SUPABASE_ANON_KEY"),
        EnvGuard::remove("BM_SUPABASE_URL"),
        EnvGuard::remove("BM_SUPABASE_ANON_KEY"),
    ]
}

pub(crate) fn valid_supabase() -> crate::SupabaseConfig {
    crate::SupabaseConfig {
        url: String::from("https://project.supabase.co"),
        anon_key: String::from("anon-key"),
        ..Default::default()
    }
}
