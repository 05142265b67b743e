use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Config error: {0}")]
    Config(#[from] bm_config::ConfigError),

    #[error("Backend client error: {0}")]
    Backend(#[from] bm_supabase::BackendError),

    #[error("Failed to load page templates: {source} {location}")]
    Templates {
        #[source]
        source: tera::Error,
        location: ErrorLocation,
    },

    #[error("Logger error: {message}")]
    Logger { message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ServerError {
    #[track_caller]
    pub fn templates(source: tera::Error) -> Self {
        Self::Templates {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = std::result::Result<T, ServerError>;
