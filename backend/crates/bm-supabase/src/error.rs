use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;

/// Shown when the backend cannot be reached or answers with garbage.
pub const UNREACHABLE_MESSAGE: &str = "Could not reach the server. Please try again.";

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("HTTP request error: {message} {location}")]
    Http {
        message: String,
        location: ErrorLocation,
        #[source]
        source: reqwest::Error,
    },

    #[error("Backend error: {message} (status: {status}) {location}")]
    Api {
        status: u16,
        message: String,
        location: ErrorLocation,
    },

    #[error("JSON parse error: {message} {location}")]
    Json {
        message: String,
        location: ErrorLocation,
        #[source]
        source: serde_json::Error,
    },

    #[error("Realtime socket error: {message} {location}")]
    Ws {
        message: String,
        location: ErrorLocation,
    },

    #[error("Invalid backend URL: {message} {location}")]
    Url {
        message: String,
        location: ErrorLocation,
    },
}

impl BackendError {
    #[track_caller]
    pub fn from_reqwest(err: reqwest::Error) -> Self {
        BackendError::Http {
            message: err.to_string(),
            location: ErrorLocation::from(Location::caller()),
            source: err,
        }
    }

    #[track_caller]
    pub fn from_json(err: serde_json::Error) -> Self {
        BackendError::Json {
            message: err.to_string(),
            location: ErrorLocation::from(Location::caller()),
            source: err,
        }
    }

    #[track_caller]
    pub fn api<S: Into<String>>(status: u16, message: S) -> Self {
        BackendError::Api {
            status,
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn ws<S: Into<String>>(message: S) -> Self {
        BackendError::Ws {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn url<S: Into<String>>(message: S) -> Self {
        BackendError::Url {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Message displayed inline next to the form that triggered the call.
    pub fn user_message(&self) -> String {
        match self {
            BackendError::Api { message, .. } => message.clone(),
            _ => String::from(UNREACHABLE_MESSAGE),
        }
    }

    /// The access token was rejected (expired or revoked).
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, BackendError::Api { status: 401, .. })
    }
}

impl From<reqwest::Error> for BackendError {
    #[track_caller]
    fn from(err: reqwest::Error) -> Self {
        BackendError::from_reqwest(err)
    }
}

impl From<serde_json::Error> for BackendError {
    #[track_caller]
    fn from(err: serde_json::Error) -> Self {
        BackendError::from_json(err)
    }
}

pub type Result<T> = std::result::Result<T, BackendError>;
