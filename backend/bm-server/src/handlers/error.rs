//! Page errors
//!
//! Anything that stops a page from rendering. A missing or expired session
//! sends the browser to the login form; everything else is logged with its
//! location and shown as a bare error page.

use bm_live::LiveError;
use bm_supabase::BackendError;

use std::panic::Location;

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use error_location::ErrorLocation;
use thiserror::Error;

pub const LOGIN_PATH: &str = "/login";

#[derive(Debug, Error)]
pub enum PageError {
    /// No session, or the session could not be revalidated (303 to login)
    #[error("Not signed in {location}")]
    Unauthenticated { location: ErrorLocation },

    /// Hosted backend failed (502)
    #[error("Backend request failed: {source} {location}")]
    Backend {
        #[source]
        source: BackendError,
        location: ErrorLocation,
    },

    /// Template rendering failed (500)
    #[error("Render failed: {source} {location}")]
    Render {
        #[source]
        source: tera::Error,
        location: ErrorLocation,
    },

    /// Live connection could not be opened (503)
    #[error("Live updates unavailable: {source} {location}")]
    Live {
        #[source]
        source: LiveError,
        location: ErrorLocation,
    },
}

impl PageError {
    #[track_caller]
    pub fn unauthenticated() -> Self {
        Self::Unauthenticated {
            location: ErrorLocation::from(Location::caller()),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Unauthenticated { .. } => StatusCode::SEE_OTHER,
            Self::Backend { .. } => StatusCode::BAD_GATEWAY,
            Self::Render { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Live { .. } => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    /// What the visitor gets to read. Internal details stay in the log.
    fn public_message(&self) -> String {
        match self {
            Self::Unauthenticated { .. } => String::from("Please sign in."),
            Self::Backend { source, .. } => source.user_message(),
            Self::Render { .. } => String::from("Something went wrong while rendering this page."),
            Self::Live { .. } => String::from("Live updates are unavailable right now."),
        }
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        if let Self::Unauthenticated { .. } = self {
            log::debug!("{self}");
            return Redirect::to(LOGIN_PATH).into_response();
        }

        log::error!("{self}");

        let status = self.status();
        let body = format!(
            "<!DOCTYPE html><html lang=\"en\"><head><meta charset=\"utf-8\"><title>{code} - Smart Bookmarks</title></head>\
             <body><h1>{code}</h1><p>{message}</p><p><a href=\"/\">Back to Smart Bookmarks</a></p></body></html>",
            code = status.as_u16(),
            message = tera::escape_html(&self.public_message()),
        );

        (status, Html(body)).into_response()
    }
}

/// An expired or revoked token sends the user back to login rather than to an
/// error page.
impl From<BackendError> for PageError {
    #[track_caller]
    fn from(source: BackendError) -> Self {
        if source.is_unauthorized() {
            return Self::unauthenticated();
        }
        Self::Backend {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<tera::Error> for PageError {
    #[track_caller]
    fn from(source: tera::Error) -> Self {
        Self::Render {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<LiveError> for PageError {
    #[track_caller]
    fn from(source: LiveError) -> Self {
        Self::Live {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = std::result::Result<T, PageError>;
