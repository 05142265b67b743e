//! Form validation for the add-bookmark and login forms.
//!
//! Validation runs before any backend call; a rejected form never reaches the
//! data or auth service.

use crate::{CoreError, Result as CoreErrorResult};

use std::panic::Location;

use error_location::ErrorLocation;
use serde::Deserialize;
use url::Url;

pub const DEFAULT_MAX_TITLE_LENGTH: usize = 200;

pub const TITLE_REQUIRED: &str = "Title is required";
pub const URL_REQUIRED: &str = "URL is required";
pub const URL_INVALID: &str = "Please enter a valid URL";
pub const CREDENTIALS_REQUIRED: &str = "Email and password are required";

/// Raw add-bookmark form as submitted by the browser.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BookmarkForm {
    pub title: String,
    pub url: String,
}

/// A form that passed validation: trimmed title, normalized URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidBookmark {
    pub title: String,
    pub url: String,
}

impl BookmarkForm {
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
        }
    }

    #[track_caller]
    pub fn validate(&self, max_title_length: usize) -> CoreErrorResult<ValidBookmark> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(validation_error("title", TITLE_REQUIRED));
        }

        if self.url.trim().is_empty() {
            return Err(validation_error("url", URL_REQUIRED));
        }

        let url = normalize_url(&self.url);
        if Url::parse(&url).is_err() {
            return Err(validation_error("url", URL_INVALID));
        }

        if title.chars().count() > max_title_length {
            return Err(validation_error(
                "title",
                format!("Title must be at most {max_title_length} characters"),
            ));
        }

        Ok(ValidBookmark {
            title: title.to_string(),
            url,
        })
    }
}

/// Trim and prefix `https://` when no http(s) scheme is present.
pub fn normalize_url(raw: &str) -> String {
    let trimmed = raw.trim();
    if has_http_scheme(trimmed) {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    }
}

fn has_http_scheme(value: &str) -> bool {
    let lower = value
        .get(..8)
        .unwrap_or(value)
        .to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Login / sign-up form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    #[track_caller]
    pub fn validate(&self) -> CoreErrorResult<()> {
        if self.email.trim().is_empty() || self.password.is_empty() {
            return Err(validation_error("email", CREDENTIALS_REQUIRED));
        }
        Ok(())
    }

    pub fn email(&self) -> &str {
        self.email.trim()
    }
}

#[track_caller]
fn validation_error(field: &'static str, message: impl Into<String>) -> CoreError {
    CoreError::Validation {
        field,
        message: message.into(),
        location: ErrorLocation::from(Location::caller()),
    }
}
