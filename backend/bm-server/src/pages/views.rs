//! Serializable view models handed to the templates. All formatting happens
//! here so the templates only print values.

use bm_core::{Entry, User};

use serde::Serialize;

/// One row of the bookmark list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookmarkRow {
    pub id: String,
    pub title: String,
    pub url: String,
    pub host: String,
    pub favicon: Option<String>,
    /// e.g. "Oct 18, 2026"
    pub created: String,
    /// Insert still in flight; not deletable yet
    pub pending: bool,
    /// First delete press registered, waiting for the second
    pub confirming: bool,
}

impl BookmarkRow {
    pub fn new(entry: &Entry, confirming: bool) -> Self {
        let bookmark = &entry.bookmark;
        Self {
            id: bookmark.id.to_string(),
            title: bookmark.title.clone(),
            url: bookmark.url.clone(),
            host: bookmark.display_host(),
            favicon: bookmark.favicon_url(),
            created: bookmark.created_on(),
            pending: entry.is_pending(),
            confirming,
        }
    }
}

/// The list fragment; also what live snapshots carry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ListView {
    pub bookmarks: Vec<BookmarkRow>,
    pub count: usize,
}

impl ListView {
    pub fn new(bookmarks: Vec<BookmarkRow>) -> Self {
        Self {
            count: bookmarks.len(),
            bookmarks,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserView {
    pub name: String,
    pub email: String,
    pub avatar: Option<String>,
}

impl From<&User> for UserView {
    fn from(user: &User) -> Self {
        Self {
            name: user.name.clone(),
            email: user.email.clone(),
            avatar: user.has_avatar().then(|| user.avatar.clone()),
        }
    }
}

/// Add-bookmark form as redisplayed after a failed submit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FormState {
    pub title: String,
    pub url: String,
    pub error: Option<String>,
}

impl FormState {
    pub fn rejected(title: &str, url: &str, error: String) -> Self {
        Self {
            title: title.to_string(),
            url: url.to_string(),
            error: Some(error),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub user: UserView,
    pub online: bool,
    pub form: FormState,
    #[serde(flatten)]
    pub list: ListView,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoginView {
    pub email: String,
    pub error: Option<String>,
    pub notice: Option<String>,
}

impl LoginView {
    pub fn error<S: Into<String>>(email: &str, error: S) -> Self {
        Self {
            email: email.to_string(),
            error: Some(error.into()),
            notice: None,
        }
    }

    pub fn notice<S: Into<String>>(email: &str, notice: S) -> Self {
        Self {
            email: email.to_string(),
            error: None,
            notice: Some(notice.into()),
        }
    }
}
