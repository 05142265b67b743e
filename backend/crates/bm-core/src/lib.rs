pub mod delete_confirmation;
pub mod display;
pub mod error;
pub mod models;
pub mod reconcile;
pub mod validation;

#[cfg(test)]
mod tests;

pub use delete_confirmation::{ConfirmOutcome, DEFAULT_CONFIRM_WINDOW, DeleteConfirmation};
pub use error::{CoreError, Result};
pub use models::auth_session::AuthSession;
pub use models::bookmark::Bookmark;
pub use models::live_event::LiveEvent;
pub use models::new_bookmark::NewBookmark;
pub use models::subscription_status::SubscriptionStatus;
pub use models::user::User;
pub use reconcile::{BookmarkList, Entry, EntryState};
pub use validation::{BookmarkForm, DEFAULT_MAX_TITLE_LENGTH, LoginForm, ValidBookmark};

pub use error_location::ErrorLocation;
