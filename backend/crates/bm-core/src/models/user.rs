//! Session principal as reported by the auth service. Read-only here.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    /// Display name
    pub name: String,
    /// Avatar URL, empty when the provider has none
    pub avatar: String,
}

impl User {
    /// Fallback display name: the local part of the email address.
    pub fn name_from_email(email: &str) -> String {
        email.split('@').next().unwrap_or(email).to_string()
    }

    pub fn has_avatar(&self) -> bool {
        !self.avatar.is_empty()
    }
}
