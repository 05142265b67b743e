use crate::Result;

use async_trait::async_trait;
use bm_core::{AuthSession, User};

/// Result of a sign-up: a live session when email confirmation is disabled,
/// otherwise the user has to confirm by email first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignUpOutcome {
    SessionCreated(AuthSession),
    ConfirmationRequired,
}

/// Email/password identity provider.
#[async_trait]
pub trait AuthService: Send + Sync {
    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession>;

    /// `redirect_to` is where the confirmation email links back to.
    async fn sign_up(&self, email: &str, password: &str, redirect_to: &str)
    -> Result<SignUpOutcome>;

    async fn sign_out(&self, access_token: &str) -> Result<()>;

    async fn get_user(&self, access_token: &str) -> Result<User>;

    async fn refresh(&self, refresh_token: &str) -> Result<AuthSession>;

    /// Exchange an email confirmation `token_hash` (of the given `kind`,
    /// e.g. "signup" or "email") for a session.
    async fn verify_email(&self, token_hash: &str, kind: &str) -> Result<AuthSession>;
}
