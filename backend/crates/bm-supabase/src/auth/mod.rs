mod auth_client;
mod auth_service;
pub(crate) mod wire;

pub use auth_client::AuthClient;
pub use auth_service::{AuthService, SignUpOutcome};
