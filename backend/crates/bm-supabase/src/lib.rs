//! Clients for the hosted backend: auth (GoTrue), data (PostgREST) and
//! live change notifications (Realtime over Phoenix websockets).
//!
//! Each capability is a trait so the server can run against in-memory fakes.

mod auth;
mod client;
mod error;
mod live;
mod store;

#[cfg(test)]
mod tests;

pub use auth::{AuthClient, AuthService, SignUpOutcome};
pub use client::BackendClient;
pub use error::{BackendError, Result};
pub use live::{LiveChannel, LiveSubscription, PhoenixFrame, RealtimeClient};
pub use store::{BookmarkStore, RestClient};
