//! Smart Bookmarks web server: server-rendered pages backed by the hosted
//! backend, with per-owner dashboard state pushed live to every open tab.

pub mod app_state;
pub mod dashboard;
pub mod error;
pub mod handlers;
pub mod health;
pub mod logger;
pub mod pages;
pub mod routes;
pub mod session;
pub mod sweeper;

#[cfg(test)]
mod tests;

pub use app_state::{AppSettings, AppState, Backends};
pub use dashboard::{
    DashboardError, DashboardRegistry, DashboardServices, DashboardSession, DeleteOutcome,
};
pub use error::{Result as ServerResult, ServerError};
pub use handlers::error::{PageError, Result as PageResult};
pub use pages::pages::Pages;
pub use session::{Authenticated, SessionId, SessionStore};

pub use crate::routes::build_router;
