mod dashboard_error;
mod dashboard_registry;
mod dashboard_services;
mod dashboard_session;

pub use dashboard_error::{ADD_FAILED, DashboardError};
pub use dashboard_registry::DashboardRegistry;
pub use dashboard_services::DashboardServices;
pub use dashboard_session::{DashboardData, DashboardSession, DeleteOutcome, now};
