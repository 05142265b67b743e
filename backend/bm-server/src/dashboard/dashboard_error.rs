use bm_core::CoreError;
use bm_supabase::BackendError;

use thiserror::Error;

pub const ADD_FAILED: &str = "Failed to add bookmark";

/// A dashboard action that did not go through. The message is shown next to
/// the form that triggered it.
#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("Invalid bookmark: {0}")]
    Invalid(#[from] CoreError),

    #[error("Backend rejected the request: {0}")]
    Backend(#[from] BackendError),
}

impl DashboardError {
    pub fn user_message(&self) -> String {
        let message = match self {
            Self::Invalid(e) => e.user_message(),
            Self::Backend(e) => e.user_message(),
        };
        if message.trim().is_empty() {
            String::from(ADD_FAILED)
        } else {
            message
        }
    }
}
