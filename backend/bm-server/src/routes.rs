use crate::AppState;
use crate::handlers::{auth, dashboard, landing, live};
use crate::health;

use axum::{
    Router,
    routing::{get, post},
};

/// Build the application router with all endpoints
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Pages
        .route("/", get(landing::landing))
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/signup", post(auth::sign_up))
        .route("/auth/callback", get(auth::auth_callback))
        .route("/auth/signout", post(auth::sign_out))
        .route("/dashboard", get(dashboard::show))
        .route("/dashboard/bookmarks", post(dashboard::add))
        .route("/dashboard/bookmarks/{id}/delete", post(dashboard::delete))
        // Snapshot websocket
        .route("/dashboard/live", get(live::live_updates))
        // Health check endpoints
        .route("/health", get(health::health_check))
        .route("/live", get(health::liveness_check))
        .route("/ready", get(health::readiness_check))
        .with_state(state)
}
