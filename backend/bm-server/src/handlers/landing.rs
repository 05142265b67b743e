use crate::AppState;
use crate::handlers::error::Result as PageResult;
use crate::session::{cookies, resolve_session};

use axum::{
    extract::State,
    response::{Html, IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;

pub const DASHBOARD_PATH: &str = "/dashboard";

/// GET / - landing page, or straight to the dashboard when signed in
pub async fn landing(State(state): State<AppState>, jar: CookieJar) -> PageResult<Response> {
    if is_signed_in(&state, &jar).await {
        return Ok(Redirect::to(DASHBOARD_PATH).into_response());
    }
    Ok(Html(state.pages.landing()?).into_response())
}

pub async fn is_signed_in(state: &AppState, jar: &CookieJar) -> bool {
    match cookies::session_id(jar, &state.settings) {
        Some(id) => resolve_session(state.auth.as_ref(), &state.sessions, &id)
            .await
            .is_some(),
        None => false,
    }
}
