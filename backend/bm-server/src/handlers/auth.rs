//! Sign in, sign up, email confirmation and sign out.

use crate::AppState;
use crate::handlers::error::Result as PageResult;
use crate::handlers::landing::{DASHBOARD_PATH, is_signed_in};
use crate::pages::views::LoginView;
use crate::session::{SessionId, cookies};

use bm_core::{AuthSession, LoginForm};
use bm_supabase::{BackendError, SignUpOutcome};

use axum::{
    Form,
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;

pub const LOGIN_FAILED: &str = "An error occurred during login";
pub const SIGN_UP_FAILED: &str = "An error occurred during sign up";
pub const CONFIRM_EMAIL: &str = "Check your email to confirm your account";
pub const CALLBACK_PATH: &str = "/auth/callback";

/// GET /login
pub async fn login_page(State(state): State<AppState>, jar: CookieJar) -> PageResult<Response> {
    if is_signed_in(&state, &jar).await {
        return Ok(Redirect::to(DASHBOARD_PATH).into_response());
    }
    render_login(&state, StatusCode::OK, &LoginView::default())
}

/// POST /login
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> PageResult<Response> {
    if let Err(e) = form.validate() {
        let view = LoginView::error(form.email(), e.user_message());
        return render_login(&state, StatusCode::UNPROCESSABLE_ENTITY, &view);
    }

    match state.auth.sign_in(form.email(), &form.password).await {
        Ok(session) => Ok(start_session(&state, jar, session).await),
        Err(e) => {
            log::warn!("Sign in failed for {}: {e}", form.email());
            let view = LoginView::error(form.email(), inline_message(&e, LOGIN_FAILED));
            render_login(&state, StatusCode::UNAUTHORIZED, &view)
        }
    }
}

/// POST /signup
pub async fn sign_up(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> PageResult<Response> {
    if let Err(e) = form.validate() {
        let view = LoginView::error(form.email(), e.user_message());
        return render_login(&state, StatusCode::UNPROCESSABLE_ENTITY, &view);
    }

    let redirect_to = format!("{}{CALLBACK_PATH}", state.settings.public_origin);
    match state
        .auth
        .sign_up(form.email(), &form.password, &redirect_to)
        .await
    {
        Ok(SignUpOutcome::SessionCreated(session)) => Ok(start_session(&state, jar, session).await),
        Ok(SignUpOutcome::ConfirmationRequired) => {
            log::info!("Sign up for {} awaiting email confirmation", form.email());
            render_login(
                &state,
                StatusCode::OK,
                &LoginView::notice(form.email(), CONFIRM_EMAIL),
            )
        }
        Err(e) => {
            log::warn!("Sign up failed for {}: {e}", form.email());
            let view = LoginView::error(form.email(), inline_message(&e, SIGN_UP_FAILED));
            render_login(&state, StatusCode::UNPROCESSABLE_ENTITY, &view)
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CallbackQuery {
    pub token_hash: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub error_description: Option<String>,
}

/// GET /auth/callback - target of the confirmation email link
pub async fn auth_callback(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(query): Query<CallbackQuery>,
) -> PageResult<Response> {
    if let Some(description) = query.error_description {
        return render_login(
            &state,
            StatusCode::BAD_REQUEST,
            &LoginView::error("", description),
        );
    }

    let Some(token_hash) = query.token_hash.filter(|t| !t.is_empty()) else {
        return Ok(Redirect::to(crate::handlers::error::LOGIN_PATH).into_response());
    };
    let kind = query.kind.unwrap_or_else(|| String::from("email"));

    match state.auth.verify_email(&token_hash, &kind).await {
        Ok(session) => Ok(start_session(&state, jar, session).await),
        Err(e) => {
            log::warn!("Email confirmation failed: {e}");
            let view = LoginView::error("", inline_message(&e, LOGIN_FAILED));
            render_login(&state, StatusCode::BAD_REQUEST, &view)
        }
    }
}

/// POST /auth/signout
pub async fn sign_out(State(state): State<AppState>, jar: CookieJar) -> Response {
    #[allow(clippy::collapsible_if)]
    if let Some(id) = cookies::session_id(&jar, &state.settings) {
        if let Some(session) = state.sessions.remove(&id).await {
            if let Err(e) = state.auth.sign_out(&session.access_token).await {
                log::warn!("Sign out for {} failed: {e}", session.user.email);
            }
            state.dashboards.release_if_idle(session.user.id).await;
        }
    }

    let jar = jar.remove(cookies::removal_cookie(&state.settings));
    (jar, Redirect::to("/")).into_response()
}

async fn start_session(state: &AppState, jar: CookieJar, session: AuthSession) -> Response {
    let id = SessionId::new();
    let cookie = cookies::session_cookie(&state.settings, &id);
    state.sessions.insert(id, session).await;
    (jar.add(cookie), Redirect::to(DASHBOARD_PATH)).into_response()
}

fn render_login(state: &AppState, status: StatusCode, view: &LoginView) -> PageResult<Response> {
    Ok((status, Html(state.pages.login(view)?)).into_response())
}

/// Backend message for the form, or `fallback` when it has none.
fn inline_message(error: &BackendError, fallback: &str) -> String {
    let message = error.user_message();
    if message.trim().is_empty() {
        String::from(fallback)
    } else {
        message
    }
}
