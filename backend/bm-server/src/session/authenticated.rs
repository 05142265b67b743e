//! Session revalidation and the `Authenticated` extractor.

use crate::AppState;
use crate::handlers::error::PageError;
use crate::session::{SessionId, SessionStore, cookies};

use bm_core::AuthSession;
use bm_supabase::AuthService;

use std::future::Future;

use axum::{extract::FromRequestParts, http::request::Parts};
use axum_extra::extract::cookie::CookieJar;
use chrono::Utc;
use uuid::Uuid;

/// A request from a signed-in user. Rejects with a redirect to the login page.
pub struct Authenticated {
    pub session_id: SessionId,
    pub session: AuthSession,
}

impl FromRequestParts<AppState> for Authenticated {
    type Rejection = PageError;

    #[allow(clippy::manual_async_fn)]
    fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> impl Future<Output = Result<Self, Self::Rejection>> + Send {
        async move {
            let jar = CookieJar::from_headers(&parts.headers);
            let session_id =
                cookies::session_id(&jar, &state.settings).ok_or_else(PageError::unauthenticated)?;

            let session = resolve_session(state.auth.as_ref(), &state.sessions, &session_id)
                .await
                .ok_or_else(PageError::unauthenticated)?;

            Ok(Self {
                session_id,
                session,
            })
        }
    }
}

/// Look up a session and check it against the auth service.
///
/// An expired access token is refreshed first. If the auth service rejects the
/// token, the session is refreshed once and checked again. Anything else
/// discards the session.
pub async fn resolve_session(
    auth: &dyn AuthService,
    sessions: &SessionStore,
    id: &SessionId,
) -> Option<AuthSession> {
    let mut session = sessions.get(id).await?;
    let mut refreshed = false;

    if session.is_expired(Utc::now()) {
        session = refresh_session(auth, sessions, id, &session).await?;
        refreshed = true;
    }

    let user = match auth.get_user(&session.access_token).await {
        Ok(user) => user,
        Err(e) if !refreshed => {
            log::info!("Session {id} rejected ({e}), refreshing");
            session = refresh_session(auth, sessions, id, &session).await?;
            match auth.get_user(&session.access_token).await {
                Ok(user) => user,
                Err(e) => {
                    log::warn!("Session {id} still rejected after refresh: {e}");
                    sessions.remove(id).await;
                    return None;
                }
            }
        }
        Err(e) => {
            log::warn!("Session {id} rejected after refresh: {e}");
            sessions.remove(id).await;
            return None;
        }
    };

    session.user = user;
    sessions.replace(id, session.clone()).await;
    Some(session)
}

/// A working access token for `owner` from any of their signed-in sessions,
/// most recently used first. Used by background work that has no request.
pub async fn owner_access_token(
    auth: &dyn AuthService,
    sessions: &SessionStore,
    owner: Uuid,
) -> Option<String> {
    for id in sessions.owner_sessions(owner).await {
        if let Some(session) = resolve_session(auth, sessions, &id).await {
            return Some(session.access_token);
        }
    }
    None
}

async fn refresh_session(
    auth: &dyn AuthService,
    sessions: &SessionStore,
    id: &SessionId,
    session: &AuthSession,
) -> Option<AuthSession> {
    if !session.has_refresh_token() {
        sessions.remove(id).await;
        return None;
    }

    match auth.refresh(&session.refresh_token).await {
        Ok(fresh) => {
            log::debug!("Session {id} refreshed");
            sessions.replace(id, fresh.clone()).await;
            Some(fresh)
        }
        Err(e) => {
            log::warn!("Session {id} refresh failed: {e}");
            sessions.remove(id).await;
            None
        }
    }
}
