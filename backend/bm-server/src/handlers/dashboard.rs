use crate::AppState;
use crate::dashboard::{DashboardSession, DeleteOutcome, now};
use crate::handlers::error::Result as PageResult;
use crate::handlers::landing::DASHBOARD_PATH;
use crate::pages::views::{DashboardView, FormState, UserView};
use crate::session::Authenticated;

use bm_core::{AuthSession, BookmarkForm};

use std::sync::Arc;

use axum::{
    Form,
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use uuid::Uuid;

/// GET /dashboard
pub async fn show(State(state): State<AppState>, auth: Authenticated) -> PageResult<Response> {
    let dashboard = open(&state, &auth.session).await?;
    render(&state, &auth.session, &dashboard, StatusCode::OK, FormState::default()).await
}

/// POST /dashboard/bookmarks
pub async fn add(
    State(state): State<AppState>,
    auth: Authenticated,
    Form(form): Form<BookmarkForm>,
) -> PageResult<Response> {
    let dashboard = open(&state, &auth.session).await?;

    match dashboard.add(&auth.session.access_token, &form).await {
        Ok(bookmark) => {
            log::info!("Bookmark {} added for {}", bookmark.id, auth.session.user.id);
            Ok(Redirect::to(DASHBOARD_PATH).into_response())
        }
        Err(e) => {
            log::info!("Bookmark rejected for {}: {e}", auth.session.user.id);
            let form = FormState::rejected(&form.title, &form.url, e.user_message());
            render(
                &state,
                &auth.session,
                &dashboard,
                StatusCode::UNPROCESSABLE_ENTITY,
                form,
            )
            .await
        }
    }
}

/// POST /dashboard/bookmarks/{id}/delete
pub async fn delete(
    State(state): State<AppState>,
    auth: Authenticated,
    Path(id): Path<Uuid>,
) -> PageResult<Response> {
    let dashboard = open(&state, &auth.session).await?;

    let outcome = dashboard
        .request_delete(&auth.session.access_token, id, now())
        .await;
    if outcome == DeleteOutcome::NotFound {
        log::info!("Delete press on missing bookmark {id}");
    } else {
        log::debug!("Delete press on {id}: {outcome:?}");
    }
    Ok(Redirect::to(DASHBOARD_PATH).into_response())
}

async fn open(
    state: &AppState,
    session: &AuthSession,
) -> PageResult<Arc<DashboardSession>> {
    Ok(state
        .dashboards
        .open(session.user.id, &session.access_token)
        .await?)
}

async fn render(
    state: &AppState,
    session: &AuthSession,
    dashboard: &DashboardSession,
    status: StatusCode,
    form: FormState,
) -> PageResult<Response> {
    let data = dashboard.view(now()).await;
    let view = DashboardView {
        user: UserView::from(&session.user),
        online: data.online,
        form,
        list: data.list,
    };
    Ok((status, Html(state.pages.dashboard(&view)?)).into_response())
}
