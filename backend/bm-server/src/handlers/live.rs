use crate::AppState;
use crate::dashboard::DashboardSession;
use crate::handlers::error::Result as PageResult;
use crate::session::Authenticated;

use bm_core::AuthSession;

use bm_live::{BroadcastMessage, ConnectionId, LiveConnection};

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{WebSocket, WebSocketUpgrade},
    },
    response::Response,
};

/// GET /dashboard/live - websocket of dashboard snapshots for the signed-in
/// owner
pub async fn live_updates(
    State(state): State<AppState>,
    auth: Authenticated,
    ws: WebSocketUpgrade,
) -> PageResult<Response> {
    let (connection_id, dashboard) = admit(&state, &auth.session).await?;
    Ok(ws.on_upgrade(move |socket| handle_socket(socket, connection_id, dashboard, state)))
}

/// Open the owner's dashboard and take a connection slot. When no slot is
/// free the dashboard is released again unless another tab holds it.
pub async fn admit(
    state: &AppState,
    session: &AuthSession,
) -> PageResult<(ConnectionId, Arc<DashboardSession>)> {
    let owner = session.user.id;

    // Also restarts the backend subscription if it had ended
    let dashboard = state.dashboards.open(owner, &session.access_token).await?;

    match state.registry.register(owner).await {
        Ok(connection_id) => {
            log::debug!("Registered live connection {connection_id} for {owner}");
            Ok((connection_id, dashboard))
        }
        Err(e) => {
            log::error!("Failed to register live connection: {e}");
            drop(dashboard);
            state.dashboards.release_if_idle(owner).await;
            Err(e.into())
        }
    }
}

async fn handle_socket(
    socket: WebSocket,
    connection_id: ConnectionId,
    dashboard: Arc<DashboardSession>,
    state: AppState,
) {
    let owner = dashboard.owner();

    // Subscribe before rendering the first snapshot so nothing falls in between
    let updates = state.broadcaster.subscribe(owner).await;
    let initial = initial_snapshot(&dashboard).await;
    // The registry owns the session from here on
    drop(dashboard);

    match initial {
        Ok(initial) => {
            let connection = LiveConnection::new(
                connection_id,
                owner,
                state.config.clone(),
                state.metrics.clone(),
                state.broadcaster.clone(),
            );
            if let Err(e) = connection
                .handle(socket, updates, initial, state.shutdown.subscribe_guard())
                .await
            {
                log::error!("Live connection {connection_id} error: {e}");
            }
        }
        Err(e) => {
            log::error!("Live connection {connection_id} could not start: {e}");
            state.broadcaster.unsubscribe(owner).await;
        }
    }

    state.registry.unregister(connection_id).await;
    state.dashboards.release_if_idle(owner).await;
}

async fn initial_snapshot(dashboard: &DashboardSession) -> PageResult<BroadcastMessage> {
    let snapshot = dashboard.snapshot().await?;
    Ok(snapshot.to_message()?)
}
