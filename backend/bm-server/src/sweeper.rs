//! Periodic release of idle browser sessions and dashboards.

use crate::AppState;

use tokio::task::JoinHandle;

/// What one sweep released.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepReport {
    pub sessions: usize,
    pub dashboards: usize,
}

/// Sweep every `sweep_interval` until shutdown.
pub fn spawn(state: AppState) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut guard = state.shutdown.subscribe_guard();
        let mut ticker = tokio::time::interval(state.settings.sweep_interval);
        // First tick is immediate
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    sweep_once(&state).await;
                }
                _ = guard.wait() => {
                    log::debug!("Idle sweep stopped");
                    break;
                }
            }
        }
    })
}

pub async fn sweep_once(state: &AppState) -> SweepReport {
    let report = SweepReport {
        sessions: state.sessions.sweep(state.settings.session_idle_timeout).await,
        dashboards: state
            .dashboards
            .sweep_idle(state.settings.dashboard_idle_timeout)
            .await,
    };
    if report != SweepReport::default() {
        log::info!(
            "Idle sweep released {} sessions and {} dashboards",
            report.sessions,
            report.dashboards
        );
    }
    report
}
