use std::sync::Arc;
use std::time::Duration;
use chrono::Utc;
use tokio::time::sleep;
use tracing::{error, info, info_span, Instrument};
use crate::state::AppState;
use crate::error::AppError;

#[derive(Debug, Default, PartialEq, Eq)]
pub struct SweepReport {
    pub activated: u64,
    pub completed: u64,
    pub reactivated_users: usize,
    pub expired_sessions: u64,
}

/// One pass of time-driven housekeeping: advances booking statuses, lifts
/// timed deactivations and drops expired sessions.
pub async fn run_sweep(state: &AppState) -> Result<SweepReport, AppError> {
    let now = Utc::now();

    let (activated, completed) = state.booking_service.advance_lifecycle(now).await?;

    let reactivated = state.deactivation_repo.reactivate_due(now).await?;
    for user_id in &reactivated {
        info!("User {} reactivated after deactivation period", user_id);
    }

    let expired_sessions = state.auth_service.purge_expired().await?;

    Ok(SweepReport {
        activated,
        completed,
        reactivated_users: reactivated.len(),
        expired_sessions,
    })
}

pub async fn start_background_worker(state: Arc<AppState>) {
    info!("Starting lifecycle sweeper...");
    let interval = Duration::from_secs(state.config.lifecycle_sweep_secs.max(1));

    loop {
        let span = info_span!("lifecycle_sweep");
        async {
            match run_sweep(&state).await {
                Ok(report) if report != SweepReport::default() => info!(
                    activated = report.activated,
                    completed = report.completed,
                    reactivated_users = report.reactivated_users,
                    expired_sessions = report.expired_sessions,
                    "Sweep applied changes"
                ),
                Ok(_) => {}
                Err(e) => error!("Lifecycle sweep failed: {:?}", e),
            }
        }
            .instrument(span)
            .await;

        sleep(interval).await;
    }
}
