use std::time::Duration;

use time::Duration as Age;
use tracing::{error, info};

use crate::state::AppState;

/// Periodically fails jobs stuck in `processing`. The worker pool reports
/// outcomes over a webhook with no delivery guarantee; without this sweep a
/// lost callback leaves a job processing forever.
pub async fn start_stale_job_reaper(state: AppState) {
    let hours = state.config.stale_job_hours;
    if hours == 0 {
        info!("Stale-job reaper disabled (STALE_JOB_HOURS=0)");
        return;
    }

    let max_age = Age::hours(hours as i64);
    let mut interval = tokio::time::interval(Duration::from_secs(state.config.reaper_interval_secs));
    // First tick fires immediately; skip straight to the steady cadence.
    interval.tick().await;

    info!(
        "Stale-job reaper sweeping every {}s for jobs processing > {}h",
        state.config.reaper_interval_secs, hours
    );

    loop {
        interval.tick().await;
        match state.jobs.reap_stale(max_age).await {
            Ok(0) => {}
            Ok(reaped) => info!("Reaper failed {} stale jobs", reaped),
            Err(e) => error!("Stale-job sweep failed: {}", e),
        }
    }
}
