use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::{MissedTickBehavior, interval};

use super::job_service::JobService;

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(2);
pub const MIN_POLL_INTERVAL: Duration = Duration::from_millis(1);

/// Periodically reconciles a `JobService` with its store so changes written by
/// other clients reach this process's subscribers.
pub struct JobSyncWorker {
    job_service: Arc<JobService>,
    period: Duration,
}

impl JobSyncWorker {
    /// Periods below [`MIN_POLL_INTERVAL`] are raised to it.
    pub fn new(job_service: Arc<JobService>, period: Duration) -> Self {
        if period < MIN_POLL_INTERVAL {
            tracing::warn!(
                requested_ms = period.as_millis() as u64,
                "Poll interval too short, using minimum"
            );
        }
        Self {
            job_service,
            period: period.max(MIN_POLL_INTERVAL),
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Runs until `shutdown` changes or its sender is dropped.
    pub async fn run(self, mut shutdown: watch::Receiver<bool>) {
        tracing::info!(period_ms = self.period.as_millis() as u64, "Job sync worker started");
        let mut tick = interval(self.period);
        tick.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = tick.tick() => {
                    match self.job_service.refresh().await {
                        Ok(events) if !events.is_empty() => {
                            tracing::info!(changes = events.len(), "Picked up job changes from store");
                            for event in &events {
                                let job = event.job();
                                tracing::debug!(job_id = %job.id, status = %job.status, "Remote job change");
                            }
                        }
                        Ok(_) => {}
                        Err(e) => tracing::warn!(error = %e, "Job refresh failed"),
                    }
                }
                _ = shutdown.changed() => break,
            }
        }
        tracing::info!("Job sync worker stopped");
    }
}
