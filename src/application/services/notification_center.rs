use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use tokio::sync::broadcast;

use crate::application::ports::IdentityProvider;
use crate::domain::{Job, Notification, NotificationKind, User};

use super::job_events::{EventOrigin, JobEvent};

pub const AVAILABLE_JOBS_LINK: &str = "/jobs/available";

pub fn job_link(job: &Job) -> String {
    format!("/job/{}", job.id)
}

/// In-process notification list, newest first, fed by job events for the
/// current actor.
pub struct NotificationCenter {
    identity: Arc<dyn IdentityProvider>,
    notifications: Mutex<Vec<Notification>>,
    next_id: AtomicU64,
}

impl NotificationCenter {
    pub fn new(identity: Arc<dyn IdentityProvider>) -> Self {
        Self {
            identity,
            notifications: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(0),
        }
    }

    pub fn add(&self, message: impl Into<String>, kind: NotificationKind, link: Option<String>) -> u64 {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let notification = Notification {
            id,
            message: message.into(),
            kind,
            link,
        };
        tracing::debug!(id, kind = %kind, message = %notification.message, "Notification added");
        self.lock().insert(0, notification);
        id
    }

    pub fn remove(&self, id: u64) {
        self.lock().retain(|n| n.id != id);
    }

    pub fn list(&self) -> Vec<Notification> {
        self.lock().clone()
    }

    /// Consume job events until the channel closes.
    pub async fn run(self: Arc<Self>, mut events: broadcast::Receiver<JobEvent>) {
        tracing::info!("Notification center started");
        loop {
            match events.recv().await {
                Ok(event) => self.handle_event(&event).await,
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(missed = n, "Notification center lagged behind job events");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
        tracing::info!("Notification center stopped: channel closed");
    }

    pub async fn handle_event(&self, event: &JobEvent) {
        let Some(actor) = self.identity.current_actor().await else {
            return;
        };

        match event {
            JobEvent::Accepted { job } => {
                if job.driver_id == Some(actor.id) {
                    self.add(
                        format!("You accepted a new job for {}.", job.dropoff_address),
                        NotificationKind::Success,
                        Some(job_link(job)),
                    );
                }
            }
            JobEvent::StatusChanged {
                job,
                origin: EventOrigin::Remote,
                ..
            } => {
                if job.shipper_id == actor.id {
                    self.add(
                        format!(
                            "Your shipment to {} is now {}.",
                            job.dropoff_address, job.status
                        ),
                        NotificationKind::Info,
                        Some(job_link(job)),
                    );
                }
                if job.driver_id == Some(actor.id) {
                    self.add(
                        format!("Job for {} is now {}.", job.dropoff_address, job.status),
                        NotificationKind::Info,
                        Some(job_link(job)),
                    );
                }
            }
            JobEvent::Created {
                job,
                origin: EventOrigin::Remote,
            } => {
                if can_take(&actor, job) {
                    self.add(
                        "New Job Available!",
                        NotificationKind::Success,
                        Some(AVAILABLE_JOBS_LINK.to_string()),
                    );
                }
            }
            JobEvent::StatusChanged { .. } | JobEvent::Created { .. } => {}
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Notification>> {
        self.notifications
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

fn can_take(actor: &User, job: &Job) -> bool {
    job.status == crate::domain::JobStatus::Pending
        && actor.matchable_truck_type() == Some(job.truck_type_requested)
}
