use std::sync::Arc;

use bytes::Bytes;
use chrono::{DateTime, Utc};
use tokio::sync::{RwLock, broadcast};

use crate::application::ports::{BlobStore, BlobStoreError, Clock};
use crate::domain::{
    Feedback, Job, JobId, JobStatus, NewJob, RatingSummary, Role, StorageKey, User, UserId,
    pricing,
};
use crate::infrastructure::observability::sanitize_text;

use super::job_events::{EventOrigin, JobEvent};
use super::simulated_latency::SimulatedLatency;

const EVENT_CHANNEL_CAPACITY: usize = 256;
const MAX_COMMIT_ATTEMPTS: usize = 5;

#[derive(Default)]
struct Snapshot {
    jobs: Vec<Job>,
    /// Serialized form of `jobs` as last read from or written to the store.
    blob: Option<Bytes>,
}

/// Owns the job collection and enforces the job lifecycle.
///
/// The store is the source of truth: every mutation re-reads the stored
/// collection, validates against it and writes back with a compare-and-swap,
/// so two services sharing a store cannot both accept the same job.
pub struct JobService {
    store: Arc<dyn BlobStore>,
    clock: Arc<dyn Clock>,
    jobs_key: StorageKey,
    latency: SimulatedLatency,
    snapshot: RwLock<Snapshot>,
    events: broadcast::Sender<JobEvent>,
}

impl JobService {
    pub fn new(
        store: Arc<dyn BlobStore>,
        clock: Arc<dyn Clock>,
        jobs_key: StorageKey,
        latency: SimulatedLatency,
    ) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            store,
            clock,
            jobs_key,
            latency,
            snapshot: RwLock::new(Snapshot::default()),
            events,
        }
    }

    /// Replace in-memory state with the stored collection. A blob that cannot
    /// be parsed is discarded. Returns the number of jobs loaded.
    pub async fn load(&self) -> Result<usize, JobError> {
        let stored = self.store.load(&self.jobs_key).await?;
        let mut snapshot = self.snapshot.write().await;

        let Some(blob) = stored else {
            tracing::info!(key = %self.jobs_key, "No stored jobs, starting with empty collection");
            *snapshot = Snapshot::default();
            return Ok(0);
        };

        match serde_json::from_slice::<Vec<Job>>(&blob) {
            Ok(jobs) => {
                let count = jobs.len();
                tracing::info!(key = %self.jobs_key, count, "Restored jobs from store");
                *snapshot = Snapshot {
                    jobs,
                    blob: Some(blob),
                };
                Ok(count)
            }
            Err(e) => {
                tracing::warn!(
                    key = %self.jobs_key,
                    error = %e,
                    "Failed to parse stored jobs, discarding"
                );
                self.store.delete(&self.jobs_key).await?;
                *snapshot = Snapshot::default();
                Ok(0)
            }
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<JobEvent> {
        self.events.subscribe()
    }

    pub async fn create_job(&self, details: NewJob, actor: &User) -> Result<Job, JobError> {
        if actor.role() != Role::Shipper {
            tracing::warn!(user_id = %actor.id, role = %actor.role(), "Rejected job creation");
            return Err(JobError::NotAuthorized(
                "only shippers can create jobs".to_string(),
            ));
        }
        details.validate().map_err(JobError::Validation)?;

        SimulatedLatency::wait(self.latency.create_job).await;

        let job = Job::new(details, actor.id, self.clock.now());
        let created = self
            .commit(|jobs, _| {
                jobs.push(job.clone());
                Ok(job.clone())
            })
            .await?;

        tracing::info!(
            job_id = %created.id,
            shipper_id = %created.shipper_id,
            truck_type = %created.truck_type_requested,
            estimated_price = created.estimated_price,
            goods = %sanitize_text(&created.goods_description),
            "Job created"
        );
        self.publish(JobEvent::Created {
            job: created.clone(),
            origin: EventOrigin::Local,
        });
        Ok(created)
    }

    pub async fn accept_job(&self, job_id: JobId, driver_id: UserId) -> Result<Job, JobError> {
        SimulatedLatency::wait(self.latency.accept_job).await;

        let result = self
            .commit(|jobs, now| {
                let job = find_mut(jobs, job_id)?;
                if job.status != JobStatus::Pending {
                    return Err(JobError::InvalidState {
                        job_id,
                        status: job.status,
                        reason: "job is no longer available".to_string(),
                    });
                }
                job.status = JobStatus::Accepted;
                job.driver_id = Some(driver_id);
                job.accepted_at = Some(now);
                Ok(job.clone())
            })
            .await;

        match result {
            Ok(job) => {
                tracing::info!(job_id = %job_id, driver_id = %driver_id, "Job accepted");
                self.publish(JobEvent::Accepted { job: job.clone() });
                Ok(job)
            }
            Err(e) => {
                tracing::warn!(job_id = %job_id, driver_id = %driver_id, error = %e, "Job acceptance failed");
                Err(e)
            }
        }
    }

    /// Advance a job one step along Accepted → En Route to Pickup → En Route
    /// to Dropoff → Completed. Completion prices the trip from its duration.
    pub async fn update_job_status(
        &self,
        job_id: JobId,
        new_status: JobStatus,
    ) -> Result<Job, JobError> {
        SimulatedLatency::wait(self.latency.update_job).await;

        let (previous, job) = self
            .commit(|jobs, now| {
                let job = find_mut(jobs, job_id)?;
                if job.status.next() != Some(new_status) {
                    return Err(JobError::InvalidState {
                        job_id,
                        status: job.status,
                        reason: format!("cannot move to {}", new_status),
                    });
                }

                let previous = job.status;
                job.status = new_status;
                match new_status {
                    JobStatus::EnRouteToDropoff => job.started_trip_at = Some(now),
                    JobStatus::Completed => complete_trip(job, now),
                    _ => {}
                }
                Ok((previous, job.clone()))
            })
            .await?;

        tracing::info!(
            job_id = %job_id,
            from = %previous,
            to = %new_status,
            final_fare = ?job.final_fare,
            "Job status updated"
        );
        self.publish(JobEvent::StatusChanged {
            job: job.clone(),
            previous,
            origin: EventOrigin::Local,
        });
        Ok(job)
    }

    pub async fn cancel_job(&self, job_id: JobId, actor: &User) -> Result<Job, JobError> {
        SimulatedLatency::wait(self.latency.update_job).await;

        let (previous, job) = self
            .commit(|jobs, _| {
                let job = find_mut(jobs, job_id)?;
                if job.shipper_id != actor.id {
                    return Err(JobError::NotAuthorized(
                        "only the job's shipper can cancel it".to_string(),
                    ));
                }
                if !job.status.is_cancellable() {
                    return Err(JobError::InvalidState {
                        job_id,
                        status: job.status,
                        reason: "only pending or accepted jobs can be cancelled".to_string(),
                    });
                }
                let previous = job.status;
                job.status = JobStatus::Cancelled;
                Ok((previous, job.clone()))
            })
            .await?;

        tracing::info!(job_id = %job_id, shipper_id = %actor.id, from = %previous, "Job cancelled");
        self.publish(JobEvent::StatusChanged {
            job: job.clone(),
            previous,
            origin: EventOrigin::Local,
        });
        Ok(job)
    }

    /// Record the rater's feedback about the other party of a completed job.
    /// Each side may rate once.
    pub async fn submit_rating(
        &self,
        job_id: JobId,
        rating: u8,
        review: &str,
        rater: &User,
    ) -> Result<Job, JobError> {
        if !Feedback::is_valid_rating(rating) {
            return Err(JobError::Validation(format!(
                "rating must be between {} and {}, got {}",
                crate::domain::MIN_RATING,
                crate::domain::MAX_RATING,
                rating
            )));
        }

        SimulatedLatency::wait(self.latency.update_job).await;

        let job = self
            .commit(|jobs, _| {
                let job = find_mut(jobs, job_id)?;
                if job.status != JobStatus::Completed {
                    return Err(JobError::InvalidState {
                        job_id,
                        status: job.status,
                        reason: "only completed jobs can be rated".to_string(),
                    });
                }

                let status = job.status;
                let slot = match rater.role() {
                    Role::Shipper if job.shipper_id == rater.id => &mut job.driver_feedback,
                    Role::Driver if job.driver_id == Some(rater.id) => &mut job.shipper_feedback,
                    _ => {
                        return Err(JobError::NotAuthorized(
                            "only the job's shipper or driver can rate it".to_string(),
                        ));
                    }
                };
                if slot.is_some() {
                    return Err(JobError::InvalidState {
                        job_id,
                        status,
                        reason: "rating already submitted".to_string(),
                    });
                }
                *slot = Some(Feedback::new(rating, review));
                Ok(job.clone())
            })
            .await?;

        tracing::info!(
            job_id = %job_id,
            rater_id = %rater.id,
            rated = %rater.role().counterpart(),
            rating,
            review = %sanitize_text(review),
            "Rating submitted"
        );
        Ok(job)
    }

    pub async fn job(&self, job_id: JobId) -> Option<Job> {
        let snapshot = self.snapshot.read().await;
        snapshot.jobs.iter().find(|j| j.id == job_id).cloned()
    }

    /// All jobs in insertion order.
    pub async fn jobs(&self) -> Vec<Job> {
        self.snapshot.read().await.jobs.clone()
    }

    pub async fn jobs_for_shipper(&self, shipper_id: UserId) -> Vec<Job> {
        let snapshot = self.snapshot.read().await;
        snapshot
            .jobs
            .iter()
            .filter(|j| j.shipper_id == shipper_id)
            .cloned()
            .collect()
    }

    /// Pending jobs matching the driver's truck. Empty unless the user is a
    /// driver with a truck on file who is marked available.
    pub async fn available_jobs_for(&self, driver: &User) -> Vec<Job> {
        let Some(truck_type) = driver.matchable_truck_type() else {
            return Vec::new();
        };
        let snapshot = self.snapshot.read().await;
        snapshot
            .jobs
            .iter()
            .filter(|j| j.status == JobStatus::Pending && j.truck_type_requested == truck_type)
            .cloned()
            .collect()
    }

    pub async fn active_job_for_driver(&self, driver_id: UserId) -> Option<Job> {
        let snapshot = self.snapshot.read().await;
        snapshot
            .jobs
            .iter()
            .find(|j| j.driver_id == Some(driver_id) && !j.status.is_terminal())
            .cloned()
    }

    /// Ratings the user has received from the other side of their jobs.
    pub async fn rating_summary(&self, user: &User) -> RatingSummary {
        let snapshot = self.snapshot.read().await;
        let received = snapshot
            .jobs
            .iter()
            .filter_map(|j| match user.role() {
                Role::Driver if j.driver_id == Some(user.id) => j.driver_feedback.clone(),
                Role::Shipper if j.shipper_id == user.id => j.shipper_feedback.clone(),
                _ => None,
            })
            .collect();
        RatingSummary::from_feedback(received)
    }

    /// Reconcile with the store. When the stored snapshot differs from the one
    /// last seen, in-memory state is replaced wholesale and one event is
    /// published per job that appeared or changed status.
    pub async fn refresh(&self) -> Result<Vec<JobEvent>, JobError> {
        let Some(latest) = self.store.load(&self.jobs_key).await? else {
            return Ok(Vec::new());
        };

        let mut snapshot = self.snapshot.write().await;
        if snapshot.blob.as_ref() == Some(&latest) {
            return Ok(Vec::new());
        }

        let jobs: Vec<Job> = serde_json::from_slice(&latest)?;
        let events = remote_changes(&snapshot.jobs, &jobs);

        *snapshot = Snapshot {
            jobs,
            blob: Some(latest),
        };
        drop(snapshot);

        tracing::debug!(changes = events.len(), "Jobs refreshed from store");
        for event in &events {
            self.publish(event.clone());
        }
        Ok(events)
    }

    /// Read-modify-write against the store, retried while another writer
    /// keeps changing the blob underneath. Changes other clients made since
    /// the last refresh are published as remote events once the write lands,
    /// ahead of the caller's own event.
    async fn commit<T, F>(&self, mut apply: F) -> Result<T, JobError>
    where
        F: FnMut(&mut Vec<Job>, DateTime<Utc>) -> Result<T, JobError>,
    {
        let mut snapshot = self.snapshot.write().await;

        for attempt in 1..=MAX_COMMIT_ATTEMPTS {
            let current = self.store.load(&self.jobs_key).await?;
            let mut jobs: Vec<Job> = match &current {
                Some(blob) => serde_json::from_slice(blob)?,
                None => Vec::new(),
            };
            let absorbed = if snapshot.blob == current {
                Vec::new()
            } else {
                remote_changes(&snapshot.jobs, &jobs)
            };

            let output = apply(&mut jobs, self.clock.now())?;
            let blob = Bytes::from(serde_json::to_vec(&jobs)?);

            if self
                .store
                .compare_and_swap(&self.jobs_key, current.as_ref(), blob.clone())
                .await?
            {
                *snapshot = Snapshot {
                    jobs,
                    blob: Some(blob),
                };
                if !absorbed.is_empty() {
                    tracing::debug!(
                        changes = absorbed.len(),
                        "Absorbed remote job changes during write"
                    );
                }
                for event in absorbed {
                    self.publish(event);
                }
                return Ok(output);
            }

            tracing::debug!(attempt, key = %self.jobs_key, "Store changed during write, retrying");
        }

        Err(JobError::Conflict(MAX_COMMIT_ATTEMPTS))
    }

    fn publish(&self, event: JobEvent) {
        // No subscribers is not an error.
        let _ = self.events.send(event);
    }
}

/// One event per job in `latest` that is new to `known` or whose status
/// differs from it.
fn remote_changes(known: &[Job], latest: &[Job]) -> Vec<JobEvent> {
    latest
        .iter()
        .filter_map(|job| match known.iter().find(|k| k.id == job.id) {
            None => Some(JobEvent::Created {
                job: job.clone(),
                origin: EventOrigin::Remote,
            }),
            Some(previous) if previous.status != job.status => Some(JobEvent::StatusChanged {
                job: job.clone(),
                previous: previous.status,
                origin: EventOrigin::Remote,
            }),
            Some(_) => None,
        })
        .collect()
}

fn find_mut(jobs: &mut [Job], job_id: JobId) -> Result<&mut Job, JobError> {
    jobs.iter_mut()
        .find(|j| j.id == job_id)
        .ok_or(JobError::NotFound(job_id))
}

fn complete_trip(job: &mut Job, now: DateTime<Utc>) {
    job.completed_at = Some(now);
    match job.started_trip_at {
        Some(started) => {
            let minutes = pricing::trip_duration_minutes(started, now);
            let fare = pricing::final_fare(job.truck_type_requested, job.estimated_distance, minutes);
            job.final_fare = Some(fare);
            job.commission = pricing::commission(fare);
        }
        None => {
            tracing::warn!(
                job_id = %job.id,
                "Job completed without a trip start, final fare left unset"
            );
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum JobError {
    #[error("job not found: {0}")]
    NotFound(JobId),
    #[error("not authorized: {0}")]
    NotAuthorized(String),
    #[error("job {job_id} is {status}: {reason}")]
    InvalidState {
        job_id: JobId,
        status: JobStatus,
        reason: String,
    },
    #[error("invalid request: {0}")]
    Validation(String),
    #[error("store kept changing during write, gave up after {0} attempts")]
    Conflict(usize),
    #[error("store: {0}")]
    Store(#[from] BlobStoreError),
    #[error("serialization: {0}")]
    Serialization(#[from] serde_json::Error),
}
