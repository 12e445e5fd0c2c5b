mod account_service;
mod job_events;
mod job_service;
mod job_sync_worker;
mod notification_center;
mod simulated_latency;

pub use account_service::{AccountError, AccountService};
pub use job_events::{EventOrigin, JobEvent};
pub use job_service::{JobError, JobService};
pub use job_sync_worker::{DEFAULT_POLL_INTERVAL, JobSyncWorker, MIN_POLL_INTERVAL};
pub use notification_center::{AVAILABLE_JOBS_LINK, NotificationCenter, job_link};
pub use simulated_latency::SimulatedLatency;
