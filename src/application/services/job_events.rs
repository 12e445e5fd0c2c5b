use crate::domain::{Job, JobStatus};

/// Where a change was first observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventOrigin {
    /// Made through this process's `JobService`.
    Local,
    /// Picked up from the store during a refresh.
    Remote,
}

#[derive(Debug, Clone, PartialEq)]
pub enum JobEvent {
    Created {
        job: Job,
        origin: EventOrigin,
    },
    Accepted {
        job: Job,
    },
    StatusChanged {
        job: Job,
        previous: JobStatus,
        origin: EventOrigin,
    },
}

impl JobEvent {
    pub fn job(&self) -> &Job {
        match self {
            JobEvent::Created { job, .. }
            | JobEvent::Accepted { job }
            | JobEvent::StatusChanged { job, .. } => job,
        }
    }
}
