use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JobStatus {
    #[serde(rename = "Pending")]
    Pending,
    #[serde(rename = "Accepted")]
    Accepted,
    #[serde(rename = "En Route to Pickup")]
    EnRouteToPickup,
    #[serde(rename = "En Route to Dropoff")]
    EnRouteToDropoff,
    #[serde(rename = "Completed")]
    Completed,
    #[serde(rename = "Cancelled")]
    Cancelled,
}

impl JobStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Pending => "Pending",
            JobStatus::Accepted => "Accepted",
            JobStatus::EnRouteToPickup => "En Route to Pickup",
            JobStatus::EnRouteToDropoff => "En Route to Dropoff",
            JobStatus::Completed => "Completed",
            JobStatus::Cancelled => "Cancelled",
        }
    }

    /// Next state in the driver-driven trip sequence. Pending is left through
    /// acceptance, not through a status update, so it has no successor here.
    pub fn next(&self) -> Option<JobStatus> {
        match self {
            JobStatus::Accepted => Some(JobStatus::EnRouteToPickup),
            JobStatus::EnRouteToPickup => Some(JobStatus::EnRouteToDropoff),
            JobStatus::EnRouteToDropoff => Some(JobStatus::Completed),
            JobStatus::Pending | JobStatus::Completed | JobStatus::Cancelled => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Completed | JobStatus::Cancelled)
    }

    pub fn is_cancellable(&self) -> bool {
        matches!(self, JobStatus::Pending | JobStatus::Accepted)
    }
}

impl FromStr for JobStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pending" => Ok(JobStatus::Pending),
            "Accepted" => Ok(JobStatus::Accepted),
            "En Route to Pickup" => Ok(JobStatus::EnRouteToPickup),
            "En Route to Dropoff" => Ok(JobStatus::EnRouteToDropoff),
            "Completed" => Ok(JobStatus::Completed),
            "Cancelled" => Ok(JobStatus::Cancelled),
            _ => Err(format!("Invalid job status: {}", s)),
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
