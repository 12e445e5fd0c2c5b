use std::time::Duration;

use serde::Deserialize;

use crate::application::services::SimulatedLatency;

/// Artificial backend delays, in milliseconds. Ignored unless `enabled`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LatencySettings {
    pub enabled: bool,
    pub create_job_ms: u64,
    pub accept_job_ms: u64,
    pub update_job_ms: u64,
    pub sign_in_ms: u64,
    pub update_profile_ms: u64,
}

impl Default for LatencySettings {
    fn default() -> Self {
        Self {
            enabled: false,
            create_job_ms: 1000,
            accept_job_ms: 750,
            update_job_ms: 500,
            sign_in_ms: 1000,
            update_profile_ms: 500,
        }
    }
}

impl LatencySettings {
    pub fn to_latency(&self) -> SimulatedLatency {
        if !self.enabled {
            return SimulatedLatency::none();
        }
        SimulatedLatency {
            create_job: Duration::from_millis(self.create_job_ms),
            accept_job: Duration::from_millis(self.accept_job_ms),
            update_job: Duration::from_millis(self.update_job_ms),
            sign_in: Duration::from_millis(self.sign_in_ms),
            update_profile: Duration::from_millis(self.update_profile_ms),
        }
    }
}
