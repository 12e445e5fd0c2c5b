use std::time::Duration;

/// Artificial delays applied before each write, emulating a remote backend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SimulatedLatency {
    pub create_job: Duration,
    pub accept_job: Duration,
    pub update_job: Duration,
    pub sign_in: Duration,
    pub update_profile: Duration,
}

impl SimulatedLatency {
    pub fn none() -> Self {
        Self::default()
    }

    pub async fn wait(delay: Duration) {
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}
