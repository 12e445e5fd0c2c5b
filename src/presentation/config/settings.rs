use std::time::Duration;

use config::{Config, ConfigError, Environment as EnvironmentSource, File};
use serde::Deserialize;

use crate::application::services::DEFAULT_POLL_INTERVAL;
use crate::infrastructure::observability::DEFAULT_LOG_FILTER;

use super::{Environment, LatencySettings};

pub const ENV_PREFIX: &str = "APP";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub storage: StorageSettings,
    pub sync: SyncSettings,
    pub latency: LatencySettings,
    pub logging: LoggingSettings,
}

impl Settings {
    /// Defaults, then `appsettings.<environment>.toml` if present, then
    /// `APP__SECTION__FIELD` environment variables.
    pub fn load(environment: Environment) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(
                File::with_name(&format!("appsettings.{}", environment.file_suffix()))
                    .required(false),
            )
            .add_source(EnvironmentSource::with_prefix(ENV_PREFIX).separator("__"))
            .build()?
            .try_deserialize::<Self>()?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sync.poll_interval_ms == 0 {
            return Err(ConfigError::Message(
                "sync.poll_interval_ms must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    pub provider: StorageProviderSetting,
    pub local_path: String,
    pub jobs_key: String,
    pub users_key: String,
    pub session_key: String,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            provider: StorageProviderSetting::Local,
            local_path: "data".to_string(),
            jobs_key: "kargolineJobsDB".to_string(),
            users_key: "kargolineUsersDB".to_string(),
            session_key: "kargolineUser".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageProviderSetting {
    Local,
    Memory,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SyncSettings {
    pub poll_interval_ms: u64,
}

impl SyncSettings {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

impl Default for SyncSettings {
    fn default() -> Self {
        Self {
            poll_interval_ms: DEFAULT_POLL_INTERVAL.as_millis() as u64,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub level: String,
    pub enable_json: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_FILTER.to_string(),
            enable_json: false,
        }
    }
}
