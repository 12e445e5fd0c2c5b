mod environment;
mod latency_settings;
mod settings;

pub use environment::Environment;
pub use latency_settings::LatencySettings;
pub use settings::{
    ENV_PREFIX, LoggingSettings, Settings, StorageProviderSetting, StorageSettings, SyncSettings,
};
