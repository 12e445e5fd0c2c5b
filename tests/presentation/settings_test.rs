use std::time::Duration;

use kargoline::presentation::config::{Environment, LatencySettings, StorageProviderSetting};
use kargoline::presentation::Settings;

#[test]
fn given_environment_names_when_parsing_then_case_insensitive() {
    assert_eq!(Environment::try_from("LOCAL".to_string()), Ok(Environment::Local));
    assert_eq!(Environment::try_from("test".to_string()), Ok(Environment::Test));
    assert_eq!(Environment::try_from("production".to_string()), Ok(Environment::Prod));
}

#[test]
fn given_unknown_environment_when_parsing_then_error_lists_choices() {
    let err = Environment::try_from("staging".to_string()).unwrap_err();
    assert!(err.contains("staging"));
    assert!(err.contains("local, test, or prod"));
}

#[test]
fn given_default_settings_when_created_then_well_known_keys_are_used() {
    let settings = Settings::default();

    assert_eq!(settings.storage.provider, StorageProviderSetting::Local);
    assert_eq!(settings.storage.jobs_key, "kargolineJobsDB");
    assert_eq!(settings.storage.users_key, "kargolineUsersDB");
    assert_eq!(settings.storage.session_key, "kargolineUser");
    assert_eq!(settings.sync.poll_interval(), Duration::from_secs(2));
}

#[test]
fn given_latency_disabled_when_converting_then_no_delays() {
    let latency = LatencySettings::default().to_latency();
    assert_eq!(latency.create_job, Duration::ZERO);
    assert_eq!(latency.accept_job, Duration::ZERO);
}

#[test]
fn given_latency_enabled_when_converting_then_configured_delays() {
    let settings = LatencySettings {
        enabled: true,
        ..LatencySettings::default()
    };

    let latency = settings.to_latency();

    assert_eq!(latency.create_job, Duration::from_millis(1000));
    assert_eq!(latency.accept_job, Duration::from_millis(750));
    assert_eq!(latency.update_job, Duration::from_millis(500));
    assert_eq!(latency.sign_in, Duration::from_millis(1000));
    assert_eq!(latency.update_profile, Duration::from_millis(500));
}

#[test]
fn given_no_settings_file_for_environment_when_loading_then_defaults_apply() {
    let settings = Settings::load(Environment::Test).unwrap();

    assert_eq!(settings.storage.jobs_key, "kargolineJobsDB");
    assert!(!settings.latency.enabled);
}

#[test]
fn given_local_settings_file_when_loading_then_its_values_are_used() {
    let settings = Settings::load(Environment::Local).unwrap();

    assert!(settings.latency.enabled);
    assert_eq!(settings.storage.local_path, "data");
}

#[test]
fn given_zero_poll_interval_when_validating_then_rejected() {
    let mut settings = Settings::default();
    settings.sync.poll_interval_ms = 0;

    let err = settings.validate().unwrap_err();

    assert!(err.to_string().contains("poll_interval_ms"));
}

#[test]
fn given_default_settings_when_validating_then_accepted() {
    assert!(Settings::default().validate().is_ok());
}
