use std::sync::Arc;

use crate::application::ports::{BlobStore, BlobStoreError, Clock, IdentityProvider};
use crate::application::services::{
    AccountService, JobService, JobSyncWorker, NotificationCenter,
};
use crate::domain::StorageKey;
use crate::infrastructure::storage::BlobStoreFactory;
use crate::infrastructure::time::SystemClock;
use crate::presentation::config::Settings;

/// Every service, built once and shared by `Arc`.
pub struct AppState {
    pub job_service: Arc<JobService>,
    pub account_service: Arc<AccountService>,
    pub notification_center: Arc<NotificationCenter>,
    pub settings: Settings,
}

impl AppState {
    pub fn from_settings(settings: Settings) -> Result<Self, BlobStoreError> {
        let store = BlobStoreFactory::create(&settings.storage)?;
        Ok(Self::with_store(settings, store, Arc::new(SystemClock)))
    }

    pub fn with_store(settings: Settings, store: Arc<dyn BlobStore>, clock: Arc<dyn Clock>) -> Self {
        let latency = settings.latency.to_latency();

        let job_service = Arc::new(JobService::new(
            Arc::clone(&store),
            clock,
            StorageKey::new(&settings.storage.jobs_key),
            latency,
        ));

        let account_service = Arc::new(AccountService::new(
            Arc::clone(&store),
            StorageKey::new(&settings.storage.users_key),
            StorageKey::new(&settings.storage.session_key),
            latency,
        ));

        let identity: Arc<dyn IdentityProvider> = account_service.clone();
        let notification_center = Arc::new(NotificationCenter::new(identity));

        Self {
            job_service,
            account_service,
            notification_center,
            settings,
        }
    }

    pub fn sync_worker(&self) -> JobSyncWorker {
        JobSyncWorker::new(
            Arc::clone(&self.job_service),
            self.settings.sync.poll_interval(),
        )
    }
}
