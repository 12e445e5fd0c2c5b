use std::path::PathBuf;
use std::sync::Arc;

use crate::application::ports::{BlobStore, BlobStoreError};
use crate::presentation::config::{StorageProviderSetting, StorageSettings};

use super::local_store::LocalBlobStore;
use super::memory_store::InMemoryBlobStore;

pub struct BlobStoreFactory;

impl BlobStoreFactory {
    pub fn create(settings: &StorageSettings) -> Result<Arc<dyn BlobStore>, BlobStoreError> {
        match settings.provider {
            StorageProviderSetting::Local => {
                let path = PathBuf::from(&settings.local_path);
                tracing::info!(path = %path.display(), "Using local blob store");
                let store = LocalBlobStore::new(path)?;
                Ok(Arc::new(store))
            }
            StorageProviderSetting::Memory => {
                tracing::info!("Using in-memory blob store");
                Ok(Arc::new(InMemoryBlobStore::new()))
            }
        }
    }
}
