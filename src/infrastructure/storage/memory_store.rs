use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use bytes::Bytes;

use crate::application::ports::{BlobStore, BlobStoreError};
use crate::domain::StorageKey;

/// Process-local store. Clones share the same blobs, which lets several
/// services act as separate clients of one backend.
#[derive(Clone, Default)]
pub struct InMemoryBlobStore {
    blobs: Arc<Mutex<HashMap<StorageKey, Bytes>>>,
}

impl InMemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn blobs(&self) -> MutexGuard<'_, HashMap<StorageKey, Bytes>> {
        self.blobs
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait::async_trait]
impl BlobStore for InMemoryBlobStore {
    async fn load(&self, key: &StorageKey) -> Result<Option<Bytes>, BlobStoreError> {
        Ok(self.blobs().get(key).cloned())
    }

    async fn save(&self, key: &StorageKey, blob: Bytes) -> Result<(), BlobStoreError> {
        self.blobs().insert(key.clone(), blob);
        Ok(())
    }

    async fn delete(&self, key: &StorageKey) -> Result<(), BlobStoreError> {
        self.blobs().remove(key);
        Ok(())
    }

    async fn compare_and_swap(
        &self,
        key: &StorageKey,
        expected: Option<&Bytes>,
        blob: Bytes,
    ) -> Result<bool, BlobStoreError> {
        let mut blobs = self.blobs();
        if blobs.get(key) != expected {
            return Ok(false);
        }
        blobs.insert(key.clone(), blob);
        Ok(true)
    }
}
