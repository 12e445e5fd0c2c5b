use std::path::PathBuf;
use std::sync::Arc;

use bytes::Bytes;
use object_store::local::LocalFileSystem;
use object_store::path::Path as StorePath;
use object_store::{ObjectStore, PutPayload};
use tokio::sync::Mutex;

use crate::application::ports::{BlobStore, BlobStoreError};
use crate::domain::StorageKey;

/// Blobs as `<key>.json` files under a base directory.
///
/// Compare-and-swap is serialised within this process only; separate
/// processes sharing the directory can still interleave.
pub struct LocalBlobStore {
    inner: Arc<LocalFileSystem>,
    cas_lock: Mutex<()>,
}

impl LocalBlobStore {
    pub fn new(base_path: PathBuf) -> Result<Self, BlobStoreError> {
        std::fs::create_dir_all(&base_path).map_err(BlobStoreError::Io)?;
        let fs = LocalFileSystem::new_with_prefix(base_path)
            .map_err(|e| BlobStoreError::WriteFailed(e.to_string()))?;
        Ok(Self {
            inner: Arc::new(fs),
            cas_lock: Mutex::new(()),
        })
    }

    async fn read(&self, key: &StorageKey) -> Result<Option<Bytes>, BlobStoreError> {
        let result = match self.inner.get(&store_path(key)).await {
            Ok(result) => result,
            Err(object_store::Error::NotFound { .. }) => return Ok(None),
            Err(e) => return Err(BlobStoreError::ReadFailed(e.to_string())),
        };

        let bytes = result
            .bytes()
            .await
            .map_err(|e| BlobStoreError::ReadFailed(e.to_string()))?;
        Ok(Some(bytes))
    }

    async fn write(&self, key: &StorageKey, blob: Bytes) -> Result<(), BlobStoreError> {
        self.inner
            .put(&store_path(key), PutPayload::from(blob))
            .await
            .map(|_| ())
            .map_err(|e| BlobStoreError::WriteFailed(e.to_string()))
    }
}

#[async_trait::async_trait]
impl BlobStore for LocalBlobStore {
    async fn load(&self, key: &StorageKey) -> Result<Option<Bytes>, BlobStoreError> {
        self.read(key).await
    }

    async fn save(&self, key: &StorageKey, blob: Bytes) -> Result<(), BlobStoreError> {
        let _guard = self.cas_lock.lock().await;
        self.write(key, blob).await
    }

    async fn delete(&self, key: &StorageKey) -> Result<(), BlobStoreError> {
        let _guard = self.cas_lock.lock().await;
        match self.inner.delete(&store_path(key)).await {
            Ok(()) | Err(object_store::Error::NotFound { .. }) => Ok(()),
            Err(e) => Err(BlobStoreError::DeleteFailed(e.to_string())),
        }
    }

    async fn compare_and_swap(
        &self,
        key: &StorageKey,
        expected: Option<&Bytes>,
        blob: Bytes,
    ) -> Result<bool, BlobStoreError> {
        let _guard = self.cas_lock.lock().await;
        let current = self.read(key).await?;
        if current.as_ref() != expected {
            return Ok(false);
        }
        self.write(key, blob).await?;
        Ok(true)
    }
}

fn store_path(key: &StorageKey) -> StorePath {
    StorePath::from(format!("{}.json", key.as_str()))
}
