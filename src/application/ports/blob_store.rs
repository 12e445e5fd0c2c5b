use std::io;

use bytes::Bytes;

use crate::domain::StorageKey;

/// Key-value store of whole-collection snapshots.
#[async_trait::async_trait]
pub trait BlobStore: Send + Sync {
    async fn load(&self, key: &StorageKey) -> Result<Option<Bytes>, BlobStoreError>;

    async fn save(&self, key: &StorageKey, blob: Bytes) -> Result<(), BlobStoreError>;

    async fn delete(&self, key: &StorageKey) -> Result<(), BlobStoreError>;

    /// Writes `blob` only if the stored value still equals `expected`
    /// (`None` meaning the key is absent). Returns whether the write happened.
    async fn compare_and_swap(
        &self,
        key: &StorageKey,
        expected: Option<&Bytes>,
        blob: Bytes,
    ) -> Result<bool, BlobStoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum BlobStoreError {
    #[error("read failed: {0}")]
    ReadFailed(String),
    #[error("write failed: {0}")]
    WriteFailed(String),
    #[error("delete failed: {0}")]
    DeleteFailed(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}
