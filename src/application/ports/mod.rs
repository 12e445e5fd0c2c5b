mod blob_store;
mod clock;
mod identity_provider;

pub use blob_store::{BlobStore, BlobStoreError};
pub use clock::Clock;
pub use identity_provider::IdentityProvider;
