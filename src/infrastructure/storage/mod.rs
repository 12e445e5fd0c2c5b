mod local_store;
mod memory_store;
mod store_factory;

pub use local_store::LocalBlobStore;
pub use memory_store::InMemoryBlobStore;
pub use store_factory::BlobStoreFactory;
