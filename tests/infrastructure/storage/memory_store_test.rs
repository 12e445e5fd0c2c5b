use bytes::Bytes;

use kargoline::application::ports::BlobStore;
use kargoline::domain::StorageKey;
use kargoline::infrastructure::storage::InMemoryBlobStore;

#[tokio::test]
async fn given_cloned_store_when_saving_through_one_then_visible_through_other() {
    let store = InMemoryBlobStore::new();
    let shared = store.clone();
    let key = StorageKey::new("kargolineJobsDB");

    store.save(&key, Bytes::from("[]")).await.unwrap();

    assert_eq!(shared.load(&key).await.unwrap(), Some(Bytes::from("[]")));
}

#[tokio::test]
async fn given_missing_key_when_loading_or_deleting_then_none_and_ok() {
    let store = InMemoryBlobStore::default();
    let key = StorageKey::new("absent");

    assert!(store.load(&key).await.unwrap().is_none());
    assert!(store.delete(&key).await.is_ok());
}

#[tokio::test]
async fn given_two_writers_with_same_expectation_when_swapping_then_only_first_succeeds() {
    let store = InMemoryBlobStore::new();
    let key = StorageKey::new("jobs");
    let base = Bytes::from("base");
    store.save(&key, base.clone()).await.unwrap();

    let first = store
        .compare_and_swap(&key, Some(&base), Bytes::from("first"))
        .await
        .unwrap();
    let second = store
        .compare_and_swap(&key, Some(&base), Bytes::from("second"))
        .await
        .unwrap();

    assert!(first);
    assert!(!second);
    assert_eq!(store.load(&key).await.unwrap(), Some(Bytes::from("first")));
}

#[tokio::test]
async fn given_existing_value_when_swapping_from_none_then_rejected() {
    let store = InMemoryBlobStore::new();
    let key = StorageKey::new("jobs");
    store.save(&key, Bytes::from("present")).await.unwrap();

    let swapped = store
        .compare_and_swap(&key, None, Bytes::from("other"))
        .await
        .unwrap();

    assert!(!swapped);
}
