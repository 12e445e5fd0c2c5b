use std::sync::Arc;

use bytes::Bytes;

use kargoline::application::ports::{BlobStore, IdentityProvider};
use kargoline::application::services::{AccountError, AccountService, SimulatedLatency};
use kargoline::domain::{Role, StorageKey, Truck, TruckType};
use kargoline::infrastructure::storage::InMemoryBlobStore;

use crate::helpers::{SESSION_KEY, USERS_KEY};

fn account_service(store: &InMemoryBlobStore) -> AccountService {
    AccountService::new(
        Arc::new(store.clone()),
        StorageKey::new(USERS_KEY),
        StorageKey::new(SESSION_KEY),
        SimulatedLatency::none(),
    )
}

#[tokio::test]
async fn given_new_email_when_signing_up_then_user_is_stored_and_signed_in() {
    let store = InMemoryBlobStore::new();
    let accounts = account_service(&store);

    let user = accounts
        .signup("Sam Shipper", "sam@example.com", Role::Shipper)
        .await
        .unwrap();

    assert_eq!(user.role(), Role::Shipper);
    assert_eq!(accounts.current_actor().await, Some(user.clone()));
    assert_eq!(accounts.users().await.unwrap(), vec![user.clone()]);
    assert_eq!(accounts.user(user.id).await.unwrap(), Some(user));
    assert!(
        store
            .load(&StorageKey::new(SESSION_KEY))
            .await
            .unwrap()
            .is_some()
    );
}

#[tokio::test]
async fn given_driver_signup_when_created_then_profile_starts_unavailable_without_truck() {
    let accounts = account_service(&InMemoryBlobStore::new());

    let user = accounts
        .signup("Dana Driver", "dana@example.com", Role::Driver)
        .await
        .unwrap();

    let profile = user.driver_profile().unwrap();
    assert!(!profile.is_available);
    assert!(profile.truck.is_none());
    assert!(profile.earnings_history.is_empty());
}

#[tokio::test]
async fn given_existing_email_when_signing_up_then_email_taken() {
    let accounts = account_service(&InMemoryBlobStore::new());
    accounts
        .signup("Sam", "sam@example.com", Role::Shipper)
        .await
        .unwrap();

    let result = accounts
        .signup("Someone Else", "sam@example.com", Role::Driver)
        .await;

    assert!(matches!(result, Err(AccountError::EmailTaken(_))));
    assert_eq!(accounts.users().await.unwrap().len(), 1);
}

#[tokio::test]
async fn given_blank_name_or_bad_email_when_signing_up_then_validation_error() {
    let accounts = account_service(&InMemoryBlobStore::new());

    let blank = accounts.signup("  ", "sam@example.com", Role::Shipper).await;
    let bad_email = accounts.signup("Sam", "not-an-email", Role::Shipper).await;

    assert!(matches!(blank, Err(AccountError::Validation(_))));
    assert!(matches!(bad_email, Err(AccountError::Validation(_))));
    assert!(accounts.users().await.unwrap().is_empty());
}

#[tokio::test]
async fn given_registered_email_when_logging_in_then_session_starts() {
    let store = InMemoryBlobStore::new();
    let registered = account_service(&store)
        .signup("Sam", "sam@example.com", Role::Shipper)
        .await
        .unwrap();
    let accounts = account_service(&store);

    let user = accounts.login("sam@example.com").await.unwrap();

    assert_eq!(user, registered);
    assert_eq!(accounts.current_actor().await, Some(registered));
}

#[tokio::test]
async fn given_unknown_email_when_logging_in_then_invalid_credentials() {
    let accounts = account_service(&InMemoryBlobStore::new());

    let result = accounts.login("ghost@example.com").await;

    assert!(matches!(result, Err(AccountError::InvalidCredentials)));
    assert!(accounts.current_actor().await.is_none());
}

#[tokio::test]
async fn given_signed_in_user_when_logging_out_then_session_cleared_everywhere() {
    let store = InMemoryBlobStore::new();
    let accounts = account_service(&store);
    accounts
        .signup("Sam", "sam@example.com", Role::Shipper)
        .await
        .unwrap();

    accounts.logout().await.unwrap();

    assert!(accounts.current_actor().await.is_none());
    assert!(
        store
            .load(&StorageKey::new(SESSION_KEY))
            .await
            .unwrap()
            .is_none()
    );
    assert!(account_service(&store).restore_session().await.unwrap().is_none());
}

#[tokio::test]
async fn given_saved_session_when_restoring_then_user_is_signed_in_again() {
    let store = InMemoryBlobStore::new();
    let user = account_service(&store)
        .signup("Dana", "dana@example.com", Role::Driver)
        .await
        .unwrap();

    let accounts = account_service(&store);
    let restored = accounts.restore_session().await.unwrap();

    assert_eq!(restored, Some(user.clone()));
    assert_eq!(accounts.current_actor().await, Some(user));
}

#[tokio::test]
async fn given_corrupt_session_when_restoring_then_discarded() {
    let store = InMemoryBlobStore::new();
    let session_key = StorageKey::new(SESSION_KEY);
    store
        .save(&session_key, Bytes::from_static(b"[1, 2"))
        .await
        .unwrap();

    let restored = account_service(&store).restore_session().await.unwrap();

    assert!(restored.is_none());
    assert!(store.load(&session_key).await.unwrap().is_none());
}

#[tokio::test]
async fn given_driver_when_updating_profile_then_user_and_session_replaced() {
    let store = InMemoryBlobStore::new();
    let accounts = account_service(&store);
    let mut user = accounts
        .signup("Dana", "dana@example.com", Role::Driver)
        .await
        .unwrap();
    {
        let profile = user.driver_profile_mut().unwrap();
        profile.truck = Some(Truck::new(TruckType::Pickup, "KRG-777", "Toyota", "Tacoma", "2019"));
        profile.is_available = true;
    }
    user.phone = Some("555-0100".to_string());

    let updated = accounts.update_profile(user.clone()).await.unwrap();

    assert_eq!(updated, user);
    assert_eq!(accounts.current_actor().await, Some(user.clone()));
    assert_eq!(accounts.user(user.id).await.unwrap(), Some(user.clone()));
    assert_eq!(
        account_service(&store).restore_session().await.unwrap(),
        Some(user)
    );
}

#[tokio::test]
async fn given_other_user_when_updating_profile_then_profile_mismatch() {
    let store = InMemoryBlobStore::new();
    let other = account_service(&store)
        .signup("Sam", "sam@example.com", Role::Shipper)
        .await
        .unwrap();
    let accounts = account_service(&store);
    accounts
        .signup("Dana", "dana@example.com", Role::Driver)
        .await
        .unwrap();

    let mut edited = other.clone();
    edited.name = "Mallory".to_string();
    let result = accounts.update_profile(edited).await;

    assert!(matches!(result, Err(AccountError::ProfileMismatch)));
    assert_eq!(accounts.user(other.id).await.unwrap(), Some(other));
}

#[tokio::test]
async fn given_no_session_when_updating_profile_then_profile_mismatch() {
    let store = InMemoryBlobStore::new();
    let user = account_service(&store)
        .signup("Sam", "sam@example.com", Role::Shipper)
        .await
        .unwrap();
    let accounts = account_service(&store);

    let result = accounts.update_profile(user).await;

    assert!(matches!(result, Err(AccountError::ProfileMismatch)));
}
