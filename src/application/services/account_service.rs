use std::sync::Arc;

use bytes::Bytes;
use tokio::sync::{Mutex, RwLock};

use crate::application::ports::{BlobStore, BlobStoreError, IdentityProvider};
use crate::domain::{Role, StorageKey, User, UserId};
use crate::infrastructure::observability::mask_email;

use super::simulated_latency::SimulatedLatency;

/// Users collection and the signed-in session. No credentials are kept or
/// checked: an email that matches a stored user is enough to sign in.
pub struct AccountService {
    store: Arc<dyn BlobStore>,
    users_key: StorageKey,
    session_key: StorageKey,
    latency: SimulatedLatency,
    session: RwLock<Option<User>>,
    write_lock: Mutex<()>,
}

impl AccountService {
    pub fn new(
        store: Arc<dyn BlobStore>,
        users_key: StorageKey,
        session_key: StorageKey,
        latency: SimulatedLatency,
    ) -> Self {
        Self {
            store,
            users_key,
            session_key,
            latency,
            session: RwLock::new(None),
            write_lock: Mutex::new(()),
        }
    }

    /// Reload the signed-in user saved by a previous run.
    pub async fn restore_session(&self) -> Result<Option<User>, AccountError> {
        let restored = match self.store.load(&self.session_key).await? {
            None => None,
            Some(blob) => match serde_json::from_slice::<User>(&blob) {
                Ok(user) => Some(user),
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to parse stored session, discarding");
                    self.store.delete(&self.session_key).await?;
                    None
                }
            },
        };

        if let Some(user) = &restored {
            tracing::info!(user_id = %user.id, role = %user.role(), "Session restored");
        }
        *self.session.write().await = restored.clone();
        Ok(restored)
    }

    pub async fn signup(&self, name: &str, email: &str, role: Role) -> Result<User, AccountError> {
        let name = name.trim();
        let email = email.trim();
        if name.is_empty() {
            return Err(AccountError::Validation("name is required".to_string()));
        }
        if !is_plausible_email(email) {
            return Err(AccountError::Validation(format!(
                "invalid email address: {}",
                mask_email(email)
            )));
        }

        SimulatedLatency::wait(self.latency.sign_in).await;

        let _guard = self.write_lock.lock().await;
        let mut users = self.load_users().await?;
        if users.iter().any(|u| u.email == email) {
            return Err(AccountError::EmailTaken(email.to_string()));
        }

        let user = User::new(name, email, role);
        users.push(user.clone());
        self.save_users(&users).await?;
        self.start_session(&user).await?;

        tracing::info!(user_id = %user.id, role = %role, email = %mask_email(email), "User signed up");
        Ok(user)
    }

    pub async fn login(&self, email: &str) -> Result<User, AccountError> {
        SimulatedLatency::wait(self.latency.sign_in).await;

        let email = email.trim();
        let user = self
            .load_users()
            .await?
            .into_iter()
            .find(|u| u.email == email)
            .ok_or(AccountError::InvalidCredentials)?;

        self.start_session(&user).await?;
        tracing::info!(user_id = %user.id, email = %mask_email(email), "User logged in");
        Ok(user)
    }

    pub async fn logout(&self) -> Result<(), AccountError> {
        let previous = self.session.write().await.take();
        self.store.delete(&self.session_key).await?;
        if let Some(user) = previous {
            tracing::info!(user_id = %user.id, "User logged out");
        }
        Ok(())
    }

    /// Replace the signed-in user's record. Only the current session user can
    /// be updated.
    pub async fn update_profile(&self, updated: User) -> Result<User, AccountError> {
        SimulatedLatency::wait(self.latency.update_profile).await;

        let _guard = self.write_lock.lock().await;
        {
            let session = self.session.read().await;
            match session.as_ref() {
                Some(current) if current.id == updated.id => {}
                _ => return Err(AccountError::ProfileMismatch),
            }
        }

        let mut users = self.load_users().await?;
        if let Some(existing) = users.iter_mut().find(|u| u.id == updated.id) {
            *existing = updated.clone();
            self.save_users(&users).await?;
        }
        self.start_session(&updated).await?;

        tracing::info!(user_id = %updated.id, "Profile updated");
        Ok(updated)
    }

    pub async fn user(&self, user_id: UserId) -> Result<Option<User>, AccountError> {
        Ok(self
            .load_users()
            .await?
            .into_iter()
            .find(|u| u.id == user_id))
    }

    pub async fn users(&self) -> Result<Vec<User>, AccountError> {
        self.load_users().await
    }

    async fn start_session(&self, user: &User) -> Result<(), AccountError> {
        let blob = Bytes::from(serde_json::to_vec(user)?);
        self.store.save(&self.session_key, blob).await?;
        *self.session.write().await = Some(user.clone());
        Ok(())
    }

    async fn load_users(&self) -> Result<Vec<User>, AccountError> {
        match self.store.load(&self.users_key).await? {
            Some(blob) => Ok(serde_json::from_slice(&blob)?),
            None => Ok(Vec::new()),
        }
    }

    async fn save_users(&self, users: &[User]) -> Result<(), AccountError> {
        let blob = Bytes::from(serde_json::to_vec(users)?);
        self.store.save(&self.users_key, blob).await?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl IdentityProvider for AccountService {
    async fn current_actor(&self) -> Option<User> {
        self.session.read().await.clone()
    }
}

fn is_plausible_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && domain.contains('.') && !domain.starts_with('.'),
        None => false,
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AccountError {
    #[error("user with email {0} already exists")]
    EmailTaken(String),
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error("user not found or mismatch")]
    ProfileMismatch,
    #[error("invalid account request: {0}")]
    Validation(String),
    #[error("store: {0}")]
    Store(#[from] BlobStoreError),
    #[error("serialization: {0}")]
    Serialization(#[from] serde_json::Error),
}
