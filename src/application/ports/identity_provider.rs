use crate::domain::User;

/// Supplies the actor on whose behalf the process is acting. Callers trust the
/// returned user as-is.
#[async_trait::async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn current_actor(&self) -> Option<User>;
}
