use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::errors::DuplicateField;
use crate::domain::auth::ports::UserRepository;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;

/// Process-local user store.
///
/// Uniqueness checks and the insert happen under a single write lock, so two
/// concurrent registrations with the same email cannot both succeed.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<UserId, User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, AuthError> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|user| &user.email == email)
            .cloned())
    }

    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, AuthError> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|user| &user.username == username)
            .cloned())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, AuthError> {
        Ok(self.users.read().await.get(id).cloned())
    }

    async fn insert(&self, user: User) -> Result<User, AuthError> {
        let mut users = self.users.write().await;

        if users.values().any(|existing| existing.email == user.email) {
            return Err(AuthError::UserAlreadyExists(DuplicateField::Email));
        }
        if users
            .values()
            .any(|existing| existing.username == user.username)
        {
            return Err(AuthError::UserAlreadyExists(DuplicateField::Username));
        }

        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn exists_by_email(&self, email: &EmailAddress) -> Result<bool, AuthError> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .any(|user| &user.email == email))
    }

    async fn exists_by_username(&self, username: &Username) -> Result<bool, AuthError> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .any(|user| &user.username == username))
    }

    async fn deactivate(&self, id: &UserId) -> Result<(), AuthError> {
        let mut users = self.users.write().await;
        let user = users.get_mut(id).ok_or(AuthError::UserNotFound)?;

        user.is_active = false;
        user.updated_at = Utc::now();

        Ok(())
    }
}
