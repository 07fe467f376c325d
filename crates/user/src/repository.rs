use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use accounts_shared::{Error, Result};

use crate::aggregate::User;
use crate::types::UserId;

/// Loads and stores User aggregates by identity. Serializing concurrent
/// commands against the same id (locking, versioning) is the
/// implementation's concern, not the caller's.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fails with [`Error::NotFound`] when the id is unknown.
    async fn find(&self, id: &UserId) -> Result<User>;

    /// Resolves the aggregate owning `address`, primary or secondary.
    async fn find_by_email(&self, address: &str) -> Result<User>;

    async fn save(&self, user: &User) -> Result<()>;
}

#[async_trait]
impl<T: UserRepository + ?Sized> UserRepository for Arc<T> {
    async fn find(&self, id: &UserId) -> Result<User> {
        (**self).find(id).await
    }

    async fn find_by_email(&self, address: &str) -> Result<User> {
        (**self).find_by_email(address).await
    }

    async fn save(&self, user: &User) -> Result<()> {
        (**self).save(user).await
    }
}

/// Map-backed repository for tests and in-process embedding.
#[derive(Default)]
pub struct MemoryUserRepository {
    users: RwLock<HashMap<UserId, User>>,
}

impl MemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, user: User) {
        self.users.write().await.insert(user.id(), user);
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn find(&self, id: &UserId) -> Result<User> {
        self.users
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("user {id}")))
    }

    async fn find_by_email(&self, address: &str) -> Result<User> {
        self.users
            .read()
            .await
            .values()
            .find(|u| u.owns_email(address))
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("user owning {address}")))
    }

    async fn save(&self, user: &User) -> Result<()> {
        self.users.write().await.insert(user.id(), user.clone());
        Ok(())
    }
}
