//! User repository

use crate::domain::User;
use async_trait::async_trait;
use quill_common::store::MemoryCollection;
use quill_common::Result;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn insert(&self, user: User) -> Result<()>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>>;
    async fn find_by_username(&self, username: &str) -> Result<Option<User>>;
}

/// Memory-backed user repository, keyed by user id.
pub struct MemoryUserRepository {
    users: MemoryCollection<User>,
}

impl MemoryUserRepository {
    pub fn new() -> Self {
        Self {
            users: MemoryCollection::new(),
        }
    }
}

impl Default for MemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn insert(&self, user: User) -> Result<()> {
        let id = user.id.clone();
        self.users.upsert(&id, user).await;
        Ok(())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        Ok(self
            .users
            .filter(|user| user.email == email)
            .await
            .into_iter()
            .next())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        Ok(self
            .users
            .filter(|user| user.username == username)
            .await
            .into_iter()
            .next())
    }
}
