//! Profile repository

use crate::domain::Profile;
use async_trait::async_trait;
use quill_common::store::MemoryCollection;
use quill_common::Result;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    async fn find_by_owner(&self, owner_id: &str) -> Result<Option<Profile>>;
    async fn save(&self, profile: Profile) -> Result<()>;
    /// Remove by owner, returning whether the profile existed.
    async fn remove_by_owner(&self, owner_id: &str) -> Result<bool>;
}

/// Memory-backed profile repository, keyed by owner id (1:1).
pub struct MemoryProfileRepository {
    profiles: MemoryCollection<Profile>,
}

impl MemoryProfileRepository {
    pub fn new() -> Self {
        Self {
            profiles: MemoryCollection::new(),
        }
    }
}

impl Default for MemoryProfileRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProfileRepository for MemoryProfileRepository {
    async fn find_by_owner(&self, owner_id: &str) -> Result<Option<Profile>> {
        Ok(self.profiles.find(owner_id).await)
    }

    async fn save(&self, profile: Profile) -> Result<()> {
        let owner_id = profile.owner_id.clone();
        self.profiles.upsert(&owner_id, profile).await;
        Ok(())
    }

    async fn remove_by_owner(&self, owner_id: &str) -> Result<bool> {
        Ok(self.profiles.remove(owner_id).await)
    }
}
