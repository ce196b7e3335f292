//! Comment repository

use crate::domain::Comment;
use async_trait::async_trait;
use quill_common::store::MemoryCollection;
use quill_common::Result;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// All comments on a post, newest first.
    async fn list_by_post(&self, post_id: &str) -> Result<Vec<Comment>>;
    async fn find(&self, id: &str) -> Result<Option<Comment>>;
    async fn save(&self, comment: Comment) -> Result<()>;
    /// Remove by id, returning whether the comment existed.
    async fn remove(&self, id: &str) -> Result<bool>;
    /// Remove every comment on a post, returning how many were removed.
    /// Removing zero is success; the operation is idempotent.
    async fn remove_by_post(&self, post_id: &str) -> Result<usize>;
}

/// Memory-backed comment repository, keyed by comment id.
pub struct MemoryCommentRepository {
    comments: MemoryCollection<Comment>,
}

impl MemoryCommentRepository {
    pub fn new() -> Self {
        Self {
            comments: MemoryCollection::new(),
        }
    }
}

impl Default for MemoryCommentRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CommentRepository for MemoryCommentRepository {
    async fn list_by_post(&self, post_id: &str) -> Result<Vec<Comment>> {
        let mut comments = self
            .comments
            .filter(|comment| comment.post_id == post_id)
            .await;
        comments.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(comments)
    }

    async fn find(&self, id: &str) -> Result<Option<Comment>> {
        Ok(self.comments.find(id).await)
    }

    async fn save(&self, comment: Comment) -> Result<()> {
        let id = comment.id.clone();
        self.comments.upsert(&id, comment).await;
        Ok(())
    }

    async fn remove(&self, id: &str) -> Result<bool> {
        Ok(self.comments.remove(id).await)
    }

    async fn remove_by_post(&self, post_id: &str) -> Result<usize> {
        Ok(self
            .comments
            .remove_where(|comment| comment.post_id == post_id)
            .await)
    }
}
