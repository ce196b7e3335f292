//! Post repository

use crate::domain::Post;
use async_trait::async_trait;
use quill_common::store::MemoryCollection;
use quill_common::Result;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// All posts, newest first.
    async fn list(&self) -> Result<Vec<Post>>;
    async fn find(&self, id: &str) -> Result<Option<Post>>;
    async fn save(&self, post: Post) -> Result<()>;
    /// Remove by id, returning whether the post existed.
    async fn remove(&self, id: &str) -> Result<bool>;
}

/// Memory-backed post repository, keyed by post id.
pub struct MemoryPostRepository {
    posts: MemoryCollection<Post>,
}

impl MemoryPostRepository {
    pub fn new() -> Self {
        Self {
            posts: MemoryCollection::new(),
        }
    }
}

impl Default for MemoryPostRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PostRepository for MemoryPostRepository {
    async fn list(&self) -> Result<Vec<Post>> {
        let mut posts = self.posts.find_all().await;
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(posts)
    }

    async fn find(&self, id: &str) -> Result<Option<Post>> {
        Ok(self.posts.find(id).await)
    }

    async fn save(&self, post: Post) -> Result<()> {
        let id = post.id.clone();
        self.posts.upsert(&id, post).await;
        Ok(())
    }

    async fn remove(&self, id: &str) -> Result<bool> {
        Ok(self.posts.remove(id).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CreatePostInput, Post};
    use chrono::{Duration, Utc};
    use quill_common::Principal;

    fn post(id: &str, age_secs: i64) -> Post {
        let mut post = Post::create(
            CreatePostInput {
                title: format!("post {id}"),
                content: "content".to_string(),
            },
            &Principal {
                id: "user-1".to_string(),
                username: "ada".to_string(),
                email: "ada@example.com".to_string(),
            },
        );
        post.id = id.to_string();
        post.created_at = Utc::now() - Duration::seconds(age_secs);
        post
    }

    #[tokio::test]
    async fn test_list_is_newest_first() {
        let repo = MemoryPostRepository::new();
        repo.save(post("old", 60)).await.unwrap();
        repo.save(post("new", 0)).await.unwrap();
        repo.save(post("middle", 30)).await.unwrap();

        let ids: Vec<String> = repo
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(ids, vec!["new", "middle", "old"]);
    }

    #[tokio::test]
    async fn test_list_empty_is_empty_vec() {
        let repo = MemoryPostRepository::new();
        assert!(repo.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_remove_reports_existence() {
        let repo = MemoryPostRepository::new();
        repo.save(post("a", 0)).await.unwrap();

        assert!(repo.remove("a").await.unwrap());
        assert!(!repo.remove("a").await.unwrap());
        assert!(repo.find("a").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_mock_post_repository() {
        use mockall::predicate::*;

        let mut mock = MockPostRepository::new();
        mock.expect_find()
            .with(eq("post-1"))
            .returning(|id| Ok(Some(post(id, 0))));
        mock.expect_remove()
            .with(eq("post-1"))
            .returning(|_| Ok(true));

        let found = mock.find("post-1").await.unwrap();
        assert_eq!(found.unwrap().id, "post-1");
        assert!(mock.remove("post-1").await.unwrap());
    }
}
