//! Comment domain types

use chrono::{DateTime, Utc};
use quill_common::Principal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A comment always references the post it belongs to. The reference is
/// checked against the post service at creation time, but the post may be
/// deleted later; orphans are cleaned up best-effort by the cascade.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: String,
    pub content: String,
    pub post_id: String,
    pub owner_id: String,
    pub author: String,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    /// Build a new comment owned by the verified principal. Owner and
    /// author always come from the token-derived principal.
    pub fn create(input: CreateCommentInput, principal: &Principal) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            content: input.content,
            post_id: input.post_id,
            owner_id: principal.id.clone(),
            author: principal.username.clone(),
            created_at: Utc::now(),
        }
    }

    /// Presence-based update: missing or empty content keeps the stored
    /// value.
    pub fn apply(&mut self, input: UpdateCommentInput) {
        if let Some(content) = input.content {
            if !content.is_empty() {
                self.content = content;
            }
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommentInput {
    pub content: String,
    pub post_id: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateCommentInput {
    pub content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn principal() -> Principal {
        Principal {
            id: "user-1".to_string(),
            username: "ada".to_string(),
            email: "ada@example.com".to_string(),
        }
    }

    #[test]
    fn test_create_takes_owner_from_principal() {
        let comment = Comment::create(
            CreateCommentInput {
                content: "Nice post".to_string(),
                post_id: "post-1".to_string(),
            },
            &principal(),
        );
        assert_eq!(comment.owner_id, "user-1");
        assert_eq!(comment.author, "ada");
        assert_eq!(comment.post_id, "post-1");
    }

    #[test]
    fn test_apply_keeps_content_when_absent_or_empty() {
        let mut comment = Comment::create(
            CreateCommentInput {
                content: "Original".to_string(),
                post_id: "post-1".to_string(),
            },
            &principal(),
        );

        comment.apply(UpdateCommentInput { content: None });
        assert_eq!(comment.content, "Original");

        comment.apply(UpdateCommentInput {
            content: Some(String::new()),
        });
        assert_eq!(comment.content, "Original");

        comment.apply(UpdateCommentInput {
            content: Some("Edited".to_string()),
        });
        assert_eq!(comment.content, "Edited");
    }

    #[test]
    fn test_wire_format_is_camel_case() {
        let comment = Comment::create(
            CreateCommentInput {
                content: "c".to_string(),
                post_id: "post-1".to_string(),
            },
            &principal(),
        );
        let json = serde_json::to_value(comment).unwrap();
        assert!(json.get("postId").is_some());
        assert!(json.get("ownerId").is_some());
        assert!(json.get("createdAt").is_some());
    }
}
