//! Post domain types

use chrono::{DateTime, Utc};
use quill_common::Principal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    pub title: String,
    pub content: String,
    pub owner_id: String,
    pub author: String,
    pub created_at: DateTime<Utc>,
}

impl Post {
    /// Build a new post owned by the verified principal.
    ///
    /// Owner and author always come from the token-derived principal;
    /// any client-supplied owner fields are ignored at deserialization.
    pub fn create(input: CreatePostInput, principal: &Principal) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: input.title,
            content: input.content,
            owner_id: principal.id.clone(),
            author: principal.username.clone(),
            created_at: Utc::now(),
        }
    }

    /// Presence-based partial update: a missing or empty field keeps the
    /// stored value (update-by-presence, not update-by-null).
    pub fn apply(&mut self, input: UpdatePostInput) {
        apply_if_present(&mut self.title, input.title);
        apply_if_present(&mut self.content, input.content);
    }
}

pub(crate) fn apply_if_present(target: &mut String, value: Option<String>) {
    if let Some(value) = value {
        if !value.is_empty() {
            *target = value;
        }
    }
}

/// Only `title` and `content` are accepted from clients.
#[derive(Debug, Deserialize)]
pub struct CreatePostInput {
    pub title: String,
    pub content: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdatePostInput {
    pub title: Option<String>,
    pub content: Option<String>,
}
