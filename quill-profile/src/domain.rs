//! Profile domain types

use chrono::{DateTime, Utc};
use quill_common::Principal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLinks {
    #[serde(default)]
    pub twitter: String,
    #[serde(default)]
    pub facebook: String,
    #[serde(default)]
    pub linkedin: String,
    #[serde(default)]
    pub instagram: String,
}

/// A user's public profile, keyed 1:1 by the owner's id.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub owner_id: String,
    pub bio: String,
    pub avatar: String,
    pub website: String,
    pub location: String,
    pub social: SocialLinks,
    pub updated_at: DateTime<Utc>,
}

impl Profile {
    /// First write for this principal: create with whatever was provided,
    /// defaulting absent fields to empty strings.
    pub fn create(input: UpsertProfileInput, principal: &Principal) -> Self {
        Self {
            owner_id: principal.id.clone(),
            bio: input.bio.unwrap_or_default(),
            avatar: input.avatar.unwrap_or_default(),
            website: input.website.unwrap_or_default(),
            location: input.location.unwrap_or_default(),
            social: input.social.unwrap_or_default(),
            updated_at: Utc::now(),
        }
    }

    /// Subsequent write: presence-based merge, field by field. A missing
    /// or empty field keeps the stored value; `social` merges per
    /// sub-field the same way.
    pub fn apply(&mut self, input: UpsertProfileInput) {
        apply_if_present(&mut self.bio, input.bio);
        apply_if_present(&mut self.avatar, input.avatar);
        apply_if_present(&mut self.website, input.website);
        apply_if_present(&mut self.location, input.location);
        if let Some(social) = input.social {
            apply_if_present(&mut self.social.twitter, Some(social.twitter));
            apply_if_present(&mut self.social.facebook, Some(social.facebook));
            apply_if_present(&mut self.social.linkedin, Some(social.linkedin));
            apply_if_present(&mut self.social.instagram, Some(social.instagram));
        }
        self.updated_at = Utc::now();
    }
}

fn apply_if_present(target: &mut String, value: Option<String>) {
    if let Some(value) = value {
        if !value.is_empty() {
            *target = value;
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct UpsertProfileInput {
    pub bio: Option<String>,
    pub avatar: Option<String>,
    pub website: Option<String>,
    pub location: Option<String>,
    pub social: Option<SocialLinks>,
}
