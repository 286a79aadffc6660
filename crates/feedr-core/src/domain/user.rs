use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Status every account starts with until the owner changes it.
pub const DEFAULT_STATUS: &str = "I am new!";

/// User entity - an account in the system.
///
/// `post_ids` is the owner index: a reverse lookup of the posts this user
/// owns. It mirrors the `owner_id` references in the posts collection and is
/// updated right after each post creation/deletion commits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub password_hash: String,
    pub status: String,
    pub post_ids: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with generated ID, default status, and timestamps.
    pub fn new(name: String, email: String, password_hash: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            email,
            name,
            password_hash,
            status: DEFAULT_STATUS.to_string(),
            post_ids: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Idempotent owner-index insert.
    pub fn add_post_id(&mut self, post_id: Uuid) {
        if !self.post_ids.contains(&post_id) {
            self.post_ids.push(post_id);
        }
    }

    /// Idempotent owner-index removal; removing a non-member is a no-op.
    pub fn remove_post_id(&mut self, post_id: Uuid) {
        self.post_ids.retain(|id| *id != post_id);
    }
}
