use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Post entity - a published item in the feed.
///
/// `owner_id` is immutable after creation. `image_url` always names the
/// current artifact; the previous path is scheduled for removal only once a
/// record carrying a different path has been committed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub title: String,
    pub content: String,
    pub image_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Create a new post owned by `owner_id`.
    pub fn new(owner_id: Uuid, title: String, content: String, image_url: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            owner_id,
            title,
            content,
            image_url,
            created_at: now,
            updated_at: now,
        }
    }
}
