use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Post, User};
use crate::error::RepoError;

/// Generic repository trait defining standard CRUD operations.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Save an entity (create or update).
    async fn save(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// User repository with domain-specific methods.
#[async_trait]
pub trait UserRepository: BaseRepository<User, Uuid> {
    /// Find a user by their exact email address.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError>;

    /// Add a post id to the user's owner index. Idempotent.
    async fn add_post_id(&self, user_id: Uuid, post_id: Uuid) -> Result<(), RepoError>;

    /// Remove a post id from the user's owner index. Removing a non-member
    /// id is a no-op, not an error.
    async fn remove_post_id(&self, user_id: Uuid, post_id: Uuid) -> Result<(), RepoError>;
}

/// One page of posts plus the collection-wide total.
#[derive(Debug, Clone)]
pub struct PostPage {
    pub items: Vec<Post>,
    pub total_items: u64,
}

/// Post repository.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, Uuid> {
    /// Fetch one page, newest first by `created_at`. `page` is 1-based;
    /// pages past the end yield an empty item list with the true total.
    async fn page(&self, page: u64, per_page: u64) -> Result<PostPage, RepoError>;

    /// All posts owned by a user, newest first.
    async fn find_by_owner(&self, owner_id: Uuid) -> Result<Vec<Post>, RepoError>;
}
