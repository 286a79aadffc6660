//! Post service - create/update/delete with ownership enforcement, owner
//! index bookkeeping, and artifact lifecycle ordering.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::domain::{Identity, Post};
use crate::error::DomainError;
use crate::ports::{PostRepository, UserRepository};
use crate::services::artifacts::ArtifactLifecycle;
use crate::services::guard::{self, MutationKind};
use crate::validate;

pub struct PostService {
    posts: Arc<dyn PostRepository>,
    users: Arc<dyn UserRepository>,
    artifacts: ArtifactLifecycle,
}

impl PostService {
    pub fn new(
        posts: Arc<dyn PostRepository>,
        users: Arc<dyn UserRepository>,
        artifacts: ArtifactLifecycle,
    ) -> Self {
        Self {
            posts,
            users,
            artifacts,
        }
    }

    /// Persist a new post, then record its id in the owner index. The index
    /// write follows the record write, never precedes it.
    pub async fn create(
        &self,
        caller: &Identity,
        title: &str,
        content: &str,
        image_url: &str,
    ) -> Result<Post, DomainError> {
        validate::required_text("title", title)?;
        validate::required_text("content", content)?;
        if image_url.trim().is_empty() {
            return Err(DomainError::validation("image is required"));
        }

        let post = Post::new(
            caller.user_id,
            title.trim().to_string(),
            content.trim().to_string(),
            image_url.to_string(),
        );
        self.artifacts.on_create(&post.image_url);

        let saved = self.posts.save(post).await?;
        self.users.add_post_id(caller.user_id, saved.id).await?;

        tracing::info!(post_id = %saved.id, owner = %caller.user_id, "post created");
        Ok(saved)
    }

    /// Update title/content and optionally the image. `None` image means
    /// "unchanged". Validation precedes the ownership check; the stale
    /// artifact is discarded only after the record carrying the new path has
    /// been committed.
    pub async fn update(
        &self,
        caller: &Identity,
        id: Uuid,
        title: &str,
        content: &str,
        image_url: Option<&str>,
    ) -> Result<Post, DomainError> {
        validate::required_text("title", title)?;
        validate::required_text("content", content)?;
        if let Some(path) = image_url {
            if path.trim().is_empty() {
                return Err(DomainError::validation("image is required"));
            }
        }

        let mut post = self
            .posts
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("post", id))?;

        guard::ensure_can_mutate(caller, &post, MutationKind::Update)?;

        let old_image = post.image_url.clone();
        post.title = title.trim().to_string();
        post.content = content.trim().to_string();
        if let Some(path) = image_url {
            post.image_url = path.to_string();
        }
        post.updated_at = Utc::now();

        let saved = self.posts.save(post).await?;
        self.artifacts.on_replace(&old_image, &saved.image_url).await;

        Ok(saved)
    }

    /// Delete a post: record first, then the owner index entry, then the
    /// artifact.
    pub async fn delete(&self, caller: &Identity, id: Uuid) -> Result<(), DomainError> {
        let post = self
            .posts
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("post", id))?;

        guard::ensure_can_mutate(caller, &post, MutationKind::Delete)?;

        self.posts.delete(id).await?;
        self.users.remove_post_id(post.owner_id, id).await?;
        self.artifacts.on_delete(&post.image_url).await;

        tracing::info!(post_id = %id, owner = %post.owner_id, "post deleted");
        Ok(())
    }
}
