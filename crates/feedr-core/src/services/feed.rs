//! Feed query service - paginated, ownership-annotated listing.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::Post;
use crate::error::DomainError;
use crate::ports::{PostRepository, UserRepository};

/// Fixed feed page size.
pub const PAGE_SIZE: u64 = 2;

/// Public projection of a post's owner, resolved at read time and never
/// denormalized into the stored record.
#[derive(Debug, Clone)]
pub struct PostOwner {
    pub id: Uuid,
    pub name: String,
}

/// A post annotated with its owner's public projection.
#[derive(Debug, Clone)]
pub struct PostView {
    pub post: Post,
    pub owner: PostOwner,
}

/// One feed page, newest first.
#[derive(Debug, Clone)]
pub struct FeedPage {
    pub items: Vec<PostView>,
    pub total_items: u64,
}

pub struct FeedService {
    posts: Arc<dyn PostRepository>,
    users: Arc<dyn UserRepository>,
}

impl FeedService {
    pub fn new(posts: Arc<dyn PostRepository>, users: Arc<dyn UserRepository>) -> Self {
        Self { posts, users }
    }

    /// Fetch page `page` (1-based). Out-of-range pages return an empty item
    /// list with the true total, not an error.
    pub async fn page(&self, page: u64) -> Result<FeedPage, DomainError> {
        let page = page.max(1);
        let fetched = self.posts.page(page, PAGE_SIZE).await?;

        let mut items = Vec::with_capacity(fetched.items.len());
        for post in fetched.items {
            items.push(self.annotate(post).await?);
        }

        Ok(FeedPage {
            items,
            total_items: fetched.total_items,
        })
    }

    /// All posts owned by one user, newest first, owner-annotated.
    pub async fn for_owner(&self, owner_id: Uuid) -> Result<Vec<PostView>, DomainError> {
        let posts = self.posts.find_by_owner(owner_id).await?;
        let mut items = Vec::with_capacity(posts.len());
        for post in posts {
            items.push(self.annotate(post).await?);
        }
        Ok(items)
    }

    pub async fn single(&self, id: Uuid) -> Result<PostView, DomainError> {
        let post = self
            .posts
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("post", id))?;
        self.annotate(post).await
    }

    async fn annotate(&self, post: Post) -> Result<PostView, DomainError> {
        let owner = self
            .users
            .find_by_id(post.owner_id)
            .await?
            .map(|user| PostOwner {
                id: user.id,
                name: user.name,
            })
            .ok_or_else(|| {
                tracing::error!(post = %post.id, owner = %post.owner_id, "post owner missing");
                DomainError::Upstream("post owner record missing".to_string())
            })?;

        Ok(PostView { post, owner })
    }
}
