//! PostgreSQL repository implementations.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, IntoActiveModel, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

use feedr_core::domain::{Post, User};
use feedr_core::error::RepoError;
use feedr_core::ports::{PostPage, PostRepository, UserRepository};

use super::entity::post::{self, Entity as PostEntity};
use super::entity::user::{self, Entity as UserEntity};
use super::postgres_base::PostgresBaseRepository;

/// PostgreSQL user repository.
pub type PostgresUserRepository = PostgresBaseRepository<UserEntity>;

/// PostgreSQL post repository.
pub type PostgresPostRepository = PostgresBaseRepository<PostEntity>;

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        // Mask email for logging to avoid PII in logs
        let masked = if let Some(at_pos) = email.find('@') {
            let (local, domain) = email.split_at(at_pos);
            let masked_local = if local.len() > 1 {
                format!("{}***", &local[..1])
            } else {
                "***".to_string()
            };
            format!("{}{}", masked_local, domain)
        } else {
            "***".to_string()
        };
        tracing::debug!(user_email = %masked, "Finding user by email");

        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.map(Into::into))
    }

    async fn add_post_id(&self, user_id: Uuid, post_id: Uuid) -> Result<(), RepoError> {
        self.mutate_post_ids(user_id, |ids| {
            if !ids.contains(&post_id) {
                ids.push(post_id);
                true
            } else {
                false
            }
        })
        .await
    }

    async fn remove_post_id(&self, user_id: Uuid, post_id: Uuid) -> Result<(), RepoError> {
        self.mutate_post_ids(user_id, |ids| {
            let before = ids.len();
            ids.retain(|id| *id != post_id);
            ids.len() != before
        })
        .await
    }
}

impl PostgresUserRepository {
    /// Read-modify-write on the owner index column. `mutate` returns whether
    /// anything changed; unchanged indexes skip the write (idempotence).
    async fn mutate_post_ids<F>(&self, user_id: Uuid, mutate: F) -> Result<(), RepoError>
    where
        F: FnOnce(&mut Vec<Uuid>) -> bool + Send,
    {
        let model = UserEntity::find_by_id(user_id)
            .one(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?
            .ok_or(RepoError::NotFound)?;

        let mut ids: Vec<Uuid> =
            serde_json::from_value(model.post_ids.clone()).unwrap_or_default();
        if !mutate(&mut ids) {
            return Ok(());
        }

        let post_ids = serde_json::to_value(&ids).map_err(|e| RepoError::Query(e.to_string()))?;

        let mut active = model.into_active_model();
        active.post_ids = Set(post_ids);
        active
            .update(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(())
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn page(&self, page: u64, per_page: u64) -> Result<PostPage, RepoError> {
        let paginator = PostEntity::find()
            .order_by_desc(post::Column::CreatedAt)
            .paginate(&self.db, per_page);

        let total_items = paginator
            .num_items()
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        // fetch_page is 0-based; pages past the end come back empty.
        let models = paginator
            .fetch_page(page.saturating_sub(1))
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(PostPage {
            items: models.into_iter().map(Into::into).collect(),
            total_items,
        })
    }

    async fn find_by_owner(&self, owner_id: Uuid) -> Result<Vec<Post>, RepoError> {
        let result = PostEntity::find()
            .filter(post::Column::OwnerId.eq(owner_id))
            .order_by_desc(post::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}
