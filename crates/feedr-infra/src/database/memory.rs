//! In-memory repositories - used as fallback when no database is configured
//! and as the store for engine-level tests. Data is lost on process restart.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use feedr_core::domain::{Post, User};
use feedr_core::error::RepoError;
use feedr_core::ports::{BaseRepository, PostPage, PostRepository, UserRepository};

/// In-memory user repository backed by a HashMap with an async RwLock.
#[derive(Default)]
pub struct InMemoryUserRepository {
    rows: RwLock<HashMap<Uuid, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BaseRepository<User, Uuid> for InMemoryUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        Ok(self.rows.read().await.get(&id).cloned())
    }

    async fn save(&self, user: User) -> Result<User, RepoError> {
        self.rows.write().await.insert(user.id, user.clone());
        Ok(user)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        self.rows
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or(RepoError::NotFound)
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        Ok(self
            .rows
            .read()
            .await
            .values()
            .find(|user| user.email == email)
            .cloned())
    }

    async fn add_post_id(&self, user_id: Uuid, post_id: Uuid) -> Result<(), RepoError> {
        let mut rows = self.rows.write().await;
        let user = rows.get_mut(&user_id).ok_or(RepoError::NotFound)?;
        user.add_post_id(post_id);
        Ok(())
    }

    async fn remove_post_id(&self, user_id: Uuid, post_id: Uuid) -> Result<(), RepoError> {
        let mut rows = self.rows.write().await;
        let user = rows.get_mut(&user_id).ok_or(RepoError::NotFound)?;
        user.remove_post_id(post_id);
        Ok(())
    }
}

/// In-memory post repository.
#[derive(Default)]
pub struct InMemoryPostRepository {
    rows: RwLock<HashMap<Uuid, Post>>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn newest_first(rows: &HashMap<Uuid, Post>) -> Vec<Post> {
        let mut posts: Vec<Post> = rows.values().cloned().collect();
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        posts
    }
}

#[async_trait]
impl BaseRepository<Post, Uuid> for InMemoryPostRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        Ok(self.rows.read().await.get(&id).cloned())
    }

    async fn save(&self, post: Post) -> Result<Post, RepoError> {
        self.rows.write().await.insert(post.id, post.clone());
        Ok(post)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        self.rows
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or(RepoError::NotFound)
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn page(&self, page: u64, per_page: u64) -> Result<PostPage, RepoError> {
        let rows = self.rows.read().await;
        let sorted = Self::newest_first(&rows);
        let total_items = sorted.len() as u64;

        let offset = page.saturating_sub(1).saturating_mul(per_page) as usize;
        let items = sorted
            .into_iter()
            .skip(offset)
            .take(per_page as usize)
            .collect();

        Ok(PostPage { items, total_items })
    }

    async fn find_by_owner(&self, owner_id: Uuid) -> Result<Vec<Post>, RepoError> {
        let rows = self.rows.read().await;
        Ok(Self::newest_first(&rows)
            .into_iter()
            .filter(|post| post.owner_id == owner_id)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_post(title: &str) -> Post {
        Post::new(
            Uuid::new_v4(),
            title.to_string(),
            "some content here".to_string(),
            "images/a.png".to_string(),
        )
    }

    #[tokio::test]
    async fn save_and_find_round_trip() {
        let repo = InMemoryPostRepository::new();
        let post = sample_post("First post");

        repo.save(post.clone()).await.unwrap();
        let found = repo.find_by_id(post.id).await.unwrap().unwrap();
        assert_eq!(found.title, "First post");
    }

    #[tokio::test]
    async fn delete_missing_is_not_found() {
        let repo = InMemoryPostRepository::new();
        assert!(matches!(
            repo.delete(Uuid::new_v4()).await,
            Err(RepoError::NotFound)
        ));
    }

    #[tokio::test]
    async fn page_past_end_is_empty_with_true_total() {
        let repo = InMemoryPostRepository::new();
        for i in 0..3 {
            repo.save(sample_post(&format!("Post number {i}"))).await.unwrap();
        }

        let page = repo.page(5, 2).await.unwrap();
        assert!(page.items.is_empty());
        assert_eq!(page.total_items, 3);
    }

    #[tokio::test]
    async fn remove_post_id_is_idempotent() {
        let repo = InMemoryUserRepository::new();
        let user = User::new(
            "Maria".into(),
            "maria@example.com".into(),
            "digest".into(),
        );
        let user_id = user.id;
        repo.save(user).await.unwrap();

        let post_id = Uuid::new_v4();
        repo.add_post_id(user_id, post_id).await.unwrap();
        repo.add_post_id(user_id, post_id).await.unwrap();

        let stored = repo.find_by_id(user_id).await.unwrap().unwrap();
        assert_eq!(stored.post_ids, vec![post_id]);

        repo.remove_post_id(user_id, post_id).await.unwrap();
        // Removing a non-member id is a no-op, not an error.
        repo.remove_post_id(user_id, post_id).await.unwrap();

        let stored = repo.find_by_id(user_id).await.unwrap().unwrap();
        assert!(stored.post_ids.is_empty());
    }
}
