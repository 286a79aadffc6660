//! Engine tests: the core services wired to in-memory infrastructure and the
//! real hashing/token primitives. Both protocol adapters sit on top of
//! exactly these calls, so the rules verified here hold for both surfaces.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;
use uuid::Uuid;

use feedr_core::domain::Identity;
use feedr_core::error::DomainError;
use feedr_core::ports::{
    ArtifactError, ArtifactStore, BaseRepository, PostRepository, UserRepository,
};
use feedr_core::services::{
    AccountService, ArtifactLifecycle, CredentialService, FeedService, PAGE_SIZE, PostService,
};
use feedr_infra::{
    Argon2PasswordService, InMemoryPostRepository, InMemoryUserRepository, JwtConfig,
    JwtTokenService,
};

/// Artifact store double that hands out paths and records removals instead
/// of touching disk.
#[derive(Default)]
struct RecordingArtifactStore {
    removed: Mutex<Vec<String>>,
}

impl RecordingArtifactStore {
    async fn removed_paths(&self) -> Vec<String> {
        self.removed.lock().await.clone()
    }
}

#[async_trait]
impl ArtifactStore for RecordingArtifactStore {
    async fn store(&self, _bytes: &[u8], suggested_name: &str) -> Result<String, ArtifactError> {
        Ok(format!("images/{suggested_name}"))
    }

    async fn remove(&self, path: &str) -> Result<(), ArtifactError> {
        self.removed.lock().await.push(path.to_string());
        Ok(())
    }
}

struct Harness {
    credentials: CredentialService,
    accounts: AccountService,
    posts: PostService,
    feed: FeedService,
    users: Arc<InMemoryUserRepository>,
    artifacts: Arc<RecordingArtifactStore>,
}

fn harness() -> Harness {
    let users = Arc::new(InMemoryUserRepository::new());
    let posts = Arc::new(InMemoryPostRepository::new());
    let artifacts = Arc::new(RecordingArtifactStore::default());

    let users_dyn: Arc<dyn UserRepository> = users.clone();
    let posts_dyn: Arc<dyn PostRepository> = posts.clone();
    let store_dyn: Arc<dyn ArtifactStore> = artifacts.clone();

    let tokens = Arc::new(JwtTokenService::new(JwtConfig {
        secret: "engine-test-secret".to_string(),
        expiration_hours: 1,
        issuer: "feedr-test".to_string(),
    }));
    let passwords = Arc::new(Argon2PasswordService::new());

    Harness {
        credentials: CredentialService::new(users_dyn.clone(), passwords, tokens),
        accounts: AccountService::new(users_dyn.clone()),
        posts: PostService::new(
            posts_dyn.clone(),
            users_dyn.clone(),
            ArtifactLifecycle::new(store_dyn),
        ),
        feed: FeedService::new(posts_dyn, users_dyn),
        users,
        artifacts,
    }
}

async fn signup(h: &Harness, name: &str, email: &str) -> Identity {
    let user = h.credentials.register(name, email, "secret-pass").await.unwrap();
    Identity {
        user_id: user.id,
        email: user.email,
    }
}

#[tokio::test]
async fn signup_then_login_round_trip() {
    let h = harness();

    let user = h
        .credentials
        .register("Maria", "maria@example.com", "secret-pass")
        .await
        .unwrap();
    assert_eq!(user.status, "I am new!");
    assert_ne!(user.password_hash, "secret-pass");

    let session = h
        .credentials
        .authenticate("maria@example.com", "secret-pass")
        .await
        .unwrap();
    assert_eq!(session.user.id, user.id);
    assert_eq!(session.expires_in, 3600);

    let identity = h.credentials.identify(&session.token).unwrap();
    assert_eq!(identity.user_id, user.id);
    assert_eq!(identity.email, "maria@example.com");
}

#[tokio::test]
async fn wrong_password_and_unknown_email_fail_alike() {
    let h = harness();
    signup(&h, "Maria", "maria@example.com").await;

    let wrong_password = h
        .credentials
        .authenticate("maria@example.com", "not-the-pass")
        .await;
    let unknown_email = h
        .credentials
        .authenticate("nobody@example.com", "secret-pass")
        .await;

    assert!(matches!(wrong_password, Err(DomainError::BadCredentials)));
    assert!(matches!(unknown_email, Err(DomainError::BadCredentials)));
}

#[tokio::test]
async fn duplicate_email_is_rejected() {
    let h = harness();
    signup(&h, "Maria", "maria@example.com").await;

    let result = h
        .credentials
        .register("Other", "maria@example.com", "other-pass")
        .await;
    assert!(matches!(result, Err(DomainError::DuplicateEmail(_))));
}

#[tokio::test]
async fn signup_validation_rules() {
    let h = harness();

    assert!(matches!(
        h.credentials.register("Maria", "not-an-email", "secret-pass").await,
        Err(DomainError::Validation(_))
    ));
    assert!(matches!(
        h.credentials.register("Maria", "maria@example.com", "1234").await,
        Err(DomainError::Validation(_))
    ));
    assert!(matches!(
        h.credentials.register("", "maria@example.com", "secret-pass").await,
        Err(DomainError::Validation(_))
    ));
}

#[tokio::test]
async fn create_then_get_returns_the_inputs() {
    let h = harness();
    let author = signup(&h, "Maria", "maria@example.com").await;

    let created = h
        .posts
        .create(&author, "Hello world", "My first post body", "images/one.png")
        .await
        .unwrap();

    let view = h.feed.single(created.id).await.unwrap();
    assert_eq!(view.post.title, "Hello world");
    assert_eq!(view.post.content, "My first post body");
    assert_eq!(view.post.image_url, "images/one.png");
    assert_eq!(view.post.owner_id, author.user_id);
    assert_eq!(view.owner.name, "Maria");

    // The owner index picked the id up right after the record write.
    let stored = h.users.find_by_id(author.user_id).await.unwrap().unwrap();
    assert_eq!(stored.post_ids, vec![created.id]);
}

#[tokio::test]
async fn title_and_content_length_thresholds() {
    let h = harness();
    let author = signup(&h, "Maria", "maria@example.com").await;

    assert!(matches!(
        h.posts.create(&author, "abcd", "Long enough body", "images/a.png").await,
        Err(DomainError::Validation(_))
    ));
    assert!(matches!(
        h.posts.create(&author, "Long enough title", "abcd", "images/a.png").await,
        Err(DomainError::Validation(_))
    ));
    // Length 5 is accepted.
    assert!(h
        .posts
        .create(&author, "abcde", "abcde", "images/a.png")
        .await
        .is_ok());
}

#[tokio::test]
async fn only_the_owner_may_update_or_delete() {
    let h = harness();
    let owner = signup(&h, "Owner", "owner@example.com").await;
    let stranger = signup(&h, "Stranger", "stranger@example.com").await;

    let post = h
        .posts
        .create(&owner, "Owned post", "Content of the post", "images/one.png")
        .await
        .unwrap();

    let update = h
        .posts
        .update(&stranger, post.id, "Hijacked!", "Replaced content", None)
        .await;
    assert!(matches!(update, Err(DomainError::NotAuthorized)));

    let delete = h.posts.delete(&stranger, post.id).await;
    assert!(matches!(delete, Err(DomainError::NotAuthorized)));

    // The same calls succeed for the owner.
    h.posts
        .update(&owner, post.id, "Edited title", "Edited content", None)
        .await
        .unwrap();
    h.posts.delete(&owner, post.id).await.unwrap();
}

#[tokio::test]
async fn invalid_input_is_reported_before_ownership() {
    let h = harness();
    let owner = signup(&h, "Owner", "owner@example.com").await;
    let stranger = signup(&h, "Stranger", "stranger@example.com").await;

    let post = h
        .posts
        .create(&owner, "Owned post", "Content of the post", "images/one.png")
        .await
        .unwrap();

    // Validation runs before the ownership check, so a non-owner submitting
    // a too-short title sees the validation failure, not the denial.
    let result = h
        .posts
        .update(&stranger, post.id, "abcd", "Long enough body", None)
        .await;
    assert!(matches!(result, Err(DomainError::Validation(_))));
}

#[tokio::test]
async fn replacing_the_image_schedules_the_old_artifact() {
    let h = harness();
    let owner = signup(&h, "Maria", "maria@example.com").await;

    let post = h
        .posts
        .create(&owner, "Hello world", "Body of the post", "images/old.png")
        .await
        .unwrap();

    let updated = h
        .posts
        .update(
            &owner,
            post.id,
            "Hello world",
            "Body of the post",
            Some("images/new.png"),
        )
        .await
        .unwrap();
    assert_eq!(updated.image_url, "images/new.png");
    assert_eq!(
        h.feed.single(post.id).await.unwrap().post.image_url,
        "images/new.png"
    );
    assert_eq!(h.artifacts.removed_paths().await, vec!["images/old.png"]);

    // Submitting the same path again never triggers removal.
    h.posts
        .update(
            &owner,
            post.id,
            "Hello world",
            "Body of the post",
            Some("images/new.png"),
        )
        .await
        .unwrap();
    assert_eq!(h.artifacts.removed_paths().await, vec!["images/old.png"]);
}

#[tokio::test]
async fn omitted_image_leaves_the_artifact_untouched() {
    let h = harness();
    let owner = signup(&h, "Maria", "maria@example.com").await;

    let post = h
        .posts
        .create(&owner, "Hello world", "Body of the post", "images/keep.png")
        .await
        .unwrap();

    let updated = h
        .posts
        .update(&owner, post.id, "New title!", "New content!", None)
        .await
        .unwrap();
    assert_eq!(updated.image_url, "images/keep.png");
    assert!(h.artifacts.removed_paths().await.is_empty());
}

#[tokio::test]
async fn delete_releases_record_index_and_artifact() {
    let h = harness();
    let owner = signup(&h, "Maria", "maria@example.com").await;

    let post = h
        .posts
        .create(&owner, "Hello world", "Body of the post", "images/gone.png")
        .await
        .unwrap();

    h.posts.delete(&owner, post.id).await.unwrap();

    assert!(matches!(
        h.feed.single(post.id).await,
        Err(DomainError::NotFound { .. })
    ));
    let stored = h.users.find_by_id(owner.user_id).await.unwrap().unwrap();
    assert!(stored.post_ids.is_empty());
    assert_eq!(h.artifacts.removed_paths().await, vec!["images/gone.png"]);

    let page = h.feed.page(1).await.unwrap();
    assert!(page.items.is_empty());
    assert_eq!(page.total_items, 0);
}

#[tokio::test]
async fn deleting_a_missing_post_is_not_found() {
    let h = harness();
    let owner = signup(&h, "Maria", "maria@example.com").await;

    assert!(matches!(
        h.posts.delete(&owner, Uuid::new_v4()).await,
        Err(DomainError::NotFound { .. })
    ));
}

#[tokio::test]
async fn pagination_with_five_posts() {
    let h = harness();
    let author = signup(&h, "Maria", "maria@example.com").await;

    let mut ids = Vec::new();
    for i in 1..=5 {
        let post = h
            .posts
            .create(
                &author,
                &format!("Post number {i}"),
                "Content of the post",
                &format!("images/{i}.png"),
            )
            .await
            .unwrap();
        ids.push(post.id);
        // Distinct creation timestamps keep the newest-first order stable.
        tokio::time::sleep(Duration::from_millis(5)).await;
    }

    assert_eq!(PAGE_SIZE, 2);

    let first = h.feed.page(1).await.unwrap();
    assert_eq!(first.total_items, 5);
    assert_eq!(
        first.items.iter().map(|v| v.post.id).collect::<Vec<_>>(),
        vec![ids[4], ids[3]]
    );

    let third = h.feed.page(3).await.unwrap();
    assert_eq!(third.items.len(), 1);
    assert_eq!(third.items[0].post.id, ids[0]);

    let fourth = h.feed.page(4).await.unwrap();
    assert!(fourth.items.is_empty());
    assert_eq!(fourth.total_items, 5);
}

#[tokio::test]
async fn status_is_readable_and_mutable_by_its_owner() {
    let h = harness();
    let owner = signup(&h, "Maria", "maria@example.com").await;

    assert_eq!(h.accounts.status(owner.user_id).await.unwrap(), "I am new!");

    h.accounts
        .set_status(owner.user_id, "Shipping a new post soon")
        .await
        .unwrap();
    assert_eq!(
        h.accounts.status(owner.user_id).await.unwrap(),
        "Shipping a new post soon"
    );

    assert!(matches!(
        h.accounts.set_status(owner.user_id, "   ").await,
        Err(DomainError::Validation(_))
    ));
    assert!(matches!(
        h.accounts.status(Uuid::new_v4()).await,
        Err(DomainError::NotFound { .. })
    ));
}

#[tokio::test]
async fn artifact_removal_failure_never_fails_the_mutation() {
    struct BrokenArtifactStore;

    #[async_trait]
    impl ArtifactStore for BrokenArtifactStore {
        async fn store(&self, _: &[u8], name: &str) -> Result<String, ArtifactError> {
            Ok(format!("images/{name}"))
        }

        async fn remove(&self, path: &str) -> Result<(), ArtifactError> {
            Err(ArtifactError::Io(format!("disk on fire: {path}")))
        }
    }

    let users = Arc::new(InMemoryUserRepository::new());
    let posts_repo = Arc::new(InMemoryPostRepository::new());
    let users_dyn: Arc<dyn UserRepository> = users.clone();
    let posts_dyn: Arc<dyn PostRepository> = posts_repo.clone();
    let posts = PostService::new(
        posts_dyn,
        users_dyn.clone(),
        ArtifactLifecycle::new(Arc::new(BrokenArtifactStore)),
    );

    let user = feedr_core::domain::User::new(
        "Maria".into(),
        "maria@example.com".into(),
        "digest".into(),
    );
    let owner = Identity {
        user_id: user.id,
        email: user.email.clone(),
    };
    users.save(user).await.unwrap();

    let post = posts
        .create(&owner, "Hello world", "Body of the post", "images/a.png")
        .await
        .unwrap();

    // Replacement and deletion both succeed even though cleanup fails.
    posts
        .update(&owner, post.id, "Hello world", "Body of the post", Some("images/b.png"))
        .await
        .unwrap();
    posts.delete(&owner, post.id).await.unwrap();
}

#[tokio::test]
async fn tampered_token_is_unauthenticated() {
    let h = harness();
    signup(&h, "Maria", "maria@example.com").await;

    let session = h
        .credentials
        .authenticate("maria@example.com", "secret-pass")
        .await
        .unwrap();

    let mut tampered = session.token.clone();
    tampered.push('x');
    assert!(matches!(
        h.credentials.identify(&tampered),
        Err(DomainError::Unauthenticated)
    ));
}
