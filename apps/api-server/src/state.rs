//! Application state - shared across all handlers and GraphQL resolvers.

use std::sync::Arc;

use feedr_core::ports::{
    ArtifactStore, PasswordService, PostRepository, TokenService, UserRepository,
};
use feedr_core::services::{
    AccountService, ArtifactLifecycle, CredentialService, FeedService, PostService,
};
use feedr_infra::{
    Argon2PasswordService, FsArtifactStore, InMemoryPostRepository, InMemoryUserRepository,
    JwtTokenService,
};

use crate::config::AppConfig;

/// Shared application state: the engine services plus the capabilities the
/// adapters use directly (token validation, artifact uploads).
#[derive(Clone)]
pub struct AppState {
    pub credentials: Arc<CredentialService>,
    pub accounts: Arc<AccountService>,
    pub posts: Arc<PostService>,
    pub feed: Arc<FeedService>,
    pub artifacts: Arc<dyn ArtifactStore>,
    pub tokens: Arc<dyn TokenService>,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(config: &AppConfig) -> Self {
        let (users, posts) = Self::build_repositories(config).await;

        let passwords: Arc<dyn PasswordService> = Arc::new(Argon2PasswordService::new());
        let tokens: Arc<dyn TokenService> = Arc::new(JwtTokenService::from_env());
        let artifacts: Arc<dyn ArtifactStore> =
            Arc::new(FsArtifactStore::new(config.upload_dir.clone()));

        let state = Self {
            credentials: Arc::new(CredentialService::new(
                users.clone(),
                passwords,
                tokens.clone(),
            )),
            accounts: Arc::new(AccountService::new(users.clone())),
            posts: Arc::new(PostService::new(
                posts.clone(),
                users.clone(),
                ArtifactLifecycle::new(artifacts.clone()),
            )),
            feed: Arc::new(FeedService::new(posts, users)),
            artifacts,
            tokens,
        };

        tracing::info!("Application state initialized");
        state
    }

    #[cfg(feature = "postgres")]
    async fn build_repositories(
        config: &AppConfig,
    ) -> (Arc<dyn UserRepository>, Arc<dyn PostRepository>) {
        use feedr_infra::database::connect;
        use feedr_infra::{PostgresPostRepository, PostgresUserRepository};

        if let Some(db_config) = &config.database {
            match connect(db_config).await {
                Ok(conn) => {
                    return (
                        Arc::new(PostgresUserRepository::new(conn.clone())),
                        Arc::new(PostgresPostRepository::new(conn)),
                    );
                }
                Err(e) => {
                    tracing::error!(
                        "Failed to connect to database: {}. Using in-memory fallback.",
                        e
                    );
                }
            }
        } else {
            tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
        }

        Self::memory_repositories()
    }

    #[cfg(not(feature = "postgres"))]
    async fn build_repositories(
        _config: &AppConfig,
    ) -> (Arc<dyn UserRepository>, Arc<dyn PostRepository>) {
        tracing::info!("Running without postgres feature - using in-memory repositories");
        Self::memory_repositories()
    }

    fn memory_repositories() -> (Arc<dyn UserRepository>, Arc<dyn PostRepository>) {
        (
            Arc::new(InMemoryUserRepository::new()),
            Arc::new(InMemoryPostRepository::new()),
        )
    }
}
