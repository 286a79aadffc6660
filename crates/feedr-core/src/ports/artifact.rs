//! Artifact storage port - where uploaded image files live.

use async_trait::async_trait;

/// Artifact storage errors.
#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("Artifact not found: {0}")]
    NotFound(String),

    #[error("Artifact storage failed: {0}")]
    Io(String),
}

/// Capability-addressed store for uploaded image files.
///
/// The engine only decides which path is current and when a stale one must
/// go; physical placement and deletion are this port's concern.
#[async_trait]
pub trait ArtifactStore: Send + Sync {
    /// Persist `bytes` under a fresh path derived from `suggested_name`,
    /// returning the path to record on the post.
    async fn store(&self, bytes: &[u8], suggested_name: &str) -> Result<String, ArtifactError>;

    /// Remove the file at `path`. Fails with `NotFound` when absent.
    async fn remove(&self, path: &str) -> Result<(), ArtifactError>;
}
