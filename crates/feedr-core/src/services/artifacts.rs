//! Artifact lifecycle - keeps image files consistent with post records.
//!
//! Removal always happens after the record write that supersedes the old
//! path has committed; a failed write therefore leaves the old artifact
//! intact. Removal failures are logged and swallowed: orphaned files are an
//! acceptable failure mode, inconsistent records are not.

use std::sync::Arc;

use crate::ports::ArtifactStore;

/// Decides which image file becomes current and which becomes stale on each
/// post mutation, and performs the best-effort removal of stale ones.
#[derive(Clone)]
pub struct ArtifactLifecycle {
    store: Arc<dyn ArtifactStore>,
}

impl ArtifactLifecycle {
    pub fn new(store: Arc<dyn ArtifactStore>) -> Self {
        Self { store }
    }

    /// A freshly created post needs no cleanup; the path simply becomes
    /// current.
    pub fn on_create(&self, _new_path: &str) {}

    /// Call after a record carrying `new_path` has been committed. An
    /// unchanged path never triggers removal.
    pub async fn on_replace(&self, old_path: &str, new_path: &str) {
        if old_path == new_path {
            return;
        }
        self.discard(old_path).await;
    }

    /// Call after the post record has been removed and the owner index
    /// updated.
    pub async fn on_delete(&self, path: &str) {
        self.discard(path).await;
    }

    async fn discard(&self, path: &str) {
        if let Err(err) = self.store.remove(path).await {
            tracing::warn!(artifact = %path, error = %err, "failed to remove stale artifact");
        }
    }
}
