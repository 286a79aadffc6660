//! Filesystem artifact store.
//!
//! Files live flat under a root directory that the HTTP layer serves at
//! `/images`; the paths recorded on posts are the public `images/...` form.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use uuid::Uuid;

use feedr_core::ports::{ArtifactError, ArtifactStore};

/// Public path prefix recorded on posts and served by the HTTP layer.
const PUBLIC_PREFIX: &str = "images";

/// Stores uploaded images under `root`, one flat directory, uuid-prefixed
/// names.
pub struct FsArtifactStore {
    root: PathBuf,
}

impl FsArtifactStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Strip anything that could escape the root; keep the extension so the
    /// static file server can set a content type.
    fn sanitized_name(suggested: &str) -> String {
        let base = Path::new(suggested)
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("upload");

        base.chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect()
    }

    fn local_path(&self, public_path: &str) -> Result<PathBuf, ArtifactError> {
        let name = Path::new(public_path)
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| ArtifactError::NotFound(public_path.to_string()))?;
        Ok(self.root.join(name))
    }
}

#[async_trait]
impl ArtifactStore for FsArtifactStore {
    async fn store(&self, bytes: &[u8], suggested_name: &str) -> Result<String, ArtifactError> {
        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|e| ArtifactError::Io(e.to_string()))?;

        let file_name = format!("{}-{}", Uuid::new_v4(), Self::sanitized_name(suggested_name));
        let target = self.root.join(&file_name);

        tokio::fs::write(&target, bytes)
            .await
            .map_err(|e| ArtifactError::Io(e.to_string()))?;

        tracing::debug!(file = %target.display(), "stored artifact");
        Ok(format!("{PUBLIC_PREFIX}/{file_name}"))
    }

    async fn remove(&self, path: &str) -> Result<(), ArtifactError> {
        let target = self.local_path(path)?;

        match tokio::fs::remove_file(&target).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(ArtifactError::NotFound(path.to_string()))
            }
            Err(e) => Err(ArtifactError::Io(e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn store_then_remove() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsArtifactStore::new(dir.path());

        let path = store.store(b"png-bytes", "cat.png").await.unwrap();
        assert!(path.starts_with("images/"));
        assert!(path.ends_with("cat.png"));

        store.remove(&path).await.unwrap();
        assert!(matches!(
            store.remove(&path).await,
            Err(ArtifactError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn traversal_attempts_stay_inside_root() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsArtifactStore::new(dir.path());

        let path = store.store(b"data", "../../etc/passwd").await.unwrap();
        // Only the file name survives sanitization.
        assert!(path.starts_with("images/"));
        assert!(!path.contains(".."));
    }
}
