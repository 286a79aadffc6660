//! Artifact storage implementations.

mod fs;

pub use fs::FsArtifactStore;
