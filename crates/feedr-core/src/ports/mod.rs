//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod artifact;
mod auth;
mod repository;

pub use artifact::{ArtifactError, ArtifactStore};
pub use auth::{AuthError, PasswordService, TokenClaims, TokenService};
pub use repository::{BaseRepository, PostPage, PostRepository, UserRepository};
