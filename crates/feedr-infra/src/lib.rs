//! # Feedr Infrastructure
//!
//! Concrete implementations of the ports defined in `feedr-core`:
//! database repositories, auth primitives, and artifact storage.
//!
//! ## Feature Flags
//!
//! - `postgres` (default) - PostgreSQL repositories via SeaORM. The
//!   in-memory repositories are always compiled and serve as the fallback
//!   store when no database is configured.

pub mod artifact;
pub mod auth;
pub mod database;

pub use artifact::FsArtifactStore;
pub use auth::{Argon2PasswordService, JwtConfig, JwtTokenService};
pub use database::{InMemoryPostRepository, InMemoryUserRepository};

#[cfg(feature = "postgres")]
pub use database::{PostgresPostRepository, PostgresUserRepository};
