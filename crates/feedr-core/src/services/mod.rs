//! The engine: one set of services invoked by both protocol adapters.
//!
//! Mutations run in a fixed order regardless of entry point:
//! authenticate (adapter) -> validate -> authorize -> artifact-lifecycle
//! decision -> persist -> owner-index update -> respond.

mod accounts;
mod artifacts;
mod credentials;
mod feed;
pub mod guard;
mod posts;

pub use accounts::AccountService;
pub use artifacts::ArtifactLifecycle;
pub use credentials::{AuthSession, CredentialService};
pub use feed::{FeedPage, FeedService, PostOwner, PostView, PAGE_SIZE};
pub use posts::PostService;
