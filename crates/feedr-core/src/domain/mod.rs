//! Domain entities - the core business objects.

mod identity;
mod post;
mod user;

pub use identity::Identity;
pub use post::Post;
pub use user::{DEFAULT_STATUS, User};
