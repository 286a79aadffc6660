//! Authorization guard - state-free ownership decisions.

use crate::domain::{Identity, Post};
use crate::error::DomainError;

/// Mutation kinds the guard distinguishes, for log context only; the rule is
/// identical for both.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    Update,
    Delete,
}

/// Allowed iff the caller owns the post. No roles, no admin override,
/// no sharing.
pub fn ensure_can_mutate(
    caller: &Identity,
    post: &Post,
    kind: MutationKind,
) -> Result<(), DomainError> {
    if caller.user_id == post.owner_id {
        return Ok(());
    }
    tracing::debug!(
        caller = %caller.user_id,
        owner = %post.owner_id,
        post = %post.id,
        ?kind,
        "ownership check failed"
    );
    Err(DomainError::NotAuthorized)
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn post_owned_by(owner_id: Uuid) -> Post {
        Post::new(
            owner_id,
            "Hello world".into(),
            "First post content".into(),
            "images/one.png".into(),
        )
    }

    fn identity(user_id: Uuid) -> Identity {
        Identity {
            user_id,
            email: "user@example.com".into(),
        }
    }

    #[test]
    fn owner_may_mutate() {
        let owner = Uuid::new_v4();
        let post = post_owned_by(owner);
        assert!(ensure_can_mutate(&identity(owner), &post, MutationKind::Update).is_ok());
        assert!(ensure_can_mutate(&identity(owner), &post, MutationKind::Delete).is_ok());
    }

    #[test]
    fn non_owner_is_denied() {
        let post = post_owned_by(Uuid::new_v4());
        let stranger = identity(Uuid::new_v4());
        assert!(matches!(
            ensure_can_mutate(&stranger, &post, MutationKind::Update),
            Err(DomainError::NotAuthorized)
        ));
        assert!(matches!(
            ensure_can_mutate(&stranger, &post, MutationKind::Delete),
            Err(DomainError::NotAuthorized)
        ));
    }
}
