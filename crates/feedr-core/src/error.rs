//! Domain-level error types.

use thiserror::Error;
use uuid::Uuid;

/// Domain errors - business logic failures.
///
/// Everything except `Upstream` is expected control flow and is reported to
/// the caller with a stable kind; `Upstream` is the only class logged at
/// error severity.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("{entity_type} not found: {id}")]
    NotFound { entity_type: &'static str, id: Uuid },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Email already registered: {0}")]
    DuplicateEmail(String),

    /// Covers both "no such account" and "wrong password". Collapsing the two
    /// keeps valid emails unenumerable through the login endpoint.
    #[error("Invalid email or password")]
    BadCredentials,

    #[error("Authentication required")]
    Unauthenticated,

    #[error("Not authorized to modify this resource")]
    NotAuthorized,

    #[error("Upstream failure: {0}")]
    Upstream(String),
}

impl DomainError {
    pub fn not_found(entity_type: &'static str, id: Uuid) -> Self {
        Self::NotFound { entity_type, id }
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

/// Repository-level errors.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Query execution failed: {0}")]
    Query(String),

    #[error("Entity not found")]
    NotFound,

    #[error("Constraint violation: {0}")]
    Constraint(String),
}

// Services look entities up before mutating them, so a repository failure
// reaching this conversion is an unexpected store problem, not control flow.
impl From<RepoError> for DomainError {
    fn from(err: RepoError) -> Self {
        DomainError::Upstream(err.to_string())
    }
}

impl From<crate::ports::AuthError> for DomainError {
    fn from(err: crate::ports::AuthError) -> Self {
        use crate::ports::AuthError;
        match err {
            AuthError::InvalidCredentials => DomainError::BadCredentials,
            AuthError::TokenExpired | AuthError::InvalidToken(_) | AuthError::MissingAuth => {
                DomainError::Unauthenticated
            }
            AuthError::HashingError(msg) => DomainError::Upstream(msg),
        }
    }
}
