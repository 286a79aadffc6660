//! Error mapping - domain failures to RFC 7807 responses.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use feedr_core::DomainError;
use feedr_core::ports::ArtifactError;
use feedr_shared::ErrorResponse;
use std::fmt;

/// Application-level error wrapper converting [`DomainError`] kinds into
/// RFC 7807 responses. Both the REST surface and the GraphQL surface derive
/// their status codes from the same domain kinds.
#[derive(Debug)]
pub struct AppError(pub DomainError);

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match &self.0 {
            DomainError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            DomainError::DuplicateEmail(_) => StatusCode::CONFLICT,
            DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
            DomainError::NotAuthorized => StatusCode::FORBIDDEN,
            DomainError::Unauthenticated | DomainError::BadCredentials => {
                StatusCode::UNAUTHORIZED
            }
            DomainError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let error = match &self.0 {
            DomainError::Validation(detail) => ErrorResponse::validation(detail.clone()),
            DomainError::DuplicateEmail(email) => {
                ErrorResponse::conflict(format!("email already registered: {email}"))
            }
            DomainError::NotFound { .. } => ErrorResponse::not_found(self.0.to_string()),
            DomainError::NotAuthorized => ErrorResponse::forbidden(),
            DomainError::Unauthenticated => ErrorResponse::unauthorized(),
            DomainError::BadCredentials => {
                ErrorResponse::unauthorized().with_detail(self.0.to_string())
            }
            DomainError::Upstream(detail) => {
                // The only class escalated for operational follow-up; the
                // caller gets no internal detail.
                tracing::error!("Upstream failure: {}", detail);
                ErrorResponse::internal_error()
            }
        };

        HttpResponse::build(self.status_code()).json(error)
    }
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        AppError(err)
    }
}

impl From<ArtifactError> for AppError {
    fn from(err: ArtifactError) -> Self {
        AppError(DomainError::Upstream(err.to_string()))
    }
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;
