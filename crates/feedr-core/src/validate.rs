//! Input validation shared by both protocol adapters.
//!
//! Both surfaces call the same services and the services call these helpers,
//! so a too-short title fails identically whether it arrived as a REST body
//! field or a GraphQL input object.

use email_address::EmailAddress;

use crate::error::DomainError;

/// Minimum trimmed length for titles and content.
pub const MIN_TEXT_LEN: usize = 5;

/// Minimum raw length for passwords.
pub const MIN_PASSWORD_LEN: usize = 5;

/// Title/content rule: non-empty and at least [`MIN_TEXT_LEN`] characters
/// after trimming.
pub fn required_text(field: &'static str, value: &str) -> Result<(), DomainError> {
    if value.trim().chars().count() < MIN_TEXT_LEN {
        return Err(DomainError::validation(format!(
            "{field} must be at least {MIN_TEXT_LEN} characters"
        )));
    }
    Ok(())
}

/// Free-text rule for names and statuses: non-empty after trimming.
pub fn non_empty(field: &'static str, value: &str) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::validation(format!("{field} must not be empty")));
    }
    Ok(())
}

/// Syntactic email check.
pub fn email(value: &str) -> Result<(), DomainError> {
    if !EmailAddress::is_valid(value) {
        return Err(DomainError::validation("invalid email address"));
    }
    Ok(())
}

/// Password rule: non-empty and at least [`MIN_PASSWORD_LEN`] characters.
pub fn password(value: &str) -> Result<(), DomainError> {
    if value.chars().count() < MIN_PASSWORD_LEN {
        return Err(DomainError::validation(format!(
            "password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }
    Ok(())
}
