//! Typed endpoint clients.
//!
//! Thin per-resource façades over the shared [`Executor`]: each method
//! translates a resource-level intent into a [`RequestDescriptor`] and
//! dispatches it. No retry or logging logic lives here; all of it is
//! delegated to the executor. Every method validates its own arguments
//! synchronously and fails fast with a [`ValidationError`] instead of making
//! a network call on invalid input.
//!
//! [`Executor`]: crate::Executor
//! [`RequestDescriptor`]: crate::RequestDescriptor

mod auth;
mod resources;
mod users;

pub use auth::AuthClient;
pub use resources::ResourcesClient;
pub use users::UsersClient;

use crate::config::MAX_PER_PAGE;
use crate::error_handling::ValidationError;

/// Validates a 1-based page number.
fn validate_page(page: u32) -> Result<(), ValidationError> {
    if page < 1 {
        return Err(ValidationError::new("page", format!("must be >= 1 (got {page})")));
    }
    Ok(())
}

/// Validates a page size against the endpoint limit.
fn validate_per_page(per_page: u32) -> Result<(), ValidationError> {
    if !(1..=MAX_PER_PAGE).contains(&per_page) {
        return Err(ValidationError::new(
            "per_page",
            format!("must be in 1..={MAX_PER_PAGE} (got {per_page})"),
        ));
    }
    Ok(())
}

/// Validates a positive entity identifier.
fn validate_id(field: &'static str, id: u64) -> Result<(), ValidationError> {
    if id < 1 {
        return Err(ValidationError::new(field, format!("must be >= 1 (got {id})")));
    }
    Ok(())
}

/// Validates a required, non-blank string field.
fn validate_non_empty(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new(field, "must not be empty"));
    }
    Ok(())
}

/// Validates that an email is at least structurally plausible.
///
/// Full RFC 5322 parsing is deliberately out of scope; the check only
/// rejects inputs the remote would reject unconditionally.
fn validate_email(email: &str) -> Result<(), ValidationError> {
    let trimmed = email.trim();
    let plausible = trimmed
        .split_once('@')
        .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.'));
    if !plausible {
        return Err(ValidationError::new(
            "email",
            format!("must look like an address (got {email:?})"),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_page_rejects_zero() {
        assert!(validate_page(0).is_err());
        assert!(validate_page(1).is_ok());
    }

    #[test]
    fn test_validate_per_page_bounds() {
        assert!(validate_per_page(0).is_err());
        assert!(validate_per_page(1).is_ok());
        assert!(validate_per_page(MAX_PER_PAGE).is_ok());
        assert!(validate_per_page(MAX_PER_PAGE + 1).is_err());
    }

    #[test]
    fn test_validate_non_empty_rejects_whitespace() {
        assert!(validate_non_empty("name", "   ").is_err());
        assert!(validate_non_empty("name", "Bob").is_ok());
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("eve.holt@reqres.in").is_ok());
        assert!(validate_email("no-at-sign").is_err());
        assert!(validate_email("@nodomain").is_err());
        assert!(validate_email("user@nodot").is_err());
    }
}
