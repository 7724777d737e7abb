//! Store error types.
//!
//! [`ValidationError`] is raised whenever a proposed field value violates
//! one of the model invariants. [`StoreError`] is the central error type
//! for store operations and wraps validation failures alongside lookup
//! and database failures.

use crate::domain::{AuthorId, PostId};

/// Signaled failure when a proposed field value violates a stated invariant.
///
/// Carries the name of the field that failed and a human-readable reason,
/// so callers can surface exactly which invariant was violated.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("validation failed for `{field}`: {reason}")]
pub struct ValidationError {
    /// Name of the field that failed validation (e.g. `"phone_number"`).
    pub field: &'static str,
    /// Human-readable description of the violated invariant.
    pub reason: String,
}

impl ValidationError {
    /// Creates a new `ValidationError` for the given field.
    #[must_use]
    pub fn new(field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}

/// Store-level error enum covering validation, lookup, and database failures.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A field value violated a model invariant.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// An author with the given name already exists.
    ///
    /// Name uniqueness is enforced at the storage level (a `UNIQUE`
    /// constraint in PostgreSQL, a lookup under the write lock in the
    /// memory store), so duplicates surface as this typed error rather
    /// than a race between check and insert.
    #[error("author with name {0:?} already exists")]
    DuplicateAuthorName(String),

    /// Author with the given ID was not found.
    #[error("author not found: {0}")]
    AuthorNotFound(AuthorId),

    /// Post with the given ID was not found.
    #[error("post not found: {0}")]
    PostNotFound(PostId),

    /// Persistence layer failure.
    #[error("database error: {0}")]
    Database(String),
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_names_field_and_reason() {
        let err = ValidationError::new("summary", "must be at most 250 characters");
        let msg = err.to_string();
        assert!(msg.contains("summary"));
        assert!(msg.contains("250"));
    }

    #[test]
    fn store_error_is_transparent_for_validation() {
        let err: StoreError = ValidationError::new("name", "cannot be empty").into();
        assert_eq!(
            err.to_string(),
            "validation failed for `name`: cannot be empty"
        );
    }

    #[test]
    fn duplicate_name_message_quotes_name() {
        let err = StoreError::DuplicateAuthorName("Jane Doe".to_string());
        assert!(err.to_string().contains("\"Jane Doe\""));
    }
}
