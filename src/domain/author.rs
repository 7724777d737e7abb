//! Author record with validated fields.
//!
//! Validation is decoupled from the storage layer: [`NewAuthor::new`]
//! checks field invariants up front and the entity setters re-run the
//! relevant validator on every mutation. The one invariant that depends
//! on stored state, name uniqueness, is enforced by the store at write
//! time (see [`crate::error::StoreError::DuplicateAuthorName`]).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::AuthorId;
use crate::error::ValidationError;

/// Required length of a phone number, in decimal digits.
pub const PHONE_NUMBER_LEN: usize = 10;

/// Validates a proposed author name: must be non-empty.
///
/// # Errors
///
/// Returns a [`ValidationError`] for the `name` field if the value is empty.
pub fn validate_name(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::new("name", "cannot be empty"));
    }
    Ok(())
}

/// Validates a proposed phone number: exactly 10 decimal digits.
///
/// An empty value fails the same length check and yields the same clean
/// [`ValidationError`] as any other malformed input.
///
/// # Errors
///
/// Returns a [`ValidationError`] for the `phone_number` field if the value
/// is not exactly [`PHONE_NUMBER_LEN`] characters or contains a non-digit.
pub fn validate_phone_number(value: &str) -> Result<(), ValidationError> {
    if value.chars().count() != PHONE_NUMBER_LEN || !value.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::new(
            "phone_number",
            format!("must be exactly {PHONE_NUMBER_LEN} decimal digits"),
        ));
    }
    Ok(())
}

/// Validated input for creating an [`Author`].
///
/// Construction via [`NewAuthor::new`] guarantees the field-local
/// invariants hold; the store checks name uniqueness on insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAuthor {
    name: String,
    phone_number: String,
}

impl NewAuthor {
    /// Validates the given fields and builds a `NewAuthor`.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] naming the first field that violates
    /// its invariant.
    pub fn new(name: impl Into<String>, phone_number: impl Into<String>) -> Result<Self, ValidationError> {
        let name = name.into();
        let phone_number = phone_number.into();
        validate_name(&name)?;
        validate_phone_number(&phone_number)?;
        Ok(Self { name, phone_number })
    }

    /// The validated author name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The validated phone number.
    #[must_use]
    pub fn phone_number(&self) -> &str {
        &self.phone_number
    }
}

/// A stored author record.
///
/// Fields are private so every mutation goes through a validating setter;
/// `updated_at` is bumped on each successful mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    id: AuthorId,
    name: String,
    phone_number: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Author {
    /// Materializes an author from store-assigned identity and timestamps.
    pub(crate) fn from_stored(
        id: AuthorId,
        name: String,
        phone_number: String,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name,
            phone_number,
            created_at,
            updated_at,
        }
    }

    /// Materializes a freshly created author from a validated draft.
    pub(crate) fn from_new(id: AuthorId, new: NewAuthor, at: DateTime<Utc>) -> Self {
        Self {
            id,
            name: new.name,
            phone_number: new.phone_number,
            created_at: at,
            updated_at: at,
        }
    }

    /// Record identifier (immutable after creation).
    #[must_use]
    pub fn id(&self) -> AuthorId {
        self.id
    }

    /// Author name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Phone number, exactly 10 decimal digits.
    #[must_use]
    pub fn phone_number(&self) -> &str {
        &self.phone_number
    }

    /// Creation timestamp (immutable after creation).
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Timestamp of the last successful mutation.
    #[must_use]
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Assigns a new name, re-running the name validator.
    ///
    /// Uniqueness against other stored authors is checked when the record
    /// is written back via the store's update operation.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] if the new name is empty; the record
    /// is left unchanged.
    pub fn set_name(&mut self, name: impl Into<String>) -> Result<(), ValidationError> {
        let name = name.into();
        validate_name(&name)?;
        self.name = name;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Assigns a new phone number, re-running the format validator.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] if the value is not exactly 10 decimal
    /// digits; the record is left unchanged.
    pub fn set_phone_number(&mut self, phone_number: impl Into<String>) -> Result<(), ValidationError> {
        let phone_number = phone_number.into();
        validate_phone_number(&phone_number)?;
        self.phone_number = phone_number;
        self.updated_at = Utc::now();
        Ok(())
    }
}
