//! Post category enumeration.
//!
//! The set of accepted categories is a closed enumeration rather than an
//! inline string list, so the contract is centrally defined and the string
//! round-trip is exact (case-sensitive; `"fiction"` is not a category).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Category of a [`super::Post`].
///
/// Exactly two values are accepted: `"Fiction"` and `"Non-Fiction"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Fictional content. Stored as the string `"Fiction"`.
    #[serde(rename = "Fiction")]
    Fiction,
    /// Non-fictional content. Stored as the string `"Non-Fiction"`.
    #[serde(rename = "Non-Fiction")]
    NonFiction,
}

impl Category {
    /// All accepted categories, in storage order.
    pub const ALL: [Self; 2] = [Self::Fiction, Self::NonFiction];

    /// Returns the canonical storage string for this category.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Fiction => "Fiction",
            Self::NonFiction => "Non-Fiction",
        }
    }

    /// Parses a proposed category value, case-sensitively.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] for the `category` field if the value
    /// is not exactly one of the accepted strings.
    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == value)
            .ok_or_else(|| {
                ValidationError::new("category", "must be either 'Fiction' or 'Non-Fiction'")
            })
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
