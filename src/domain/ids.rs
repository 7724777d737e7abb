//! Type-safe record identifiers.
//!
//! [`AuthorId`] and [`PostId`] are newtype wrappers around `i64` providing
//! type safety so that identifiers for the two tables cannot be confused.
//! Values are assigned by the store at creation time (a sequence in
//! PostgreSQL, a monotonic counter in the memory store).

use std::fmt;

use serde::{Deserialize, Serialize};

/// Unique identifier for an [`super::Author`] record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuthorId(i64);

impl AuthorId {
    /// Wraps a raw database identifier.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the inner `i64`.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for AuthorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for AuthorId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl From<AuthorId> for i64 {
    fn from(id: AuthorId) -> Self {
        id.0
    }
}

/// Unique identifier for a [`super::Post`] record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostId(i64);

impl PostId {
    /// Wraps a raw database identifier.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the inner `i64`.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for PostId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl From<PostId> for i64 {
    fn from(id: PostId) -> Self {
        id.0
    }
}
