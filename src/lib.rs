//! # blog-store
//!
//! Validated persistence models for a blogging application: `Author` and
//! `Post` records with field-level validation (name uniqueness, phone
//! format, length bounds, enumerated category, title keyword requirement)
//! and PostgreSQL-backed storage.
//!
//! Validation is decoupled from storage: drafts ([`domain::NewAuthor`],
//! [`domain::NewPost`]) and entity setters return `Result` with a
//! [`error::ValidationError`] naming the failed field, while the one
//! invariant that depends on stored state — author name uniqueness — is
//! enforced by the store as a typed duplicate-name error.
//!
//! ## Architecture
//!
//! ```text
//! Callers (application code, tests)
//!     │
//!     ├── NewAuthor / NewPost + setters (domain/)
//!     │       field validators, ValidationError
//!     │
//!     ├── MemoryStore (persistence/)
//!     │       RwLock<HashMap>, uniqueness under the write lock
//!     │
//!     └── PostgresStore (persistence/)
//!             sqlx::PgPool, UNIQUE constraint → DuplicateAuthorName
//! ```

pub mod config;
pub mod domain;
pub mod error;
pub mod persistence;
