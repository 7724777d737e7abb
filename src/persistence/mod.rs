//! Persistence layer: author and post storage.
//!
//! Two interchangeable stores expose the same create/read/update
//! operations plus a query-by-name lookup: [`MemoryStore`] keeps records
//! in a `RwLock<HashMap>` and is used by tests and embedders, while
//! [`PostgresStore`] uses `sqlx::PgPool` for async PostgreSQL access and
//! enforces author name uniqueness with a `UNIQUE` column constraint.

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PostgresStore;
