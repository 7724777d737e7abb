//! PostgreSQL implementation of the store.
//!
//! Author name uniqueness is enforced by the `UNIQUE` constraint on
//! `authors.name`; unique-violation errors from the database are mapped
//! to [`StoreError::DuplicateAuthorName`], so there is no read-then-write
//! race between the existence check and the insert.

use std::time::Duration;

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use crate::config::StoreConfig;
use crate::domain::{Author, AuthorId, Category, NewAuthor, NewPost, Post, PostId};
use crate::error::StoreError;

/// Row shape shared by all `authors` queries.
type AuthorRow = (i64, String, String, DateTime<Utc>, DateTime<Utc>);

/// Row shape shared by all `posts` queries.
type PostRow = (
    i64,
    String,
    String,
    String,
    String,
    DateTime<Utc>,
    DateTime<Utc>,
);

/// PostgreSQL-backed store using `sqlx::PgPool`.
#[derive(Debug, Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Creates a store from an existing connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connects to PostgreSQL using the given configuration.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError::Database`] if the pool cannot be
    /// established within the configured timeout.
    pub async fn connect(config: &StoreConfig) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.database_max_connections)
            .min_connections(config.database_min_connections)
            .acquire_timeout(Duration::from_secs(config.database_connect_timeout_secs))
            .connect(&config.database_url)
            .await
            .map_err(|e| StoreError::Database(e.to_string()))?;
        Ok(Self::new(pool))
    }

    /// Creates the `authors` and `posts` tables if they do not exist.
    ///
    /// Idempotent; intended for the demo binary and local development.
    /// Schema migration tooling is out of scope for this crate.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError::Database`] on DDL failure.
    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS authors (\
                 id BIGSERIAL PRIMARY KEY, \
                 name TEXT UNIQUE NOT NULL, \
                 phone_number TEXT NOT NULL, \
                 created_at TIMESTAMPTZ NOT NULL DEFAULT now(), \
                 updated_at TIMESTAMPTZ NOT NULL DEFAULT now())",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::Database(e.to_string()))?;

        sqlx::query(
            "CREATE TABLE IF NOT EXISTS posts (\
                 id BIGSERIAL PRIMARY KEY, \
                 title TEXT NOT NULL, \
                 content TEXT NOT NULL, \
                 category TEXT NOT NULL, \
                 summary TEXT NOT NULL, \
                 created_at TIMESTAMPTZ NOT NULL DEFAULT now(), \
                 updated_at TIMESTAMPTZ NOT NULL DEFAULT now())",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(())
    }

    /// Inserts a new author; identifier and timestamps are assigned by
    /// the database.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DuplicateAuthorName`] if the `UNIQUE`
    /// constraint on `name` is violated, or [`StoreError::Database`] on
    /// any other database failure.
    pub async fn create_author(&self, new: NewAuthor) -> Result<Author, StoreError> {
        let row = sqlx::query_as::<_, AuthorRow>(
            "INSERT INTO authors (name, phone_number) VALUES ($1, $2) \
             RETURNING id, name, phone_number, created_at, updated_at",
        )
        .bind(new.name())
        .bind(new.phone_number())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, new.name()))?;

        let author = author_from_row(row);
        tracing::info!(id = %author.id(), name = author.name(), "author created");
        Ok(author)
    }

    /// Fetches an author by primary key.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::AuthorNotFound`] if no row matches, or
    /// [`StoreError::Database`] on database failure.
    pub async fn get_author(&self, id: AuthorId) -> Result<Author, StoreError> {
        let row = sqlx::query_as::<_, AuthorRow>(
            "SELECT id, name, phone_number, created_at, updated_at FROM authors WHERE id = $1",
        )
        .bind(id.get())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StoreError::Database(e.to_string()))?;

        row.map(author_from_row).ok_or(StoreError::AuthorNotFound(id))
    }

    /// Looks up an author by exact name (the query-by-field lookup).
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError::Database`] on database failure.
    pub async fn find_author_by_name(&self, name: &str) -> Result<Option<Author>, StoreError> {
        let row = sqlx::query_as::<_, AuthorRow>(
            "SELECT id, name, phone_number, created_at, updated_at FROM authors WHERE name = $1",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(row.map(author_from_row))
    }

    /// Writes back a mutated author record.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::AuthorNotFound`] if the row does not exist,
    /// [`StoreError::DuplicateAuthorName`] if the new name collides with
    /// another author, or [`StoreError::Database`] on any other failure.
    pub async fn update_author(&self, author: &Author) -> Result<(), StoreError> {
        let result = sqlx::query(
            "UPDATE authors SET name = $2, phone_number = $3, updated_at = $4 WHERE id = $1",
        )
        .bind(author.id().get())
        .bind(author.name())
        .bind(author.phone_number())
        .bind(author.updated_at())
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, author.name()))?;

        if result.rows_affected() == 0 {
            return Err(StoreError::AuthorNotFound(author.id()));
        }
        Ok(())
    }

    /// Inserts a new post; identifier and timestamps are assigned by the
    /// database.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError::Database`] on database failure.
    pub async fn create_post(&self, new: NewPost) -> Result<Post, StoreError> {
        let row = sqlx::query_as::<_, PostRow>(
            "INSERT INTO posts (title, content, category, summary) VALUES ($1, $2, $3, $4) \
             RETURNING id, title, content, category, summary, created_at, updated_at",
        )
        .bind(new.title())
        .bind(new.content())
        .bind(new.category().as_str())
        .bind(new.summary())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| StoreError::Database(e.to_string()))?;

        let post = post_from_row(row)?;
        tracing::info!(id = %post.id(), title = post.title(), "post created");
        Ok(post)
    }

    /// Fetches a post by primary key.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::PostNotFound`] if no row matches, or
    /// [`StoreError::Database`] on database failure.
    pub async fn get_post(&self, id: PostId) -> Result<Post, StoreError> {
        let row = sqlx::query_as::<_, PostRow>(
            "SELECT id, title, content, category, summary, created_at, updated_at \
             FROM posts WHERE id = $1",
        )
        .bind(id.get())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StoreError::Database(e.to_string()))?;

        match row {
            Some(row) => post_from_row(row),
            None => Err(StoreError::PostNotFound(id)),
        }
    }

    /// Writes back a mutated post record.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::PostNotFound`] if the row does not exist, or
    /// [`StoreError::Database`] on database failure.
    pub async fn update_post(&self, post: &Post) -> Result<(), StoreError> {
        let result = sqlx::query(
            "UPDATE posts SET title = $2, content = $3, category = $4, summary = $5, \
             updated_at = $6 WHERE id = $1",
        )
        .bind(post.id().get())
        .bind(post.title())
        .bind(post.content())
        .bind(post.category().as_str())
        .bind(post.summary())
        .bind(post.updated_at())
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::Database(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(StoreError::PostNotFound(post.id()));
        }
        Ok(())
    }
}

/// Maps a unique-constraint violation to the typed duplicate-name error.
fn map_unique_violation(e: sqlx::Error, name: &str) -> StoreError {
    if let sqlx::Error::Database(db) = &e
        && db.is_unique_violation()
    {
        return StoreError::DuplicateAuthorName(name.to_string());
    }
    StoreError::Database(e.to_string())
}

fn author_from_row((id, name, phone_number, created_at, updated_at): AuthorRow) -> Author {
    Author::from_stored(AuthorId::new(id), name, phone_number, created_at, updated_at)
}

fn post_from_row(
    (id, title, content, category, summary, created_at, updated_at): PostRow,
) -> Result<Post, StoreError> {
    // A stored category outside the enumeration means the row was written
    // by something other than this crate.
    let category = Category::parse(&category)
        .map_err(|_| StoreError::Database(format!("stored post {id} has invalid category {category:?}")))?;
    Ok(Post::from_stored(
        PostId::new(id),
        title,
        content,
        summary,
        category,
        created_at,
        updated_at,
    ))
}
