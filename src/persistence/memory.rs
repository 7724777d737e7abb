//! In-memory implementation of the store.
//!
//! [`MemoryStore`] keeps both tables in a `HashMap` behind a single
//! [`tokio::sync::RwLock`] and assigns identifiers from monotonic
//! counters. The author name uniqueness check is a read-then-write
//! lookup, made atomic by running under the store's write lock.

use std::collections::HashMap;

use chrono::Utc;
use tokio::sync::RwLock;

use crate::domain::{Author, AuthorId, NewAuthor, NewPost, Post, PostId};
use crate::error::StoreError;

#[derive(Debug, Default)]
struct Tables {
    next_author_id: i64,
    next_post_id: i64,
    authors: HashMap<AuthorId, Author>,
    posts: HashMap<PostId, Post>,
}

/// In-memory store for authors and posts.
///
/// # Concurrency
///
/// All writes are serialized behind one write lock; reads are concurrent.
/// Mutation discipline is last write wins.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a new author, assigning its identifier and timestamps.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DuplicateAuthorName`] if an author with the
    /// same name already exists.
    pub async fn create_author(&self, new: NewAuthor) -> Result<Author, StoreError> {
        let mut tables = self.tables.write().await;
        if tables.authors.values().any(|a| a.name() == new.name()) {
            return Err(StoreError::DuplicateAuthorName(new.name().to_string()));
        }
        tables.next_author_id += 1;
        let id = AuthorId::new(tables.next_author_id);
        let author = Author::from_new(id, new, Utc::now());
        tables.authors.insert(id, author.clone());
        tracing::info!(%id, name = author.name(), "author created");
        Ok(author)
    }

    /// Fetches an author by primary key.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::AuthorNotFound`] if no author with the given
    /// ID exists.
    pub async fn get_author(&self, id: AuthorId) -> Result<Author, StoreError> {
        let tables = self.tables.read().await;
        tables
            .authors
            .get(&id)
            .cloned()
            .ok_or(StoreError::AuthorNotFound(id))
    }

    /// Looks up an author by exact name (the query-by-field lookup).
    ///
    /// # Errors
    ///
    /// Infallible for this store; the `Result` mirrors the PostgreSQL
    /// store's signature.
    pub async fn find_author_by_name(&self, name: &str) -> Result<Option<Author>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.authors.values().find(|a| a.name() == name).cloned())
    }

    /// Writes back a mutated author record, re-checking name uniqueness
    /// against all other stored authors.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::AuthorNotFound`] if the record does not
    /// exist, or [`StoreError::DuplicateAuthorName`] if another author
    /// already holds the new name.
    pub async fn update_author(&self, author: &Author) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        if !tables.authors.contains_key(&author.id()) {
            return Err(StoreError::AuthorNotFound(author.id()));
        }
        let taken = tables
            .authors
            .values()
            .any(|a| a.id() != author.id() && a.name() == author.name());
        if taken {
            return Err(StoreError::DuplicateAuthorName(author.name().to_string()));
        }
        tables.authors.insert(author.id(), author.clone());
        Ok(())
    }

    /// Inserts a new post, assigning its identifier and timestamps.
    ///
    /// # Errors
    ///
    /// Infallible for this store; the `Result` mirrors the PostgreSQL
    /// store's signature.
    pub async fn create_post(&self, new: NewPost) -> Result<Post, StoreError> {
        let mut tables = self.tables.write().await;
        tables.next_post_id += 1;
        let id = PostId::new(tables.next_post_id);
        let post = Post::from_new(id, new, Utc::now());
        tables.posts.insert(id, post.clone());
        tracing::info!(%id, title = post.title(), "post created");
        Ok(post)
    }

    /// Fetches a post by primary key.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::PostNotFound`] if no post with the given ID
    /// exists.
    pub async fn get_post(&self, id: PostId) -> Result<Post, StoreError> {
        let tables = self.tables.read().await;
        tables
            .posts
            .get(&id)
            .cloned()
            .ok_or(StoreError::PostNotFound(id))
    }

    /// Writes back a mutated post record.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::PostNotFound`] if the record does not exist.
    pub async fn update_post(&self, post: &Post) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        if !tables.posts.contains_key(&post.id()) {
            return Err(StoreError::PostNotFound(post.id()));
        }
        tables.posts.insert(post.id(), post.clone());
        Ok(())
    }

    /// Returns all stored authors in unspecified order.
    pub async fn list_authors(&self) -> Vec<Author> {
        self.tables.read().await.authors.values().cloned().collect()
    }

    /// Returns all stored posts in unspecified order.
    pub async fn list_posts(&self) -> Vec<Post> {
        self.tables.read().await.posts.values().cloned().collect()
    }

    /// Returns `true` if the store contains no records at all.
    pub async fn is_empty(&self) -> bool {
        let tables = self.tables.read().await;
        tables.authors.is_empty() && tables.posts.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn jane() -> NewAuthor {
        let Ok(new) = NewAuthor::new("Jane Doe", "5551234567") else {
            panic!("valid draft");
        };
        new
    }

    fn make_post() -> NewPost {
        let Ok(new) = NewPost::new(
            "Top Secrets Revealed",
            "x".repeat(260),
            "y".repeat(100),
            "Fiction",
        ) else {
            panic!("valid draft");
        };
        new
    }

    #[tokio::test]
    async fn create_author_assigns_id_and_timestamps() {
        let store = MemoryStore::new();
        let author = store.create_author(jane()).await;
        let Ok(author) = author else {
            panic!("creation failed");
        };
        assert_eq!(author.id(), AuthorId::new(1));
        assert_eq!(author.name(), "Jane Doe");
        assert_eq!(author.created_at(), author.updated_at());

        let fetched = store.get_author(author.id()).await;
        let Ok(fetched) = fetched else {
            panic!("author not found");
        };
        assert_eq!(fetched, author);
    }

    #[tokio::test]
    async fn duplicate_author_name_is_rejected() {
        let store = MemoryStore::new();
        let first = store.create_author(jane()).await;
        assert!(first.is_ok());

        let Ok(second) = NewAuthor::new("Jane Doe", "0009998888") else {
            panic!("valid draft");
        };
        let result = store.create_author(second).await;
        assert!(matches!(
            result,
            Err(StoreError::DuplicateAuthorName(name)) if name == "Jane Doe"
        ));
    }

    #[tokio::test]
    async fn find_author_by_name_is_exact() {
        let store = MemoryStore::new();
        let _ = store.create_author(jane()).await;

        let found = store.find_author_by_name("Jane Doe").await;
        assert!(matches!(found, Ok(Some(_))));

        let missing = store.find_author_by_name("jane doe").await;
        assert!(matches!(missing, Ok(None)));
    }

    #[tokio::test]
    async fn get_nonexistent_author_returns_error() {
        let store = MemoryStore::new();
        let result = store.get_author(AuthorId::new(9)).await;
        assert!(matches!(result, Err(StoreError::AuthorNotFound(_))));
    }

    #[tokio::test]
    async fn update_author_persists_mutation() {
        let store = MemoryStore::new();
        let Ok(mut author) = store.create_author(jane()).await else {
            panic!("creation failed");
        };

        let Ok(()) = author.set_phone_number("0123456789") else {
            panic!("valid phone");
        };
        let result = store.update_author(&author).await;
        assert!(result.is_ok());

        let Ok(fetched) = store.get_author(author.id()).await else {
            panic!("author not found");
        };
        assert_eq!(fetched.phone_number(), "0123456789");
        assert!(fetched.updated_at() >= fetched.created_at());
    }

    #[tokio::test]
    async fn rename_to_taken_name_is_rejected() {
        let store = MemoryStore::new();
        let _ = store.create_author(jane()).await;
        let Ok(other) = NewAuthor::new("John Roe", "0009998888") else {
            panic!("valid draft");
        };
        let Ok(mut other) = store.create_author(other).await else {
            panic!("creation failed");
        };

        let Ok(()) = other.set_name("Jane Doe") else {
            panic!("locally valid name");
        };
        let result = store.update_author(&other).await;
        assert!(matches!(result, Err(StoreError::DuplicateAuthorName(_))));
    }

    #[tokio::test]
    async fn rename_to_own_name_is_allowed() {
        let store = MemoryStore::new();
        let Ok(mut author) = store.create_author(jane()).await else {
            panic!("creation failed");
        };
        let Ok(()) = author.set_name("Jane Doe") else {
            panic!("valid name");
        };
        assert!(store.update_author(&author).await.is_ok());
    }

    #[tokio::test]
    async fn update_unknown_author_returns_error() {
        let seeded = MemoryStore::new();
        let Ok(mut author) = seeded.create_author(jane()).await else {
            panic!("creation failed");
        };
        let Ok(()) = author.set_phone_number("0123456789") else {
            panic!("valid phone");
        };
        // A record created in a different store instance is unknown here.
        let store = MemoryStore::new();
        let result = store.update_author(&author).await;
        assert!(matches!(result, Err(StoreError::AuthorNotFound(_))));
    }

    #[tokio::test]
    async fn create_and_update_post() {
        let store = MemoryStore::new();
        let Ok(mut post) = store.create_post(make_post()).await else {
            panic!("creation failed");
        };
        assert_eq!(post.id(), PostId::new(1));

        let Ok(()) = post.set_category("Non-Fiction") else {
            panic!("valid category");
        };
        assert!(store.update_post(&post).await.is_ok());

        let Ok(fetched) = store.get_post(post.id()).await else {
            panic!("post not found");
        };
        assert_eq!(fetched.category().as_str(), "Non-Fiction");
    }

    #[tokio::test]
    async fn get_nonexistent_post_returns_error() {
        let store = MemoryStore::new();
        let result = store.get_post(PostId::new(1)).await;
        assert!(matches!(result, Err(StoreError::PostNotFound(_))));
    }

    #[tokio::test]
    async fn list_and_is_empty() {
        let store = MemoryStore::new();
        assert!(store.is_empty().await);

        let _ = store.create_author(jane()).await;
        let _ = store.create_post(make_post()).await;

        assert!(!store.is_empty().await);
        assert_eq!(store.list_authors().await.len(), 1);
        assert_eq!(store.list_posts().await.len(), 1);
    }

    #[tokio::test]
    async fn ids_are_assigned_monotonically() {
        let store = MemoryStore::new();
        let Ok(first) = store.create_author(jane()).await else {
            panic!("creation failed");
        };
        let Ok(other) = NewAuthor::new("John Roe", "0009998888") else {
            panic!("valid draft");
        };
        let Ok(second) = store.create_author(other).await else {
            panic!("creation failed");
        };
        assert!(second.id().get() > first.id().get());
    }
}
