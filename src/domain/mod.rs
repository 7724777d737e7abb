//! Domain layer: validated entity types for the blog data model.
//!
//! This module contains record identity, the two entity types with their
//! field validators, and the closed category enumeration. Validators are
//! pure predicates over the proposed value; the only stateful invariant
//! (author name uniqueness) lives in the persistence layer.

pub mod author;
pub mod category;
pub mod ids;
pub mod post;

pub use author::{Author, NewAuthor};
pub use category::Category;
pub use ids::{AuthorId, PostId};
pub use post::{NewPost, Post};
