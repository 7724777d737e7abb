//! Post record with validated fields.
//!
//! All four content invariants are pure predicates over the proposed
//! value: title keyword requirement, content minimum length, summary
//! maximum length, and category membership. Lengths are counted in
//! characters, not bytes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Category, PostId};
use crate::error::ValidationError;

/// Minimum content length, in characters.
pub const CONTENT_MIN_LEN: usize = 250;

/// Maximum summary length, in characters.
pub const SUMMARY_MAX_LEN: usize = 250;

/// Phrases of which at least one must appear in every post title.
pub const TITLE_PHRASES: [&str; 4] = ["Won't Believe", "Secret", "Top", "Guess"];

/// Validates a proposed title: must contain one of [`TITLE_PHRASES`]
/// as a case-sensitive substring.
///
/// # Errors
///
/// Returns a [`ValidationError`] for the `title` field if no phrase occurs.
pub fn validate_title(value: &str) -> Result<(), ValidationError> {
    if !TITLE_PHRASES.iter().any(|phrase| value.contains(phrase)) {
        return Err(ValidationError::new(
            "title",
            "must contain one of: 'Won't Believe', 'Secret', 'Top', 'Guess'",
        ));
    }
    Ok(())
}

/// Validates proposed content: at least [`CONTENT_MIN_LEN`] characters.
///
/// # Errors
///
/// Returns a [`ValidationError`] for the `content` field if too short.
pub fn validate_content(value: &str) -> Result<(), ValidationError> {
    if value.chars().count() < CONTENT_MIN_LEN {
        return Err(ValidationError::new(
            "content",
            format!("must be at least {CONTENT_MIN_LEN} characters long"),
        ));
    }
    Ok(())
}

/// Validates a proposed summary: at most [`SUMMARY_MAX_LEN`] characters.
///
/// # Errors
///
/// Returns a [`ValidationError`] for the `summary` field if too long.
pub fn validate_summary(value: &str) -> Result<(), ValidationError> {
    if value.chars().count() > SUMMARY_MAX_LEN {
        return Err(ValidationError::new(
            "summary",
            format!("must be a maximum of {SUMMARY_MAX_LEN} characters long"),
        ));
    }
    Ok(())
}

/// Validated input for creating a [`Post`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    title: String,
    content: String,
    summary: String,
    category: Category,
}

impl NewPost {
    /// Validates the given fields and builds a `NewPost`.
    ///
    /// The category is given as its storage string and parsed
    /// case-sensitively against the accepted set.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] naming the first field that violates
    /// its invariant.
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        summary: impl Into<String>,
        category: &str,
    ) -> Result<Self, ValidationError> {
        let title = title.into();
        let content = content.into();
        let summary = summary.into();
        validate_title(&title)?;
        validate_content(&content)?;
        validate_summary(&summary)?;
        let category = Category::parse(category)?;
        Ok(Self {
            title,
            content,
            summary,
            category,
        })
    }

    /// The validated title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The validated content body.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// The validated summary.
    #[must_use]
    pub fn summary(&self) -> &str {
        &self.summary
    }

    /// The parsed category.
    #[must_use]
    pub fn category(&self) -> Category {
        self.category
    }
}

/// A stored post record.
///
/// Fields are private so every mutation goes through a validating setter;
/// `updated_at` is bumped on each successful mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    id: PostId,
    title: String,
    content: String,
    summary: String,
    category: Category,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Post {
    /// Materializes a post from store-assigned identity and timestamps.
    pub(crate) fn from_stored(
        id: PostId,
        title: String,
        content: String,
        summary: String,
        category: Category,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            title,
            content,
            summary,
            category,
            created_at,
            updated_at,
        }
    }

    /// Materializes a freshly created post from a validated draft.
    pub(crate) fn from_new(id: PostId, new: NewPost, at: DateTime<Utc>) -> Self {
        Self {
            id,
            title: new.title,
            content: new.content,
            summary: new.summary,
            category: new.category,
            created_at: at,
            updated_at: at,
        }
    }

    /// Record identifier (immutable after creation).
    #[must_use]
    pub fn id(&self) -> PostId {
        self.id
    }

    /// Post title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Post content body.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Post summary.
    #[must_use]
    pub fn summary(&self) -> &str {
        &self.summary
    }

    /// Post category.
    #[must_use]
    pub fn category(&self) -> Category {
        self.category
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

    /// Assigns a new title, re-running the keyword validator.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] if no required phrase occurs; the
    /// record is left unchanged.
    pub fn set_title(&mut self, title: impl Into<String>) -> Result<(), ValidationError> {
        let title = title.into();
        validate_title(&title)?;
        self.title = title;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Assigns new content, re-running the minimum-length validator.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] if the content is shorter than
    /// [`CONTENT_MIN_LEN`] characters; the record is left unchanged.
    pub fn set_content(&mut self, content: impl Into<String>) -> Result<(), ValidationError> {
        let content = content.into();
        validate_content(&content)?;
        self.content = content;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Assigns a new summary, re-running the maximum-length validator.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] if the summary exceeds
    /// [`SUMMARY_MAX_LEN`] characters; the record is left unchanged.
    pub fn set_summary(&mut self, summary: impl Into<String>) -> Result<(), ValidationError> {
        let summary = summary.into();
        validate_summary(&summary)?;
        self.summary = summary;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Assigns a new category, parsed case-sensitively from its storage
    /// string.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] if the value is not an accepted
    /// category; the record is left unchanged.
    pub fn set_category(&mut self, category: &str) -> Result<(), ValidationError> {
        self.category = Category::parse(category)?;
        self.updated_at = Utc::now();
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn long_content() -> String {
        "x".repeat(260)
    }

    fn make_post() -> Post {
        let Ok(new) = NewPost::new(
            "Top Secrets Revealed",
            long_content(),
            "A short summary",
            "Fiction",
        ) else {
            panic!("valid draft");
        };
        Post::from_new(PostId::new(1), new, Utc::now())
    }

    #[test]
    fn accepts_valid_fields() {
        let new = NewPost::new("Top Secrets Revealed", long_content(), "x".repeat(100), "Fiction");
        assert!(new.is_ok());
    }

    #[test]
    fn title_accepts_each_phrase() {
        for phrase in TITLE_PHRASES {
            let title = format!("News: {phrase} edition");
            assert!(validate_title(&title).is_ok(), "phrase {phrase:?}");
        }
    }

    #[test]
    fn title_rejects_missing_phrases() {
        let err = validate_title("Daily News");
        let Err(err) = err else {
            panic!("expected rejection");
        };
        assert_eq!(err.field, "title");
    }

    #[test]
    fn title_phrase_match_is_case_sensitive() {
        assert!(validate_title("top 10 tips").is_err());
        assert!(validate_title("Top 10 Tips").is_ok());
    }

    #[test]
    fn content_boundary_at_250_characters() {
        assert!(validate_content(&"a".repeat(249)).is_err());
        assert!(validate_content(&"a".repeat(250)).is_ok());
    }

    #[test]
    fn content_length_counts_characters_not_bytes() {
        // 250 two-byte characters: 500 bytes but exactly at the minimum.
        assert!(validate_content(&"é".repeat(250)).is_ok());
        assert!(validate_content(&"é".repeat(249)).is_err());
    }

    #[test]
    fn summary_boundary_at_250_characters() {
        assert!(validate_summary(&"a".repeat(250)).is_ok());
        assert!(validate_summary(&"a".repeat(251)).is_err());
        assert!(validate_summary("").is_ok());
    }

    #[test]
    fn rejects_unknown_category() {
        let err = NewPost::new("Top Ten", long_content(), "", "Biography");
        let Err(err) = err else {
            panic!("expected rejection");
        };
        assert_eq!(err.field, "category");
    }

    #[test]
    fn reports_first_failing_field() {
        // Both title and content are invalid; title is checked first.
        let err = NewPost::new("Daily News", "short", "", "Fiction");
        let Err(err) = err else {
            panic!("expected rejection");
        };
        assert_eq!(err.field, "title");
    }

    #[test]
    fn setters_revalidate_and_bump_updated_at() {
        let mut post = make_post();
        let before = post.updated_at();

        assert!(post.set_title("You Won't Believe This").is_ok());
        assert!(post.set_category("Non-Fiction").is_ok());
        assert_eq!(post.category(), Category::NonFiction);
        assert!(post.updated_at() >= before);
    }

    #[test]
    fn failed_set_leaves_record_unchanged() {
        let mut post = make_post();
        let updated = post.updated_at();

        assert!(post.set_content("too short").is_err());
        assert_eq!(post.content(), long_content());

        assert!(post.set_summary("s".repeat(300)).is_err());
        assert_eq!(post.summary(), "A short summary");
        assert_eq!(post.updated_at(), updated);
    }
}
