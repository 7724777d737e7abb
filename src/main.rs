//! blog-store demo entry point.
//!
//! Connects to PostgreSQL, ensures the schema, and runs a short
//! data-entry session exercising the validation rules.

use tracing_subscriber::EnvFilter;

use blog_store::config::StoreConfig;
use blog_store::domain::{NewAuthor, NewPost};
use blog_store::error::StoreError;
use blog_store::persistence::PostgresStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration and connect
    let config = StoreConfig::from_env();
    tracing::info!(url = %config.database_url, "connecting to database");
    let store = PostgresStore::connect(&config).await?;
    store.ensure_schema().await?;

    // Create an author, tolerating reruns against the same database
    let new = NewAuthor::new("Jane Doe", "5551234567")?;
    match store.create_author(new).await {
        Ok(author) => tracing::info!(id = %author.id(), "created author"),
        Err(StoreError::DuplicateAuthorName(name)) => {
            tracing::info!(name, "author already present");
        }
        Err(e) => return Err(e.into()),
    }

    // A second author with the same name must be rejected
    let dup = NewAuthor::new("Jane Doe", "0001112222")?;
    match store.create_author(dup).await {
        Err(StoreError::DuplicateAuthorName(name)) => {
            tracing::info!(name, "duplicate rejected as expected");
        }
        Ok(author) => anyhow::bail!("duplicate author {} was accepted", author.id()),
        Err(e) => return Err(e.into()),
    }

    // Create a post that satisfies every content rule
    let content = "Nobody expects how far a single validated record can go. ".repeat(5);
    let new = NewPost::new(
        "Top Secrets of Schema Design",
        content,
        "A post that exists to exercise the validators.",
        "Fiction",
    )?;
    let post = store.create_post(new).await?;
    tracing::info!(id = %post.id(), title = post.title(), "created post");

    // Invalid input surfaces as a clean validation error
    if let Err(e) = NewPost::new("Daily News", "too short", "", "Fiction") {
        tracing::info!(error = %e, "rejected invalid post");
    }

    Ok(())
}
