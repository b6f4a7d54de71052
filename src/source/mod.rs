//! Remote news source abstraction.
//!
//! This module defines the [`NewsSource`] trait, the [`Article`] value type
//! and the [`Resource`] outcome wrapper.  The concrete NewsAPI client lives
//! in [`newsapi`].
//!
//! ## For contributors: adding a new source
//!
//! 1. Create a new file in this directory (e.g. `guardian.rs`).
//! 2. Define a struct holding its HTTP client and credentials, and
//!    implement [`NewsSource`] for it.
//! 3. Add `mod guardian;` below and re-export the struct.
//! 4. Construct it in `main.rs` in place of (or next to) [`NewsApiClient`].
//!
//! The feed controller and the UI are source-agnostic.

mod article;
mod newsapi;
mod resource;

pub use article::Article;
#[cfg(test)]
pub use article::ArticleSource;
pub use newsapi::NewsApiClient;
pub use resource::{FailureKind, Resource};

use async_trait::async_trait;

use crate::category::Category;

/// Read-only queries the feed controller issues.
///
/// Implementations never return an error type: every failure is folded
/// into [`Resource::Failure`] with a message that names the cause.  The
/// controller calls these from spawned tasks, so implementations must be
/// `Send + Sync`.
#[async_trait]
pub trait NewsSource: Send + Sync {
    /// Top headlines for one category.
    async fn fetch_by_category(&self, category: Category) -> Resource<Vec<Article>>;

    /// Free-text search across all categories.  Callers must not pass an
    /// empty query.
    async fn search_by_keyword(&self, query: &str) -> Resource<Vec<Article>>;
}
