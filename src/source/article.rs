//! The article type shared by every news source.
//!
//! `Article` mirrors one element of the NewsAPI `articles` array.  The
//! field names are snake_case in Rust and renamed to the upstream camelCase
//! on the wire.
//!
//! ## For contributors
//!
//! Only `title`, `url` and `source` are required.  Everything else is an
//! `Option` with `#[serde(default)]`, so a missing key and an explicit
//! `null` both deserialize to `None`.  Keep it that way: one sparse article
//! must never fail a whole page.

use serde::Deserialize;

/// Publisher of an article.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ArticleSource {
    /// Upstream source identifier.  NewsAPI sends `null` for many smaller
    /// publishers; that becomes an empty string.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub id: String,

    /// Display name, e.g. "Reuters".
    #[serde(default)]
    pub name: Option<String>,
}

/// A single news story, normalised from the upstream API.
///
/// Articles carry no identity beyond structural equality.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub title: String,

    #[serde(default)]
    pub author: Option<String>,

    /// Short summary text.
    #[serde(default)]
    pub description: Option<String>,

    /// Body text.  NewsAPI truncates this to ~200 characters.
    #[serde(default)]
    pub content: Option<String>,

    /// Publication timestamp exactly as the API sent it.  Not parsed here;
    /// the UI decides how to display it.
    #[serde(default)]
    pub published_at: Option<String>,

    #[serde(default)]
    pub url_to_image: Option<String>,

    pub source: ArticleSource,

    /// Canonical link to the full story.
    pub url: String,
}

impl Article {
    /// Name to show next to the headline: the publisher's display name,
    /// then its id, then a placeholder.
    pub fn source_label(&self) -> &str {
        match self.source.name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ if !self.source.id.is_empty() => &self.source.id,
            _ => "unknown source",
        }
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
