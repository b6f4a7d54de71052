//! NewsAPI (`https://newsapi.org/v2/`) source implementation.
//!
//! Two endpoints are used:
//!
//! * `top-headlines?category=..&country=..&apiKey=..` for the category tabs
//! * `everything?q=..&apiKey=..` for free-text search
//!
//! Both answer with the same envelope: `{status, totalResults, articles}`.
//! On a non-2xx status the body is `{status: "error", code, message}`.
//!
//! Internally failures are a [`FetchError`] so `?` works through the
//! request/decode steps; at the trait boundary they collapse into
//! [`Resource::Failure`].

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{RequestBuilder, StatusCode, Url};
use serde::Deserialize;

use super::{Article, FailureKind, NewsSource, Resource};
use crate::category::Category;

/// Failure while talking to NewsAPI.
#[derive(Debug, thiserror::Error)]
enum FetchError {
    #[error("network unavailable: {0}")]
    NetworkUnavailable(#[source] reqwest::Error),

    #[error("HTTP {status}: {message}")]
    UpstreamHttp { status: u16, message: String },

    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("request failed: {0}")]
    Request(#[source] reqwest::Error),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        // The request URL carries the API key; keep it out of messages.
        let err = err.without_url();
        if err.is_connect() || err.is_timeout() {
            FetchError::NetworkUnavailable(err)
        } else if let Some(status) = err.status() {
            FetchError::UpstreamHttp {
                status: status.as_u16(),
                message: err.to_string(),
            }
        } else {
            FetchError::Request(err)
        }
    }
}

impl FetchError {
    fn kind(&self) -> FailureKind {
        match self {
            FetchError::NetworkUnavailable(_) | FetchError::Request(_) => FailureKind::Network,
            FetchError::UpstreamHttp { status, .. } => FailureKind::UpstreamHttp(*status),
            FetchError::Decode(_) => FailureKind::Decode,
        }
    }
}

// ---------------------------------------------------------------------------
// Wire envelopes
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ArticlesEnvelope {
    status: String,
    #[serde(default)]
    total_results: Option<u64>,
    #[serde(default)]
    articles: Vec<serde_json::Value>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// Decode a successful page.  Articles that lack a required field are
/// skipped (and logged) rather than failing the whole page.
fn decode_page(body: &[u8]) -> Result<Vec<Article>, FetchError> {
    let envelope: ArticlesEnvelope = serde_json::from_slice(body)?;

    if envelope.status != "ok" {
        return Err(FetchError::UpstreamHttp {
            status: StatusCode::OK.as_u16(),
            message: envelope
                .message
                .unwrap_or_else(|| format!("status `{}`", envelope.status)),
        });
    }

    let articles: Vec<Article> = envelope
        .articles
        .into_iter()
        .filter_map(|raw| match serde_json::from_value::<Article>(raw) {
            Ok(article) => Some(article),
            Err(e) => {
                tracing::warn!(error = %e, "skipping malformed article");
                None
            }
        })
        .collect();

    tracing::debug!(
        total_results = ?envelope.total_results,
        returned = articles.len(),
        "decoded article page"
    );
    Ok(articles)
}

/// Best-effort description of a non-2xx response.
fn upstream_message(status: StatusCode, body: &[u8]) -> String {
    match serde_json::from_slice::<ErrorEnvelope>(body) {
        Ok(ErrorEnvelope {
            message: Some(message),
            code,
        }) => match code {
            Some(code) => format!("{message} ({code})"),
            None => message,
        },
        _ => status
            .canonical_reason()
            .unwrap_or("unknown error")
            .to_string(),
    }
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// HTTP client for NewsAPI.
pub struct NewsApiClient {
    http: reqwest::Client,
    headlines_url: Url,
    search_url: Url,
    api_key: String,
    country: String,
}

impl NewsApiClient {
    /// Build a client.
    ///
    /// # Arguments
    ///
    /// * `base_url`: API root, e.g. `https://newsapi.org/v2/`.  A missing
    ///   trailing slash is added so the endpoint names join underneath it.
    /// * `api_key`: sent as the `apiKey` query parameter on every call.
    /// * `country`: two-letter country code for headline queries.
    /// * `timeout`: whole-request timeout.
    pub fn new(
        mut base_url: Url,
        api_key: impl Into<String>,
        country: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let http = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .context("building HTTP client")?;

        Ok(Self {
            http,
            headlines_url: base_url
                .join("top-headlines")
                .context("joining top-headlines endpoint")?,
            search_url: base_url
                .join("everything")
                .context("joining everything endpoint")?,
            api_key: api_key.into(),
            country: country.into(),
        })
    }

    fn headlines(&self, category: Category) -> RequestBuilder {
        self.http.get(self.headlines_url.clone()).query(&[
            ("category", category.api_value()),
            ("country", self.country.as_str()),
            ("apiKey", self.api_key.as_str()),
        ])
    }

    fn search(&self, query: &str) -> RequestBuilder {
        self.http
            .get(self.search_url.clone())
            .query(&[("q", query), ("apiKey", self.api_key.as_str())])
    }

    async fn get_articles(&self, request: RequestBuilder) -> Result<Vec<Article>, FetchError> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            return Err(FetchError::UpstreamHttp {
                status: status.as_u16(),
                message: upstream_message(status, &body),
            });
        }
        decode_page(&body)
    }
}

fn into_resource(result: Result<Vec<Article>, FetchError>, context: &str) -> Resource<Vec<Article>> {
    match result {
        Ok(articles) => Resource::Success(articles),
        Err(err) => {
            tracing::debug!(error = ?err, "{context}");
            Resource::failure(err.kind(), format!("{context}: {err}"))
        }
    }
}

#[async_trait]
impl NewsSource for NewsApiClient {
    async fn fetch_by_category(&self, category: Category) -> Resource<Vec<Article>> {
        tracing::info!(category = category.api_value(), "requesting top headlines");
        let result = self.get_articles(self.headlines(category)).await;
        into_resource(result, "Failed to fetch news")
    }

    async fn search_by_keyword(&self, query: &str) -> Resource<Vec<Article>> {
        tracing::info!(query, "searching articles");
        let result = self.get_articles(self.search(query)).await;
        into_resource(result, "Failed to search news")
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
