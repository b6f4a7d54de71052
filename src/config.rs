//! Command-line and environment configuration.
//!
//! Every option can come from a flag or an environment variable.  A `.env`
//! file next to the executable, or in the working directory, is loaded
//! before parsing so the API key does not have to live in shell history.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use reqwest::Url;

use crate::category::Category;

#[derive(Debug, Clone, Parser)]
#[command(name = "livescroll-news", version, about = "Browse NewsAPI headlines in the terminal")]
pub struct Config {
    /// NewsAPI key (https://newsapi.org/register).
    #[arg(long, env = "NEWS_API_KEY", hide_env_values = true)]
    pub api_key: String,

    /// API root URL.
    #[arg(long, env = "NEWS_API_BASE_URL", default_value = "https://newsapi.org/v2/")]
    pub base_url: Url,

    /// Two-letter country code for headlines.
    #[arg(long, env = "NEWS_COUNTRY", default_value = "us")]
    pub country: String,

    /// Category tab to open on start.
    #[arg(long, env = "NEWS_CATEGORY", default_value = "general")]
    pub category: Category,

    /// Milliseconds the search box must be idle before a search is sent.
    #[arg(long, env = "NEWS_DEBOUNCE_MS", default_value_t = 1000)]
    pub debounce_ms: u64,

    /// Per-request timeout in seconds.
    #[arg(long, env = "NEWS_TIMEOUT_SECS", default_value_t = 10)]
    pub timeout_secs: u64,

    /// Write logs to this file.  Without it nothing is logged, since the
    /// terminal is in use by the UI.
    #[arg(long, env = "NEWS_LOG_FILE")]
    pub log_file: Option<PathBuf>,
}

impl Config {
    /// Load `.env` files, then parse arguments and environment.
    pub fn load() -> Self {
        if let Some(dir) = std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
        {
            let env_path = dir.join(".env");
            if env_path.exists() {
                dotenvy::from_path(&env_path).ok();
            }
        }
        dotenvy::dotenv().ok();

        Self::parse()
    }

    pub fn quiet_period(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
