use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;

/// Application configuration loaded from environment variables.
///
/// Constructed once at startup and passed down; nothing else reads the
/// environment. Missing Telegram credentials abort the run before any
/// fetch happens.
#[derive(Debug, Clone)]
pub struct Config {
    pub telegram_token: String,
    pub telegram_chat_id: String,
    pub corpus_path: String,
    pub retention_days: i64,
    pub notify_cap: usize,
    pub keywords: Vec<String>,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            telegram_token: env::var("TELEGRAM_TOKEN")
                .context("TELEGRAM_TOKEN must be set")?,
            telegram_chat_id: env::var("CHAT_ID")
                .context("CHAT_ID must be set")?,
            corpus_path: env::var("SAVED_JOBS_FILE")
                .unwrap_or_else(|_| "saved_jobs.json".to_string()),
            retention_days: env::var("RETENTION_DAYS")
                .unwrap_or_else(|_| "7".to_string())
                .parse()
                .context("RETENTION_DAYS must be a valid number")?,
            notify_cap: env::var("NOTIFY_CAP")
                .unwrap_or_else(|_| "9".to_string())
                .parse()
                .context("NOTIFY_CAP must be a valid number")?,
            keywords: env::var("JOB_KEYWORDS")
                .map(|raw| parse_keywords(&raw))
                .unwrap_or_default(),
        })
    }
}

fn parse_keywords(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|keyword| keyword.trim().to_string())
        .filter(|keyword| !keyword.is_empty())
        .collect()
}
