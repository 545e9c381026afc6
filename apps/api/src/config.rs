use std::time::Duration;

use anyhow::{bail, Context, Result};

use crate::interview::prompts::DEFAULT_QUESTION_COUNT;
use crate::interview::store::DEFAULT_SESSION_IDLE_TTL;

/// Application configuration loaded from environment variables.
///
/// The API key is optional at startup: a missing key surfaces as an upstream
/// failure on the first model call instead of refusing to boot.
#[derive(Debug, Clone)]
pub struct Config {
    pub anthropic_api_key: Option<String>,
    pub port: u16,
    pub rust_log: String,
    pub question_count: usize,
    /// Sessions untouched for this long are evicted from memory.
    pub session_idle_ttl: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            anthropic_api_key: optional_env("ANTHROPIC_API_KEY"),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            question_count: parse_question_count(
                std::env::var("INTERVIEW_QUESTION_COUNT").ok().as_deref(),
            )?,
            session_idle_ttl: parse_idle_ttl(
                std::env::var("SESSION_IDLE_TTL_SECS").ok().as_deref(),
            )?,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            anthropic_api_key: None,
            port: 8080,
            rust_log: "info".to_string(),
            question_count: DEFAULT_QUESTION_COUNT,
            session_idle_ttl: DEFAULT_SESSION_IDLE_TTL,
        }
    }
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_question_count(raw: Option<&str>) -> Result<usize> {
    let Some(raw) = raw else {
        return Ok(DEFAULT_QUESTION_COUNT);
    };
    let count = raw
        .trim()
        .parse::<usize>()
        .context("INTERVIEW_QUESTION_COUNT must be a positive integer")?;
    if count == 0 {
        bail!("INTERVIEW_QUESTION_COUNT must be at least 1");
    }
    Ok(count)
}

fn parse_idle_ttl(raw: Option<&str>) -> Result<Duration> {
    let Some(raw) = raw else {
        return Ok(DEFAULT_SESSION_IDLE_TTL);
    };
    let secs = raw
        .trim()
        .parse::<u64>()
        .context("SESSION_IDLE_TTL_SECS must be a whole number of seconds")?;
    if secs == 0 {
        bail!("SESSION_IDLE_TTL_SECS must be at least 1");
    }
    Ok(Duration::from_secs(secs))
}
