use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub port: u16,
    pub rust_log: String,
    pub tesseract_cmd: String,
    pub tesseract_lang: String,
    pub extraction_timeout: Duration,
    pub max_upload_bytes: usize,
    /// When false, extractor failures are returned to the caller instead of
    /// degrading to placeholder results.
    pub degrade_on_extraction_failure: bool,
    /// Replaces the built-in skill vocabulary when set.
    pub skill_vocabulary: Option<Vec<String>>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            api_key: require_env("API_KEY")?,
            port: env_or("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            tesseract_cmd: std::env::var("TESSERACT_CMD")
                .unwrap_or_else(|_| "tesseract".to_string()),
            tesseract_lang: std::env::var("TESSERACT_LANG").unwrap_or_else(|_| "eng".to_string()),
            extraction_timeout: Duration::from_secs(env_or("EXTRACTION_TIMEOUT_SECS", 30)?),
            max_upload_bytes: env_or("MAX_UPLOAD_BYTES", 10 * 1024 * 1024)?,
            degrade_on_extraction_failure: env_or("DEGRADE_ON_EXTRACTION_FAILURE", true)?,
            skill_vocabulary: std::env::var("SKILL_VOCABULARY")
                .ok()
                .map(|raw| parse_list(&raw))
                .filter(|skills| !skills.is_empty()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn env_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} has an invalid value: '{raw}'")),
        Err(_) => Ok(default),
    }
}

/// Splits a comma-separated list, trimming entries and dropping blanks.
fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
impl Config {
    pub fn for_tests() -> Self {
        Config {
            api_key: "test-key".to_string(),
            port: 0,
            rust_log: "debug".to_string(),
            tesseract_cmd: "tesseract".to_string(),
            tesseract_lang: "eng".to_string(),
            extraction_timeout: Duration::from_secs(5),
            max_upload_bytes: 1024 * 1024,
            degrade_on_extraction_failure: true,
            skill_vocabulary: None,
        }
    }
}
