use std::time::Duration;

use anyhow::{bail, Context, Result};

use crate::matching::ranker::DEFAULT_MATCH_THRESHOLD;

const DEFAULT_MAX_CHUNK_SIZE: usize = 4000;
const DEFAULT_EXTRACTION_TIMEOUT_SECS: u64 = 60;

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub anthropic_api_key: String,
    pub port: u16,
    pub rust_log: String,
    /// Minimum match percentage a job needs to be returned to a candidate.
    pub match_threshold: u8,
    /// Resume text longer than this (in characters) is split before extraction.
    pub max_chunk_size: usize,
    pub extraction_timeout: Duration,
    /// How many extraction calls may be in flight for one resume. 1 = sequential.
    pub extraction_concurrency: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let match_threshold: u8 = optional_env("MATCH_THRESHOLD", DEFAULT_MATCH_THRESHOLD)?;
        if match_threshold > 100 {
            bail!("MATCH_THRESHOLD must be between 0 and 100, got {match_threshold}");
        }

        let max_chunk_size: usize = optional_env("MAX_CHUNK_SIZE", DEFAULT_MAX_CHUNK_SIZE)?;
        if max_chunk_size == 0 {
            bail!("MAX_CHUNK_SIZE must be greater than zero");
        }

        let extraction_concurrency: usize = optional_env("EXTRACTION_CONCURRENCY", 1)?;
        if extraction_concurrency == 0 {
            bail!("EXTRACTION_CONCURRENCY must be greater than zero");
        }

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            anthropic_api_key: require_env("ANTHROPIC_API_KEY")?,
            port: optional_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            match_threshold,
            max_chunk_size,
            extraction_timeout: Duration::from_secs(optional_env(
                "EXTRACTION_TIMEOUT_SECS",
                DEFAULT_EXTRACTION_TIMEOUT_SECS,
            )?),
            extraction_concurrency,
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn optional_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value: {raw}")),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optional_env_falls_back_to_default() {
        let value: u16 = optional_env("SKILLMATCH_TEST_UNSET_VARIABLE", 8080).unwrap();
        assert_eq!(value, 8080);
    }

    #[test]
    fn test_optional_env_rejects_garbage() {
        std::env::set_var("SKILLMATCH_TEST_BAD_PORT", "eighty");
        let result: Result<u16> = optional_env("SKILLMATCH_TEST_BAD_PORT", 8080);
        assert!(result.is_err());
    }

    #[test]
    fn test_optional_env_trims_whitespace() {
        std::env::set_var("SKILLMATCH_TEST_THRESHOLD", " 45 ");
        let value: u8 = optional_env("SKILLMATCH_TEST_THRESHOLD", 30).unwrap();
        assert_eq!(value, 45);
    }
}
