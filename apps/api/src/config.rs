use anyhow::{bail, Context, Result};

use crate::matching::routing::{DEFAULT_MATCH_THRESHOLD, MAX_MATCH_THRESHOLD};

/// Application configuration loaded from environment variables.
/// Fails at startup if a value is present but malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Default routing threshold when a request does not carry its own.
    pub match_threshold: u32,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            match_threshold: parse_threshold(std::env::var("MATCH_THRESHOLD").ok().as_deref())?,
        })
    }
}

fn parse_threshold(raw: Option<&str>) -> Result<u32> {
    let Some(raw) = raw else {
        return Ok(DEFAULT_MATCH_THRESHOLD);
    };
    let threshold = raw
        .trim()
        .parse::<u32>()
        .with_context(|| format!("MATCH_THRESHOLD must be an integer, got '{raw}'"))?;
    if threshold > MAX_MATCH_THRESHOLD {
        bail!("MATCH_THRESHOLD must be between 0 and {MAX_MATCH_THRESHOLD}, got {threshold}");
    }
    Ok(threshold)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_defaults_to_75() {
        assert_eq!(parse_threshold(None).unwrap(), 75);
    }

    #[test]
    fn test_threshold_parses_value() {
        assert_eq!(parse_threshold(Some(" 60 ")).unwrap(), 60);
    }

    #[test]
    fn test_threshold_rejects_garbage_and_out_of_range() {
        assert!(parse_threshold(Some("high")).is_err());
        assert!(parse_threshold(Some("-1")).is_err());
        assert!(parse_threshold(Some("101")).is_err());
    }
}
