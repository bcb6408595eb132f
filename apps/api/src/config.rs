use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::generation::batch::DEFAULT_BATCH_DELAY;
use crate::llm_client::DEFAULT_BASE_URL;

pub const DEFAULT_SCHOOL_NAME: &str = "○○초등학교";

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub openai_api_key: String,
    pub openai_base_url: String,
    pub school_name: String,
    /// Pause between consecutive calls of a batch run.
    pub batch_delay: Duration,
    /// Optional JSON file replacing the built-in guidance tables.
    pub prompt_tables_path: Option<PathBuf>,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let openai_api_key = lookup("OPENAI_API_KEY")
            .filter(|v| !v.trim().is_empty())
            .context("Required environment variable 'OPENAI_API_KEY' is not set")?;

        let batch_delay = match lookup("BATCH_DELAY_MS") {
            Some(raw) => Duration::from_millis(
                raw.parse::<u64>()
                    .context("BATCH_DELAY_MS must be a whole number of milliseconds")?,
            ),
            None => DEFAULT_BATCH_DELAY,
        };

        Ok(Config {
            openai_api_key,
            openai_base_url: lookup("OPENAI_BASE_URL")
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            school_name: lookup("SCHOOL_NAME")
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_SCHOOL_NAME.to_string()),
            batch_delay,
            prompt_tables_path: lookup("PROMPT_TABLES_PATH").map(PathBuf::from),
            port: lookup("PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_apply_when_only_key_is_set() {
        let config = config_from(&[("OPENAI_API_KEY", "sk-test")]).unwrap();
        assert_eq!(config.openai_base_url, "https://api.openai.com/v1");
        assert_eq!(config.school_name, "○○초등학교");
        assert_eq!(config.batch_delay, Duration::from_millis(500));
        assert_eq!(config.port, 8080);
        assert_eq!(config.rust_log, "info");
        assert!(config.prompt_tables_path.is_none());
    }

    #[test]
    fn test_missing_api_key_fails() {
        let err = config_from(&[("PORT", "9000")]).unwrap_err();
        assert!(err.to_string().contains("OPENAI_API_KEY"));
        assert!(config_from(&[("OPENAI_API_KEY", "  ")]).is_err());
    }

    #[test]
    fn test_overrides_are_read() {
        let config = config_from(&[
            ("OPENAI_API_KEY", "sk-test"),
            ("SCHOOL_NAME", "햇빛중학교"),
            ("BATCH_DELAY_MS", "0"),
            ("PORT", "3000"),
            ("PROMPT_TABLES_PATH", "/etc/notice/tables.json"),
        ])
        .unwrap();
        assert_eq!(config.school_name, "햇빛중학교");
        assert_eq!(config.batch_delay, Duration::ZERO);
        assert_eq!(config.port, 3000);
        assert_eq!(
            config.prompt_tables_path,
            Some(PathBuf::from("/etc/notice/tables.json"))
        );
    }

    #[test]
    fn test_invalid_numbers_are_rejected() {
        assert!(config_from(&[("OPENAI_API_KEY", "k"), ("PORT", "http")]).is_err());
        assert!(config_from(&[("OPENAI_API_KEY", "k"), ("BATCH_DELAY_MS", "-5")]).is_err());
    }
}
