use std::env;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use dotenvy::dotenv;

const DEFAULT_API_URL: &str = "http://localhost:5000/api";
const DEFAULT_DATA_DIR: &str = ".property-centre";

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: String,
    pub data_dir: PathBuf,
    pub submit_timeout: Duration,
    /// Keep listings and accounts locally instead of calling the REST API
    pub use_mock_backend: bool,
    pub mock_latency: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            submit_timeout: Duration::from_secs(30),
            use_mock_backend: true,
            mock_latency: Duration::from_millis(1500),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();

        let submit_timeout = match lookup("SUBMIT_TIMEOUT_SECS") {
            Some(raw) => Duration::from_secs(
                raw.parse()
                    .context("SUBMIT_TIMEOUT_SECS must be a whole number of seconds")?,
            ),
            None => defaults.submit_timeout,
        };
        let mock_latency = match lookup("MOCK_LATENCY_MS") {
            Some(raw) => Duration::from_millis(
                raw.parse()
                    .context("MOCK_LATENCY_MS must be a whole number of milliseconds")?,
            ),
            None => defaults.mock_latency,
        };
        let use_mock_backend = match lookup("USE_MOCK_BACKEND") {
            Some(raw) => parse_flag(&raw).context("USE_MOCK_BACKEND must be true or false")?,
            None => defaults.use_mock_backend,
        };

        Ok(Self {
            api_url: lookup("PROPERTY_CENTRE_API_URL").unwrap_or(defaults.api_url),
            data_dir: lookup("PROPERTY_CENTRE_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),
            submit_timeout,
            use_mock_backend,
            mock_latency,
        })
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
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
    fn defaults_when_unset() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.api_url, "http://localhost:5000/api");
        assert_eq!(config.submit_timeout, Duration::from_secs(30));
        assert!(config.use_mock_backend);
    }

    #[test]
    fn overrides_are_parsed() {
        let config = config_from(&[
            ("PROPERTY_CENTRE_API_URL", "https://api.example.com"),
            ("SUBMIT_TIMEOUT_SECS", "5"),
            ("USE_MOCK_BACKEND", "off"),
            ("MOCK_LATENCY_MS", "0"),
        ])
        .unwrap();
        assert_eq!(config.api_url, "https://api.example.com");
        assert_eq!(config.submit_timeout, Duration::from_secs(5));
        assert!(!config.use_mock_backend);
        assert!(config.mock_latency.is_zero());
    }

    #[test]
    fn bad_numbers_are_errors() {
        assert!(config_from(&[("SUBMIT_TIMEOUT_SECS", "soon")]).is_err());
        assert!(config_from(&[("USE_MOCK_BACKEND", "maybe")]).is_err());
    }
}
