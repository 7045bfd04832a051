use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Top-level config file for the assistant
///
/// Credentials live here because token acquisition is outside the core:
/// the user drops a valid bearer token into `config.json` and the tool
/// passes it straight to the Yahoo client.
#[derive(Debug, Clone, Deserialize)]
pub struct AssistantConfig {
    /// Yahoo Fantasy access credentials and league selection
    pub yahoo: YahooConfig,

    /// Directory for the rankings snapshots and the name-mapping cache
    #[serde(default = "default_cache_dir")]
    pub cache_dir: String,

    /// Minimum 0-100 name-similarity score to accept a match
    #[serde(default = "default_match_threshold")]
    pub match_threshold: u8,

    /// Extra rank slack past the worst rostered starter
    #[serde(default)]
    pub rank_slack: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct YahooConfig {
    /// Pre-obtained OAuth bearer token
    pub access_token: String,

    /// League key (e.g. "431.l.12345")
    pub league_key: String,
}

fn default_cache_dir() -> String {
    "cache".to_string()
}

fn default_match_threshold() -> u8 {
    80
}

impl AssistantConfig {
    /// Load configuration from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {path:?}"))?;

        serde_json::from_str(&raw).with_context(|| format!("failed to parse config file {path:?}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let raw = r#"{
            "yahoo": { "access_token": "tok", "league_key": "431.l.12345" },
            "cache_dir": "/tmp/assistant-cache",
            "match_threshold": 90,
            "rank_slack": 3
        }"#;

        let config: AssistantConfig = serde_json::from_str(raw).unwrap();
        assert_eq!(config.yahoo.league_key, "431.l.12345");
        assert_eq!(config.cache_dir, "/tmp/assistant-cache");
        assert_eq!(config.match_threshold, 90);
        assert_eq!(config.rank_slack, 3);
    }

    #[test]
    fn test_defaults_applied_for_optional_fields() {
        let raw = r#"{ "yahoo": { "access_token": "tok", "league_key": "431.l.12345" } }"#;

        let config: AssistantConfig = serde_json::from_str(raw).unwrap();
        assert_eq!(config.cache_dir, "cache");
        assert_eq!(config.match_threshold, 80);
        assert_eq!(config.rank_slack, 0);
    }

    #[test]
    fn test_missing_credentials_is_an_error() {
        let raw = r#"{ "cache_dir": "cache" }"#;
        assert!(serde_json::from_str::<AssistantConfig>(raw).is_err());
    }
}
