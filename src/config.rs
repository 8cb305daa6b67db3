//! Advisor configuration
//!
//! File-based configuration for the advisory service with environment
//! variable overrides. The page only ever talks to one provider, so this
//! stays a single flat section.

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Environment variable holding the API key; takes precedence over the file
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";
/// Environment variable overriding the model name
pub const MODEL_ENV: &str = "AIKYAM_ADVISOR_MODEL";

/// Configuration for the advisory service client
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AdvisorConfig {
    /// API key; usually supplied via `GEMINI_API_KEY` rather than the file
    pub api_key: Option<String>,
    /// Service base URL
    pub base_url: String,
    /// Model name
    pub model: String,
    /// Per-request timeout so a hung call cannot leave a session waiting forever
    pub timeout_seconds: u64,
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        AdvisorConfig {
            api_key: None,
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            model: "gemini-2.5-flash".to_string(),
            timeout_seconds: 30,
        }
    }
}

impl AdvisorConfig {
    /// Load from a TOML file and apply environment overrides
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        let mut config: AdvisorConfig = toml::from_str(&raw)
            .with_context(|| format!("failed to parse config file: {}", path.display()))?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Defaults plus environment overrides, for pages shipped without a config file
    pub fn from_env() -> Self {
        let mut config = AdvisorConfig::default();
        config.apply_env_overrides();
        config
    }

    /// Apply `GEMINI_API_KEY` and `AIKYAM_ADVISOR_MODEL` if set
    pub fn apply_env_overrides(&mut self) {
        if let Ok(key) = std::env::var(API_KEY_ENV) {
            if !key.is_empty() {
                debug!("using API key from {}", API_KEY_ENV);
                self.api_key = Some(key);
            }
        }
        if let Ok(model) = std::env::var(MODEL_ENV) {
            if !model.is_empty() {
                self.model = model;
            }
        }
    }

    /// Reject configurations the client cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.base_url.is_empty() {
            return Err(anyhow!("advisor base_url must not be empty"));
        }
        if self.model.is_empty() {
            return Err(anyhow!("advisor model must not be empty"));
        }
        if self.timeout_seconds == 0 {
            return Err(anyhow!("advisor timeout_seconds must be at least 1"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_from_toml_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("advisor.toml");
        let mut file = fs::File::create(&path).unwrap();
        writeln!(
            file,
            r#"api_key = "test-key"
base_url = "https://advisor.example.com"
model = "test-model"
timeout_seconds = 10
"#
        )
        .unwrap();

        let config = AdvisorConfig::load(&path).unwrap();
        assert_eq!(config.base_url, "https://advisor.example.com");
        assert_eq!(config.model, "test-model");
        assert_eq!(config.timeout_seconds, 10);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let result = AdvisorConfig::load(dir.path().join("nope.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let config = AdvisorConfig {
            timeout_seconds: 0,
            ..AdvisorConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
