//! Configuration management for Pocket Agent.
//!
//! Configuration can be set via environment variables:
//! - `LLM_MODEL_ID` - Required. Model identifier sent to the provider.
//! - `LLM_API_KEY` - Required. API credential for the provider.
//! - `LLM_BASE_URL` - Required. Base URL of the OpenAI-compatible endpoint.
//! - `LLM_TIMEOUT` - Optional. Request timeout in seconds. Defaults to `60`.
//! - `MAX_STEPS` - Optional. Maximum ReAct loop steps. Defaults to `5`.
//!
//! Components never read the environment directly; the resolved [`Config`]
//! is built once at startup and injected.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),

    #[error("Missing required setting: {0}")]
    MissingSetting(String),

    #[error("Failed to build HTTP client: {0}")]
    HttpClient(String),
}

/// Agent configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Model identifier (provider format, e.g. `gpt-4o-mini`)
    pub model: String,

    /// API credential for the chat-completions endpoint
    pub api_key: String,

    /// Base URL of the OpenAI-compatible endpoint (no trailing slash)
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// Maximum iterations for the ReAct loop
    pub max_steps: usize,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingEnvVar` if any of `LLM_MODEL_ID`,
    /// `LLM_API_KEY`, or `LLM_BASE_URL` is not set.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve configuration through an injectable variable lookup.
    ///
    /// `from_env` routes through this with `std::env::var`; tests supply a
    /// map-backed lookup so resolution is exercised without mutating process
    /// environment.
    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let require =
            |key: &str| get(key).ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()));

        let model = require("LLM_MODEL_ID")?;
        let api_key = require("LLM_API_KEY")?;
        let base_url = require("LLM_BASE_URL")?;

        let timeout_secs = get("LLM_TIMEOUT")
            .unwrap_or_else(|| "60".to_string())
            .parse()
            .map_err(|e| ConfigError::InvalidValue("LLM_TIMEOUT".to_string(), format!("{}", e)))?;

        let max_steps = get("MAX_STEPS")
            .unwrap_or_else(|| "5".to_string())
            .parse()
            .map_err(|e| ConfigError::InvalidValue("MAX_STEPS".to_string(), format!("{}", e)))?;

        Ok(Self {
            model,
            api_key,
            base_url,
            timeout_secs,
            max_steps,
        })
    }

    /// Create a config with custom values (useful for testing).
    pub fn new(model: String, api_key: String, base_url: String) -> Self {
        Self {
            model,
            api_key,
            base_url,
            timeout_secs: 60,
            max_steps: 5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_of(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn from_lookup_resolves_all_values() {
        let config = Config::from_lookup(lookup_of(&[
            ("LLM_MODEL_ID", "gpt-4o-mini"),
            ("LLM_API_KEY", "sk-test"),
            ("LLM_BASE_URL", "https://api.openai.com/v1"),
            ("LLM_TIMEOUT", "30"),
            ("MAX_STEPS", "8"),
        ]))
        .unwrap();

        assert_eq!(config.model, "gpt-4o-mini");
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.max_steps, 8);
    }

    #[test]
    fn from_lookup_defaults_optional_values() {
        let config = Config::from_lookup(lookup_of(&[
            ("LLM_MODEL_ID", "m"),
            ("LLM_API_KEY", "k"),
            ("LLM_BASE_URL", "https://x"),
        ]))
        .unwrap();

        assert_eq!(config.timeout_secs, 60);
        assert_eq!(config.max_steps, 5);
    }

    #[test]
    fn from_lookup_reports_missing_required_variable() {
        let result = Config::from_lookup(lookup_of(&[
            ("LLM_MODEL_ID", "m"),
            ("LLM_BASE_URL", "https://x"),
        ]));

        match result {
            Err(ConfigError::MissingEnvVar(name)) => assert_eq!(name, "LLM_API_KEY"),
            other => panic!("expected MissingEnvVar, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn from_lookup_rejects_non_numeric_timeout() {
        let result = Config::from_lookup(lookup_of(&[
            ("LLM_MODEL_ID", "m"),
            ("LLM_API_KEY", "k"),
            ("LLM_BASE_URL", "https://x"),
            ("LLM_TIMEOUT", "soon"),
        ]));

        match result {
            Err(ConfigError::InvalidValue(name, _)) => assert_eq!(name, "LLM_TIMEOUT"),
            other => panic!("expected InvalidValue, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn new_fills_defaults() {
        let config = Config::new(
            "gpt-4o-mini".to_string(),
            "sk-test".to_string(),
            "https://api.openai.com/v1".to_string(),
        );
        assert_eq!(config.timeout_secs, 60);
        assert_eq!(config.max_steps, 5);
    }
}
