//! Configuration for the Gemini provider

use serde::{Deserialize, Serialize};
use std::env;

/// Environment variable holding the API key
pub const ENV_API_KEY: &str = "API_KEY";
/// Fallback variable, checked when `API_KEY` is unset
pub const ENV_GEMINI_API_KEY: &str = "GEMINI_API_KEY";

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash-preview-tts";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Configuration for the Gemini provider
///
/// The API key is only ever taken from the environment (or set in code); it is
/// never read from or written to configuration files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    #[serde(skip)]
    pub api_key: Option<String>,

    /// Speech model name
    #[serde(default = "default_model")]
    pub model: String,

    /// API base URL without the `/v1beta` suffix
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Optional request timeout in seconds; none by default
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
            base_url: default_base_url(),
            timeout_secs: None,
        }
    }
}

impl GeminiConfig {
    /// Default configuration with the API key taken from the environment
    pub fn from_env() -> Self {
        Self::default().with_env_api_key()
    }

    /// Fill `api_key` from `API_KEY` or `GEMINI_API_KEY` if not already set
    pub fn with_env_api_key(mut self) -> Self {
        if self.api_key.is_none() {
            self.api_key = env::var(ENV_API_KEY)
                .or_else(|_| env::var(ENV_GEMINI_API_KEY))
                .ok()
                .filter(|key| !key.trim().is_empty());
        }
        self
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = Some(timeout_secs);
        self
    }

    pub(crate) fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GeminiConfig::default();
        assert_eq!(config.model, "gemini-2.5-flash-preview-tts");
        assert_eq!(config.base_url, "https://generativelanguage.googleapis.com");
        assert!(config.api_key.is_none());
        assert!(config.timeout_secs.is_none());
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let config = GeminiConfig::default().with_base_url("http://127.0.0.1:9000/");
        assert_eq!(
            config.endpoint(),
            "http://127.0.0.1:9000/v1beta/models/gemini-2.5-flash-preview-tts:generateContent"
        );
    }

    #[test]
    fn test_api_key_never_serialized() {
        let config = GeminiConfig::default().with_api_key("secret");
        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("secret"));

        let deserialized: GeminiConfig = serde_json::from_str(&json).unwrap();
        assert!(deserialized.api_key.is_none());
        assert_eq!(deserialized.model, config.model);
    }

    #[test]
    fn test_explicit_key_wins_over_environment() {
        let config = GeminiConfig::default()
            .with_api_key("explicit")
            .with_env_api_key();
        assert_eq!(config.api_key.as_deref(), Some("explicit"));
    }
}
