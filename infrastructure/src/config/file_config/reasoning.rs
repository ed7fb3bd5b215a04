//! Reasoning service configuration from TOML (`[reasoning]` section)

use super::ConfigIssue;
use crate::reasoning::ReasoningEndpoint;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// OpenAI-compatible endpoint shared by all three voters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileReasoningConfig {
    /// Base URL including the API version (default: "https://api.openai.com/v1")
    pub base_url: String,
    /// Environment variable name for the API key (default: "OPENAI_API_KEY").
    pub api_key_env: String,
    /// Direct API key (prefer the env var).
    pub api_key: Option<String>,
    /// Max tokens per response (default: 1024)
    pub max_tokens: u32,
    /// Sampling temperature (default: 0.3)
    pub temperature: f32,
    /// Per-voter call timeout in seconds; 0 waits indefinitely (default: 60)
    pub timeout_secs: u64,
}

impl Default for FileReasoningConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".to_string(),
            api_key_env: "OPENAI_API_KEY".to_string(),
            api_key: None,
            max_tokens: 1024,
            temperature: 0.3,
            timeout_secs: 60,
        }
    }
}

impl FileReasoningConfig {
    /// Direct key first, then the configured environment variable
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .or_else(|| std::env::var(&self.api_key_env).ok())
            .filter(|key| !key.trim().is_empty())
    }

    pub fn voter_timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }

    pub fn endpoint(&self) -> ReasoningEndpoint {
        ReasoningEndpoint::new(self.base_url.clone())
            .with_api_key(self.resolve_api_key())
            .with_sampling(Some(self.max_tokens), Some(self.temperature))
    }

    pub(super) fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        if self.base_url.trim().is_empty() {
            issues.push(ConfigIssue::error("reasoning.base_url", "must not be empty"));
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            issues.push(ConfigIssue::warning(
                "reasoning.temperature",
                format!("{} is outside 0.0-2.0", self.temperature),
            ));
        }
        issues
    }
}
