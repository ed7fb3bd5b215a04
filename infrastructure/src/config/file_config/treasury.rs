//! Treasury API configuration from TOML (`[treasury]` section)

use crate::treasury::{TreasuryClient, TreasuryHttpError};
use serde::{Deserialize, Serialize};

/// Without a `base_url` the engine runs on a static snapshot and dry-run
/// execution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileTreasuryConfig {
    /// Base URL of the treasury / trading API
    pub base_url: Option<String>,
    /// Environment variable name for the API key (default: "TREASURY_API_KEY").
    pub api_key_env: String,
    /// Direct API key (prefer the env var).
    pub api_key: Option<String>,
}

impl Default for FileTreasuryConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            api_key_env: "TREASURY_API_KEY".to_string(),
            api_key: None,
        }
    }
}

impl FileTreasuryConfig {
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .or_else(|| std::env::var(&self.api_key_env).ok())
            .filter(|key| !key.trim().is_empty())
    }

    /// Client for the configured API, if any
    pub fn client(&self) -> Option<Result<TreasuryClient, TreasuryHttpError>> {
        let base_url = self.base_url.as_deref().map(str::trim).filter(|u| !u.is_empty())?;
        Some(TreasuryClient::new(base_url, self.resolve_api_key()))
    }
}
