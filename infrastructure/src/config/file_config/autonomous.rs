//! Autonomous engine configuration from TOML (`[autonomous]` section)

use super::ConfigIssue;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileAutonomousConfig {
    /// Milliseconds between timer cycles (default: 30000)
    pub interval_ms: u64,
    /// Start the timer as soon as the engine is built (default: false)
    pub auto_start: bool,
}

impl Default for FileAutonomousConfig {
    fn default() -> Self {
        Self {
            interval_ms: 30_000,
            auto_start: false,
        }
    }
}

impl FileAutonomousConfig {
    pub(super) fn validate(&self) -> Vec<ConfigIssue> {
        if self.interval_ms == 0 {
            vec![ConfigIssue::error(
                "autonomous.interval_ms",
                "must be greater than zero",
            )]
        } else {
            Vec::new()
        }
    }
}
