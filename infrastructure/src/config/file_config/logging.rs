//! Logging configuration from TOML (`[logging]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// JSONL audit trail; disabled when unset
    pub audit_log: Option<PathBuf>,
    /// Directory for daily-rotated diagnostic logs; disabled when unset
    pub directory: Option<PathBuf>,
}
