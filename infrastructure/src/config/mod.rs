//! Configuration file loading for treasury-council
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `COUNCIL_` environment variables (`COUNCIL_REASONING__BASE_URL`, ...)
//! 2. `--config <path>` specified file
//! 3. Project root: `./council.toml` or `./.council.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/treasury-council/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigIssue, FileAutonomousConfig, FileConfig, FileExecutionConfig, FileLoggingConfig,
    FileOutputConfig, FileOutputFormat, FileReasoningConfig, FileTreasuryConfig,
    FileVotersConfig, Severity,
};
pub use loader::{ConfigLoader, ConfigSources};
