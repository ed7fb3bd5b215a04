//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! Conversions into application types live next to each section.

mod autonomous;
mod execution;
mod logging;
mod output;
mod reasoning;
mod treasury;
mod voters;

pub use autonomous::FileAutonomousConfig;
pub use execution::FileExecutionConfig;
pub use logging::FileLoggingConfig;
pub use output::{FileOutputConfig, FileOutputFormat};
pub use reasoning::FileReasoningConfig;
pub use treasury::FileTreasuryConfig;
pub use voters::FileVotersConfig;

use council_application::EngineParams;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// How serious a configuration issue is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Error,
}

/// One problem found by [`FileConfig::validate`]
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigIssue {
    pub severity: Severity,
    /// Dotted key, e.g. `execution.buyback_fraction`
    pub field: String,
    pub message: String,
}

impl ConfigIssue {
    pub fn warning(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn error(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Reasoning service endpoint
    pub reasoning: FileReasoningConfig,
    /// Model per voter
    pub voters: FileVotersConfig,
    /// Autonomous engine timing
    pub autonomous: FileAutonomousConfig,
    /// Treasury API endpoint
    pub treasury: FileTreasuryConfig,
    /// Order sizing and dry-run switch
    pub execution: FileExecutionConfig,
    /// Audit trail and diagnostic log files
    pub logging: FileLoggingConfig,
    /// Output settings
    pub output: FileOutputConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        issues.extend(self.reasoning.validate());
        issues.extend(self.voters.validate());
        issues.extend(self.autonomous.validate());
        issues.extend(self.execution.validate());
        issues
    }

    /// True when any issue is severe enough to refuse to start
    pub fn has_errors(issues: &[ConfigIssue]) -> bool {
        issues.iter().any(|i| i.severity == Severity::Error)
    }

    /// Timing parameters for the use cases
    pub fn engine_params(&self) -> EngineParams {
        EngineParams::default()
            .with_cycle_interval(Duration::from_millis(self.autonomous.interval_ms))
            .with_voter_timeout(self.reasoning.voter_timeout())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[reasoning]
base_url = "http://localhost:11434/v1"
timeout_secs = 20

[voters]
risk = "llama3"
ethics = "mistral"

[autonomous]
interval_ms = 60000
auto_start = true

[treasury]
base_url = "http://localhost:8080"

[execution]
buyback_fraction = 0.2
dry_run = true

[logging]
audit_log = "audit/council.jsonl"

[output]
format = "json"
color = false
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.reasoning.base_url, "http://localhost:11434/v1");
        assert_eq!(config.voters.risk, "llama3");
        assert_eq!(config.voters.structure, FileVotersConfig::default().structure);
        assert!(config.autonomous.auto_start);
        assert_eq!(
            config.treasury.base_url.as_deref(),
            Some("http://localhost:8080")
        );
        assert!(config.execution.dry_run);
        assert_eq!(config.execution.sell_percent, 5.0);
        assert_eq!(config.output.format, Some(FileOutputFormat::Json));
        assert!(!config.output.color);

        let params = config.engine_params();
        assert_eq!(params.cycle_interval, Duration::from_secs(60));
        assert_eq!(params.voter_timeout, Some(Duration::from_secs(20)));
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = FileConfig::default();
        assert!(config.validate().is_empty());
        assert_eq!(config.autonomous.interval_ms, 30_000);
        assert!(config.treasury.base_url.is_none());
    }

    #[test]
    fn test_validate_collects_every_section() {
        let toml_str = r#"
[voters]
risk = ""

[autonomous]
interval_ms = 0

[execution]
buyback_fraction = 1.5
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        let issues = config.validate();
        let fields: Vec<_> = issues.iter().map(|i| i.field.as_str()).collect();
        assert_eq!(
            fields,
            vec![
                "voters.risk",
                "autonomous.interval_ms",
                "execution.buyback_fraction"
            ]
        );
        assert!(FileConfig::has_errors(&issues));
    }
}
