//! Execution configuration from TOML (`[execution]` section)

use super::ConfigIssue;
use council_application::ExecutionPolicy;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileExecutionConfig {
    /// Share of the SOL balance spent per buyback (default: 0.10)
    pub buyback_fraction: f64,
    /// Ceiling on one buyback in SOL (default: 0.5)
    pub buyback_cap_sol: f64,
    /// Percent of held tokens sold by `sell_partial` (default: 5)
    pub sell_percent: f64,
    /// Percent of supply burned by `burn` (default: 1)
    pub burn_percent: f64,
    /// Log orders instead of sending them (default: false)
    pub dry_run: bool,
}

impl Default for FileExecutionConfig {
    fn default() -> Self {
        let policy = ExecutionPolicy::default();
        Self {
            buyback_fraction: policy.buyback_fraction,
            buyback_cap_sol: policy.buyback_cap_sol,
            sell_percent: policy.sell_percent,
            burn_percent: policy.burn_percent,
            dry_run: false,
        }
    }
}

impl FileExecutionConfig {
    pub fn policy(&self) -> ExecutionPolicy {
        ExecutionPolicy::default()
            .with_buyback(self.buyback_fraction, self.buyback_cap_sol)
            .with_sell_percent(self.sell_percent)
            .with_burn_percent(self.burn_percent)
    }

    pub(super) fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        if !(0.0..=1.0).contains(&self.buyback_fraction) {
            issues.push(ConfigIssue::error(
                "execution.buyback_fraction",
                format!("{} is outside 0.0-1.0", self.buyback_fraction),
            ));
        }
        if self.buyback_cap_sol < 0.0 {
            issues.push(ConfigIssue::error(
                "execution.buyback_cap_sol",
                "must not be negative",
            ));
        }
        for (field, value) in [
            ("execution.sell_percent", self.sell_percent),
            ("execution.burn_percent", self.burn_percent),
        ] {
            if !(value > 0.0 && value <= 100.0) {
                issues.push(ConfigIssue::error(
                    field,
                    format!("{} is outside (0, 100]", value),
                ));
            }
        }
        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_policy() {
        assert_eq!(FileExecutionConfig::default().policy(), ExecutionPolicy::default());
    }

    #[test]
    fn test_percent_bounds() {
        let config = FileExecutionConfig {
            sell_percent: 0.0,
            burn_percent: 150.0,
            ..Default::default()
        };
        assert_eq!(config.validate().len(), 2);
    }
}
