//! Voter model configuration from TOML (`[voters]` section)

use super::ConfigIssue;
use council_domain::{VoterId, VoterProfile};
use serde::{Deserialize, Serialize};

const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Model name per voter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileVotersConfig {
    /// Sentinel (risk & momentum)
    pub risk: String,
    /// Architect (structure & execution)
    pub structure: String,
    /// Steward (ethics & restraint)
    pub ethics: String,
}

impl Default for FileVotersConfig {
    fn default() -> Self {
        Self {
            risk: DEFAULT_MODEL.to_string(),
            structure: DEFAULT_MODEL.to_string(),
            ethics: DEFAULT_MODEL.to_string(),
        }
    }
}

impl FileVotersConfig {
    pub fn model_for(&self, voter: VoterId) -> &str {
        match voter {
            VoterId::Risk => &self.risk,
            VoterId::Structure => &self.structure,
            VoterId::Ethics => &self.ethics,
        }
    }

    /// One profile per voter, in declaration order
    pub fn profiles(&self) -> Vec<VoterProfile> {
        VoterId::ALL
            .into_iter()
            .map(|voter| VoterProfile::new(voter, self.model_for(voter).trim()))
            .collect()
    }

    pub(super) fn validate(&self) -> Vec<ConfigIssue> {
        VoterId::ALL
            .into_iter()
            .filter(|voter| self.model_for(*voter).trim().is_empty())
            .map(|voter| {
                ConfigIssue::error(
                    format!("voters.{}", voter.as_str()),
                    format!("model name for {} must not be empty", voter.name()),
                )
            })
            .collect()
    }
}
