//! Voter identities and role profiles
//!
//! The council always has exactly three equal-weight voters. Their role only
//! specializes the instructions they receive; it never changes vote weight.

use crate::core::error::DomainError;
use crate::prompt::PromptTemplate;
use serde::{Deserialize, Serialize};

/// One of the three fixed council participants
///
/// Declaration order is significant: it is the order used when synthesizing
/// consensus reasoning and when reporting missing voters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VoterId {
    /// Risk and momentum analysis
    Risk,
    /// Structure and execution analysis
    Structure,
    /// Ethics and restraint analysis
    Ethics,
}

impl VoterId {
    /// All voters in declaration order
    pub const ALL: [VoterId; 3] = [VoterId::Risk, VoterId::Structure, VoterId::Ethics];

    /// Stable identifier used in config files and JSON
    pub fn as_str(&self) -> &'static str {
        match self {
            VoterId::Risk => "risk",
            VoterId::Structure => "structure",
            VoterId::Ethics => "ethics",
        }
    }

    /// Display name of the voter
    pub fn name(&self) -> &'static str {
        match self {
            VoterId::Risk => "Sentinel",
            VoterId::Structure => "Architect",
            VoterId::Ethics => "Steward",
        }
    }

    /// Immutable role label
    pub fn role(&self) -> &'static str {
        match self {
            VoterId::Risk => "Risk & Momentum",
            VoterId::Structure => "Structure & Execution",
            VoterId::Ethics => "Ethics & Restraint",
        }
    }
}

impl std::fmt::Display for VoterId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for VoterId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "risk" | "sentinel" => Ok(VoterId::Risk),
            "structure" | "architect" => Ok(VoterId::Structure),
            "ethics" | "steward" => Ok(VoterId::Ethics),
            other => Err(DomainError::UnknownVoter(other.to_string())),
        }
    }
}

/// Role configuration for a single voter
///
/// All three voters share one adapter; this record is what differentiates
/// them: which model answers and which instructions it is given.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoterProfile {
    pub voter: VoterId,
    /// Model name forwarded to the reasoning service
    pub model: String,
    /// Role-specific system instructions
    pub instructions: String,
}

impl VoterProfile {
    /// Create a profile with the built-in instructions for this voter's role
    pub fn new(voter: VoterId, model: impl Into<String>) -> Self {
        Self {
            voter,
            model: model.into(),
            instructions: PromptTemplate::voter_system(voter),
        }
    }

    /// Override the role instructions
    pub fn with_instructions(mut self, instructions: impl Into<String>) -> Self {
        self.instructions = instructions.into();
        self
    }
}
