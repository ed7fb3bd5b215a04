//! The autonomous engine's own decision record

use super::action::TreasuryAction;
use super::quorum::QuorumVerdict;
use super::recommendation::Recommendation;
use crate::council::consensus::VoteSummary;
use crate::council::voter::VoterId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Outcome of one autonomous cycle
///
/// Independent of manually submitted decisions. Degraded cycles (a voter
/// failed) still produce a record: `hold`, not executed, all abstain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AutonomousDecision {
    pub id: Uuid,
    pub action: TreasuryAction,
    pub reasoning: String,
    pub votes: VoteSummary,
    pub executed: bool,
    /// Transaction signature, execution error, or abort message
    pub result: Option<String>,
    /// Voter recommendations this record was derived from (empty on abort)
    #[serde(default)]
    pub recommendations: Vec<Recommendation>,
    pub timestamp: DateTime<Utc>,
}

impl AutonomousDecision {
    /// Record for a cycle whose three recommendations were all obtained
    pub fn from_verdict(verdict: &QuorumVerdict, recommendations: Vec<Recommendation>) -> Self {
        Self {
            id: Uuid::new_v4(),
            action: verdict.action,
            reasoning: synthesize_reasoning(verdict, &recommendations),
            votes: verdict.votes,
            executed: false,
            result: None,
            recommendations,
            timestamp: Utc::now(),
        }
    }

    /// Degraded record for a cycle aborted by a voter failure
    pub fn aborted(error: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            action: TreasuryAction::Hold,
            reasoning: "Cycle aborted: not every voter returned a usable recommendation, \
                        so the treasury holds."
                .to_string(),
            votes: VoteSummary {
                approve: 0,
                reject: 0,
                abstain: VoterId::ALL.len(),
            },
            executed: false,
            result: Some(error.into()),
            recommendations: Vec::new(),
            timestamp: Utc::now(),
        }
    }

    /// Attach the execution outcome
    pub fn with_execution(mut self, executed: bool, result: Option<String>) -> Self {
        self.executed = executed;
        self.result = result;
        self
    }
}

/// Build the record's reasoning text from the verdict and each voter's view
fn synthesize_reasoning(verdict: &QuorumVerdict, recommendations: &[Recommendation]) -> String {
    let mut lines = Vec::with_capacity(recommendations.len() + 1);

    lines.push(if verdict.forced_hold {
        format!(
            "No quorum: leading action {} had {} qualifying vote(s), holding instead.",
            verdict.leader.as_str().to_uppercase(),
            verdict.leader_votes
        )
    } else {
        format!(
            "Council chose {} with {} qualifying vote(s).",
            verdict.action.as_str().to_uppercase(),
            verdict.leader_votes
        )
    });

    for voter in VoterId::ALL {
        if let Some(rec) = recommendations.iter().find(|r| r.voter == voter) {
            lines.push(format!(
                "{} ({}): {} at {}% - {}",
                voter.name(),
                voter.role(),
                rec.action.as_str().to_uppercase(),
                rec.confidence,
                rec.reasoning.trim()
            ));
        }
    }

    lines.join("\n")
}
