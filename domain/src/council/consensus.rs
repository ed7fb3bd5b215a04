//! Consensus calculation
//!
//! Pure, deterministic mapping from the three votes on a decision to an
//! outcome, a unanimity flag and a synthesized explanation.

use super::vote::{Vote, VoteChoice};
use super::voter::VoterId;
use crate::core::error::DomainError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Votes needed for an option to carry the council
pub const MAJORITY_THRESHOLD: usize = 2;

/// Outcome of a council consensus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsensusOutcome {
    Approved,
    Rejected,
    /// No option reached a majority
    NeedsRevision,
}

impl ConsensusOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConsensusOutcome::Approved => "approved",
            ConsensusOutcome::Rejected => "rejected",
            ConsensusOutcome::NeedsRevision => "needs_revision",
        }
    }

    pub fn is_approved(&self) -> bool {
        matches!(self, ConsensusOutcome::Approved)
    }
}

impl std::fmt::Display for ConsensusOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Approve/reject/abstain counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct VoteSummary {
    pub approve: usize,
    pub reject: usize,
    pub abstain: usize,
}

impl VoteSummary {
    /// Tally a set of ballot choices
    pub fn tally<'a>(choices: impl IntoIterator<Item = &'a VoteChoice>) -> Self {
        choices
            .into_iter()
            .fold(Self::default(), |mut summary, choice| {
                match choice {
                    VoteChoice::Approve => summary.approve += 1,
                    VoteChoice::Reject => summary.reject += 1,
                    VoteChoice::Abstain => summary.abstain += 1,
                }
                summary
            })
    }

    pub fn total(&self) -> usize {
        self.approve + self.reject + self.abstain
    }

    /// Generate a visual vote summary (e.g., "[●●○-]" style: approve, reject, abstain)
    pub fn glyphs(&self) -> String {
        let mut summary = String::from("[");
        summary.push_str(&"●".repeat(self.approve));
        summary.push_str(&"○".repeat(self.reject));
        summary.push_str(&"-".repeat(self.abstain));
        summary.push(']');
        summary
    }
}

/// The council's aggregated verdict on one decision
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Consensus {
    pub outcome: ConsensusOutcome,
    pub unanimous: bool,
    pub vote_summary: VoteSummary,
    /// Each voter's labeled reasoning, in declaration order
    pub reasoning: String,
    /// Deduplicated union of all recommendations, first-seen order
    pub action_items: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// Compute the consensus for exactly one vote per voter
///
/// Outcome rule, in order: approvals ≥ 2 → approved; rejections ≥ 2 →
/// rejected; otherwise needs revision. Unanimity means all three approve or
/// all three reject.
///
/// # Example
///
/// ```
/// use council_domain::council::{calculate_consensus, ConsensusOutcome, Vote, VoteChoice, VoterId};
///
/// let votes = vec![
///     Vote::new(VoterId::Risk, VoteChoice::Approve, "ok", 80).unwrap(),
///     Vote::new(VoterId::Structure, VoteChoice::Approve, "ok", 70).unwrap(),
///     Vote::new(VoterId::Ethics, VoteChoice::Reject, "no", 60).unwrap(),
/// ];
/// let consensus = calculate_consensus(&votes).unwrap();
/// assert_eq!(consensus.outcome, ConsensusOutcome::Approved);
/// assert!(!consensus.unanimous);
/// ```
pub fn calculate_consensus(votes: &[Vote]) -> Result<Consensus, DomainError> {
    let ordered = order_votes(votes)?;

    let vote_summary = VoteSummary::tally(ordered.iter().map(|v| &v.choice));

    let outcome = if vote_summary.approve >= MAJORITY_THRESHOLD {
        ConsensusOutcome::Approved
    } else if vote_summary.reject >= MAJORITY_THRESHOLD {
        ConsensusOutcome::Rejected
    } else {
        ConsensusOutcome::NeedsRevision
    };

    let total = ordered.len();
    let unanimous = vote_summary.approve == total || vote_summary.reject == total;

    let reasoning = ordered
        .iter()
        .map(|vote| {
            format!(
                "{} ({}): {} (confidence {})\n{}",
                vote.voter.name(),
                vote.voter.role(),
                vote.choice.as_str().to_uppercase(),
                vote.confidence,
                vote.reasoning.trim()
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n");

    let mut action_items: Vec<String> = Vec::new();
    for item in ordered.iter().flat_map(|v| v.recommendations.iter()) {
        if !action_items.contains(item) {
            action_items.push(item.clone());
        }
    }

    Ok(Consensus {
        outcome,
        unanimous,
        vote_summary,
        reasoning,
        action_items,
        created_at: Utc::now(),
    })
}

/// Arrange votes in voter declaration order, requiring one per voter
fn order_votes(votes: &[Vote]) -> Result<Vec<&Vote>, DomainError> {
    if votes.len() != VoterId::ALL.len() {
        return Err(DomainError::IncompleteVoteSet(votes.len()));
    }
    VoterId::ALL
        .iter()
        .map(|voter| {
            votes
                .iter()
                .find(|v| v.voter == *voter)
                .ok_or(DomainError::IncompleteVoteSet(votes.len()))
        })
        .collect()
}
