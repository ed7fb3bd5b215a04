//! Decision entity and its lifecycle
//!
//! A [`Decision`] owns its vote set and at most one [`Consensus`]. Its status
//! is never assigned by callers: it is re-derived on every write from the
//! vote set and the presence of a consensus.

use super::consensus::Consensus;
use super::vote::Vote;
use super::voter::VoterId;
use crate::core::error::DomainError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Maximum title length in characters
pub const MAX_TITLE_LEN: usize = 200;

/// Maximum description/context length in characters
pub const MAX_TEXT_LEN: usize = 10_000;

/// Unique decision identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DecisionId(Uuid);

impl DecisionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for DecisionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for DecisionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for DecisionId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim())
            .map(Self)
            .map_err(|e| DomainError::validation("id", e.to_string()))
    }
}

/// What kind of change a decision proposes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionCategory {
    Feature,
    BugFix,
    Refactor,
    Architecture,
    Security,
    Performance,
    Other,
}

impl DecisionCategory {
    pub const ALL: [DecisionCategory; 7] = [
        DecisionCategory::Feature,
        DecisionCategory::BugFix,
        DecisionCategory::Refactor,
        DecisionCategory::Architecture,
        DecisionCategory::Security,
        DecisionCategory::Performance,
        DecisionCategory::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DecisionCategory::Feature => "feature",
            DecisionCategory::BugFix => "bug_fix",
            DecisionCategory::Refactor => "refactor",
            DecisionCategory::Architecture => "architecture",
            DecisionCategory::Security => "security",
            DecisionCategory::Performance => "performance",
            DecisionCategory::Other => "other",
        }
    }
}

impl std::fmt::Display for DecisionCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for DecisionCategory {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('-', "_");
        match normalized.as_str() {
            "bugfix" => return Ok(DecisionCategory::BugFix),
            "perf" => return Ok(DecisionCategory::Performance),
            _ => {}
        }
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == normalized)
            .ok_or(DomainError::UnknownVariant {
                kind: "category",
                value: s.to_string(),
            })
    }
}

/// Decision priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
            Priority::Critical => "critical",
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Priority {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            "critical" => Ok(Priority::Critical),
            other => Err(DomainError::UnknownVariant {
                kind: "priority",
                value: other.to_string(),
            }),
        }
    }
}

/// Lifecycle status of a decision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionStatus {
    /// Fewer than three distinct voters have voted
    #[default]
    Pending,
    /// All three voters voted, consensus not computed yet
    Deliberating,
    /// Consensus computed and attached (terminal)
    ConsensusReached,
    /// Reserved; no transition produces it
    Deadlock,
}

impl DecisionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DecisionStatus::Pending => "pending",
            DecisionStatus::Deliberating => "deliberating",
            DecisionStatus::ConsensusReached => "consensus_reached",
            DecisionStatus::Deadlock => "deadlock",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, DecisionStatus::ConsensusReached)
    }
}

impl std::fmt::Display for DecisionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Payload for creating a decision
///
/// Validated by [`NewDecision::validate`] before any voter is invoked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewDecision {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub context: Option<String>,
    pub category: DecisionCategory,
    #[serde(default)]
    pub priority: Priority,
}

impl NewDecision {
    pub fn new(title: impl Into<String>, category: DecisionCategory) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            context: None,
            category,
            priority: Priority::default(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Field-level validation, returns the first violation found
    pub fn validate(&self) -> Result<(), DomainError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(DomainError::validation("title", "must not be empty"));
        }
        if title.chars().count() > MAX_TITLE_LEN {
            return Err(DomainError::validation(
                "title",
                format!("must be at most {MAX_TITLE_LEN} characters"),
            ));
        }
        if self.description.chars().count() > MAX_TEXT_LEN {
            return Err(DomainError::validation(
                "description",
                format!("must be at most {MAX_TEXT_LEN} characters"),
            ));
        }
        if let Some(context) = &self.context
            && context.chars().count() > MAX_TEXT_LEN
        {
            return Err(DomainError::validation(
                "context",
                format!("must be at most {MAX_TEXT_LEN} characters"),
            ));
        }
        Ok(())
    }
}

/// A proposal requiring the council's judgment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    pub id: DecisionId,
    pub title: String,
    pub description: String,
    pub context: Option<String>,
    pub category: DecisionCategory,
    pub priority: Priority,
    status: DecisionStatus,
    votes: Vec<Vote>,
    consensus: Option<Consensus>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Decision {
    /// Create a pending decision from a validated payload
    pub fn create(payload: NewDecision) -> Result<Self, DomainError> {
        payload.validate()?;
        let now = Utc::now();
        Ok(Self {
            id: DecisionId::new(),
            title: payload.title.trim().to_string(),
            description: payload.description,
            context: payload.context.filter(|c| !c.trim().is_empty()),
            category: payload.category,
            priority: payload.priority,
            status: DecisionStatus::Pending,
            votes: Vec::new(),
            consensus: None,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn status(&self) -> DecisionStatus {
        self.status
    }

    /// Votes cast so far, at most one per voter
    pub fn votes(&self) -> &[Vote] {
        &self.votes
    }

    pub fn vote_of(&self, voter: VoterId) -> Option<&Vote> {
        self.votes.iter().find(|v| v.voter == voter)
    }

    pub fn consensus(&self) -> Option<&Consensus> {
        self.consensus.as_ref()
    }

    /// Voters who have not voted yet, in declaration order
    pub fn missing_voters(&self) -> Vec<VoterId> {
        VoterId::ALL
            .into_iter()
            .filter(|voter| self.vote_of(*voter).is_none())
            .collect()
    }

    /// True when every voter is represented, checked by membership
    pub fn has_all_votes(&self) -> bool {
        VoterId::ALL.iter().all(|voter| self.vote_of(*voter).is_some())
    }

    /// Record a vote, replacing any earlier vote from the same voter
    ///
    /// Returns `true` when this write moved the decision from `pending` to
    /// `deliberating`.
    pub fn record_vote(&mut self, vote: Vote) -> bool {
        let before = self.status;
        match self.votes.iter_mut().find(|v| v.voter == vote.voter) {
            Some(existing) => *existing = vote,
            None => self.votes.push(vote),
        }
        self.touch();
        before == DecisionStatus::Pending && self.status == DecisionStatus::Deliberating
    }

    /// Attach (or replace) the consensus; always ends in `consensus_reached`
    pub fn attach_consensus(&mut self, consensus: Consensus) {
        self.consensus = Some(consensus);
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
        self.status = self.derive_status();
    }

    fn derive_status(&self) -> DecisionStatus {
        if self.consensus.is_some() {
            DecisionStatus::ConsensusReached
        } else if self.has_all_votes() {
            DecisionStatus::Deliberating
        } else {
            DecisionStatus::Pending
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::council::consensus::calculate_consensus;
    use crate::council::vote::VoteChoice;

    fn vote(voter: VoterId, choice: VoteChoice) -> Vote {
        Vote::new(voter, choice, format!("{voter} says {choice}"), 70).unwrap()
    }

    fn dark_mode() -> Decision {
        Decision::create(NewDecision::new("Add dark mode", DecisionCategory::Feature)).unwrap()
    }

    #[test]
    fn test_create_pending_decision() {
        let decision = dark_mode();
        assert_eq!(decision.status(), DecisionStatus::Pending);
        assert!(decision.votes().is_empty());
        assert!(decision.consensus().is_none());
        assert_eq!(decision.priority, Priority::Medium);
        assert_eq!(decision.missing_voters(), VoterId::ALL.to_vec());
    }

    #[test]
    fn test_create_rejects_blank_title() {
        let err = Decision::create(NewDecision::new("   ", DecisionCategory::Other)).unwrap_err();
        assert_eq!(err, DomainError::validation("title", "must not be empty"));
    }

    #[test]
    fn test_create_rejects_long_title() {
        let payload = NewDecision::new("x".repeat(MAX_TITLE_LEN + 1), DecisionCategory::Other);
        assert!(payload.validate().is_err());
    }

    #[test]
    fn test_vote_replacement_is_last_write_wins() {
        let mut decision = dark_mode();
        decision.record_vote(vote(VoterId::Risk, VoteChoice::Approve));
        decision.record_vote(vote(VoterId::Risk, VoteChoice::Reject));

        assert_eq!(decision.votes().len(), 1);
        assert_eq!(
            decision.vote_of(VoterId::Risk).unwrap().choice,
            VoteChoice::Reject
        );
        assert_eq!(decision.status(), DecisionStatus::Pending);
    }

    #[test]
    fn test_repeated_votes_do_not_complete_the_set() {
        let mut decision = dark_mode();
        for _ in 0..3 {
            assert!(!decision.record_vote(vote(VoterId::Ethics, VoteChoice::Approve)));
        }
        assert_eq!(decision.status(), DecisionStatus::Pending);
        assert_eq!(
            decision.missing_voters(),
            vec![VoterId::Risk, VoterId::Structure]
        );
    }

    #[test]
    fn test_deliberating_once_all_voters_present_in_any_order() {
        let mut decision = dark_mode();
        assert!(!decision.record_vote(vote(VoterId::Ethics, VoteChoice::Approve)));
        assert!(!decision.record_vote(vote(VoterId::Risk, VoteChoice::Approve)));
        assert!(decision.record_vote(vote(VoterId::Structure, VoteChoice::Reject)));
        assert_eq!(decision.status(), DecisionStatus::Deliberating);

        // Replacing a vote afterwards keeps the set complete but is not a transition
        assert!(!decision.record_vote(vote(VoterId::Risk, VoteChoice::Abstain)));
        assert_eq!(decision.votes().len(), 3);
    }

    #[test]
    fn test_attach_consensus_is_terminal() {
        let mut decision = dark_mode();
        for voter in VoterId::ALL {
            decision.record_vote(vote(voter, VoteChoice::Approve));
        }
        let consensus = calculate_consensus(decision.votes()).unwrap();
        decision.attach_consensus(consensus);

        assert_eq!(decision.status(), DecisionStatus::ConsensusReached);
        assert!(decision.status().is_terminal());
    }

    #[test]
    fn test_parse_enums() {
        assert_eq!("bugfix".parse::<DecisionCategory>().ok(), Some(DecisionCategory::BugFix));
        assert_eq!("bug-fix".parse::<DecisionCategory>().ok(), Some(DecisionCategory::BugFix));
        assert_eq!("feature".parse::<DecisionCategory>().ok(), Some(DecisionCategory::Feature));
        assert!("marketing".parse::<DecisionCategory>().is_err());
        assert_eq!("CRITICAL".parse::<Priority>().ok(), Some(Priority::Critical));
        assert!("urgent".parse::<Priority>().is_err());
    }

    #[test]
    fn test_payload_deserialize_defaults() {
        let payload: NewDecision = serde_json::from_str(
            r#"{"title": "Add dark mode", "category": "feature", "priority": "medium"}"#,
        )
        .unwrap();
        assert_eq!(payload.description, "");
        assert!(payload.context.is_none());
        assert!(payload.validate().is_ok());
    }

    #[test]
    fn test_decision_id_round_trip_display() {
        let id = DecisionId::new();
        assert_eq!(id.to_string().parse::<DecisionId>().unwrap(), id);
        assert!("not-a-uuid".parse::<DecisionId>().is_err());
    }
}
