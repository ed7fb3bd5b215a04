//! Activity log entries
//!
//! Immutable, system-generated facts about decision state transitions.
//! Entries are only ever appended; readers see them newest first.

use crate::council::consensus::ConsensusOutcome;
use crate::council::decision::DecisionId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kind of transition an entry records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    DecisionCreated,
    DeliberationStarted,
    DeliberationCompleted,
    ConsensusApproved,
    ConsensusRejected,
    ConsensusNeedsRevision,
    DecisionDeleted,
}

impl ActivityKind {
    pub fn for_outcome(outcome: ConsensusOutcome) -> Self {
        match outcome {
            ConsensusOutcome::Approved => ActivityKind::ConsensusApproved,
            ConsensusOutcome::Rejected => ActivityKind::ConsensusRejected,
            ConsensusOutcome::NeedsRevision => ActivityKind::ConsensusNeedsRevision,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityKind::DecisionCreated => "decision_created",
            ActivityKind::DeliberationStarted => "deliberation_started",
            ActivityKind::DeliberationCompleted => "deliberation_completed",
            ActivityKind::ConsensusApproved => "consensus_approved",
            ActivityKind::ConsensusRejected => "consensus_rejected",
            ActivityKind::ConsensusNeedsRevision => "consensus_needs_revision",
            ActivityKind::DecisionDeleted => "decision_deleted",
        }
    }
}

impl std::fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One appended fact
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityEntry {
    pub id: Uuid,
    pub decision_id: DecisionId,
    pub kind: ActivityKind,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl ActivityEntry {
    pub fn new(decision_id: DecisionId, kind: ActivityKind, message: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            decision_id,
            kind,
            message: message.into(),
            timestamp: Utc::now(),
        }
    }
}
