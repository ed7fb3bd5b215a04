//! Domain layer for treasury-council
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Council
//!
//! Three equal-weight voters (Sentinel, Architect, Steward) each cast one
//! ballot on a manually submitted decision:
//!
//! - **Deliberation**: one vote per voter, last write wins
//! - **Consensus**: 2-of-3 approve → approved, 2-of-3 reject → rejected,
//!   otherwise needs revision
//!
//! ## Autonomous treasury
//!
//! A periodic cycle asks the same voters for a treasury action and applies a
//! plurality rule with a 2-vote floor; anything short of quorum holds.

pub mod activity;
pub mod autonomous;
pub mod core;
pub mod council;
pub mod prompt;

// Re-export commonly used types
pub use activity::{ActivityEntry, ActivityKind};
pub use autonomous::{
    AutonomousContext, AutonomousDecision, DecisionHistory, ManagedToken, MarketMetrics,
    QuorumVerdict, Recommendation, TreasuryAction, TreasurySnapshot, decide_action,
    parse_recommendation,
};
pub use crate::core::error::DomainError;
pub use council::{
    Consensus, ConsensusOutcome, Decision, DecisionCategory, DecisionId, DecisionStatus,
    NewDecision, Priority, ResponseParseError, Vote, VoteChoice, VoteSummary, VoterId,
    VoterProfile, calculate_consensus, parse_vote_response,
};
pub use prompt::PromptTemplate;
