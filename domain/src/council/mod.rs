//! Council deliberation domain
//!
//! Three equal-weight voters each cast one ballot on a manually submitted
//! [`Decision`]. Once all three have voted, [`calculate_consensus`] turns the
//! ballots into a single auditable [`Consensus`].
//!
//! ```text
//!   Decision ──▶ Sentinel  ─┐
//!   (pending) ─▶ Architect ─┼──▶ 3 votes ──▶ Consensus ──▶ consensus_reached
//!            ─▶ Steward   ─┘   (deliberating)
//! ```

pub mod consensus;
pub mod decision;
pub mod parsing;
pub mod vote;
pub mod voter;

// Re-export main types
pub use consensus::{Consensus, ConsensusOutcome, MAJORITY_THRESHOLD, VoteSummary, calculate_consensus};
pub use decision::{Decision, DecisionCategory, DecisionId, DecisionStatus, NewDecision, Priority};
pub use parsing::{ResponseParseError, extract_json_object, parse_vote_response, try_parse_vote};
pub use vote::{DEFAULT_CONFIDENCE, Vote, VoteChoice, confidence_score, normalize_confidence};
pub use voter::{VoterId, VoterProfile};
