//! Autonomous treasury domain
//!
//! Each cycle asks the three voters for an action recommendation given a
//! [`AutonomousContext`], applies the plurality-with-floor rule in
//! [`decide_action`] and stores the resulting [`AutonomousDecision`] in a
//! bounded [`DecisionHistory`].

pub mod action;
pub mod context;
pub mod decision;
pub mod history;
pub mod quorum;
pub mod recommendation;

pub use action::TreasuryAction;
pub use context::{AutonomousContext, ManagedToken, MarketMetrics, TreasurySnapshot};
pub use decision::AutonomousDecision;
pub use history::{DecisionHistory, HISTORY_CAPACITY, RECENT_ACTIONS_WINDOW};
pub use quorum::{
    DISPLAY_MIN_CONFIDENCE, EXECUTION_MIN_APPROVALS, PLURALITY_MIN_CONFIDENCE, QUORUM_FLOOR,
    QuorumVerdict, decide_action, display_tally,
};
pub use recommendation::{Recommendation, parse_recommendation};
