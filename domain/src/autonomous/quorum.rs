//! Autonomous quorum rule
//!
//! Decides which treasury action a cycle takes from the three voters'
//! recommendations. This is a plurality rule with a 2-vote floor, distinct
//! from the approve/reject majority used by [`calculate_consensus`].
//!
//! Two confidence thresholds are involved and they are intentionally kept
//! separate:
//!
//! - [`PLURALITY_MIN_CONFIDENCE`]: a recommendation counts toward the action
//!   tally only when its confidence is strictly above 30.
//! - [`DISPLAY_MIN_CONFIDENCE`]: the approve/reject/abstain breakdown stored
//!   on the record (and used by the execution gate) counts a voter only when
//!   its confidence is strictly above 50.
//!
//! [`calculate_consensus`]: crate::council::calculate_consensus

use super::action::TreasuryAction;
use super::recommendation::Recommendation;
use crate::council::consensus::VoteSummary;
use serde::{Deserialize, Serialize};

/// Recommendations at or below this confidence are excluded from the plurality
pub const PLURALITY_MIN_CONFIDENCE: f64 = 30.0;

/// Recommendations at or below this confidence are reported as abstentions
pub const DISPLAY_MIN_CONFIDENCE: f64 = 50.0;

/// Minimum qualifying votes for the plurality leader to be acted on
pub const QUORUM_FLOOR: usize = 2;

/// Approvals in the display tally required before an action executes
pub const EXECUTION_MIN_APPROVALS: usize = 2;

/// Result of applying the quorum rule to one cycle's recommendations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuorumVerdict {
    /// Action the cycle takes
    pub action: TreasuryAction,
    /// Plurality leader before the quorum floor was applied
    pub leader: TreasuryAction,
    /// Qualifying votes the leader received
    pub leader_votes: usize,
    /// True when the floor replaced the leader with `hold`
    pub forced_hold: bool,
    /// Display breakdown relative to `action`
    pub votes: VoteSummary,
}

impl QuorumVerdict {
    /// Execution gate: a non-hold action with at least two display approvals
    pub fn should_execute(&self) -> bool {
        !self.action.is_hold() && self.votes.approve >= EXECUTION_MIN_APPROVALS
    }
}

/// Apply the autonomous quorum rule
///
/// 1. Count recommendations with confidence > 30 per action.
/// 2. The highest count wins; ties go to the earliest action in
///    [`TreasuryAction::ALL`].
/// 3. Fewer than two qualifying votes for the leader forces `hold`.
/// 4. The display breakdown is computed against the final action.
///
/// # Example
///
/// ```
/// use council_domain::autonomous::{decide_action, Recommendation, TreasuryAction};
/// use council_domain::council::VoterId;
///
/// let recs = vec![
///     Recommendation::new(VoterId::Risk, TreasuryAction::Burn, "", 80.0),
///     Recommendation::new(VoterId::Structure, TreasuryAction::Burn, "", 60.0),
///     Recommendation::new(VoterId::Ethics, TreasuryAction::Hold, "", 90.0),
/// ];
/// let verdict = decide_action(&recs);
/// assert_eq!(verdict.action, TreasuryAction::Burn);
/// assert_eq!(verdict.votes.approve, 2);
/// assert!(verdict.should_execute());
/// ```
pub fn decide_action(recommendations: &[Recommendation]) -> QuorumVerdict {
    let counts: Vec<(TreasuryAction, usize)> = TreasuryAction::ALL
        .into_iter()
        .map(|action| {
            let count = recommendations
                .iter()
                .filter(|r| r.action == action && r.confidence > PLURALITY_MIN_CONFIDENCE)
                .count();
            (action, count)
        })
        .collect();

    let mut leader = TreasuryAction::Hold;
    let mut leader_votes = 0;
    for (action, count) in counts {
        if count > leader_votes {
            leader = action;
            leader_votes = count;
        }
    }

    let forced_hold = leader_votes < QUORUM_FLOOR;
    let action = if forced_hold {
        TreasuryAction::Hold
    } else {
        leader
    };

    QuorumVerdict {
        action,
        leader,
        leader_votes,
        forced_hold: forced_hold && !leader.is_hold(),
        votes: display_tally(recommendations, action),
    }
}

/// Approve/reject/abstain breakdown relative to the chosen action
pub fn display_tally(recommendations: &[Recommendation], action: TreasuryAction) -> VoteSummary {
    recommendations
        .iter()
        .fold(VoteSummary::default(), |mut summary, rec| {
            if rec.confidence <= DISPLAY_MIN_CONFIDENCE {
                summary.abstain += 1;
            } else if rec.action == action {
                summary.approve += 1;
            } else {
                summary.reject += 1;
            }
            summary
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::council::voter::VoterId;
    use TreasuryAction::*;

    fn recs(items: [(TreasuryAction, f64); 3]) -> Vec<Recommendation> {
        VoterId::ALL
            .into_iter()
            .zip(items)
            .map(|(voter, (action, confidence))| {
                Recommendation::new(voter, action, "because", confidence)
            })
            .collect()
    }

    #[test]
    fn test_two_of_three_agreement_wins() {
        let verdict = decide_action(&recs([(Buyback, 70.0), (Hold, 80.0), (Buyback, 65.0)]));
        assert_eq!(verdict.action, Buyback);
        assert_eq!(verdict.leader_votes, 2);
        assert!(!verdict.forced_hold);
        assert_eq!(
            verdict.votes,
            VoteSummary {
                approve: 2,
                reject: 1,
                abstain: 0
            }
        );
        assert!(verdict.should_execute());
    }

    #[test]
    fn test_three_way_tie_picks_enumeration_order_then_floor_forces_hold() {
        // Each action appears once: the leader is the earliest in enum order
        let verdict = decide_action(&recs([(ClaimRewards, 90.0), (SellPartial, 90.0), (Burn, 90.0)]));
        assert_eq!(verdict.leader, Burn);
        assert_eq!(verdict.leader_votes, 1);
        // ...and a single vote is below the quorum floor
        assert_eq!(verdict.action, Hold);
        assert!(verdict.forced_hold);
        assert!(!verdict.should_execute());
    }

    #[test]
    fn test_tie_break_ignores_voter_order() {
        let a = decide_action(&recs([(SellPartial, 90.0), (Buyback, 90.0), (Burn, 90.0)]));
        let b = decide_action(&recs([(Burn, 90.0), (SellPartial, 90.0), (Buyback, 90.0)]));
        assert_eq!(a.leader, Buyback);
        assert_eq!(b.leader, Buyback);
    }

    #[test]
    fn test_low_confidence_excluded_from_plurality() {
        // Two burns, but one is at the 30 threshold and does not count
        let verdict = decide_action(&recs([(Burn, 30.0), (Burn, 80.0), (Hold, 40.0)]));
        assert_eq!(verdict.leader, Burn);
        assert_eq!(verdict.leader_votes, 1);
        assert_eq!(verdict.action, Hold);
        assert!(verdict.forced_hold);
    }

    #[test]
    fn test_unanimous_hold_is_not_forced() {
        let verdict = decide_action(&recs([(Hold, 90.0), (Hold, 90.0), (Hold, 90.0)]));
        assert_eq!(verdict.action, Hold);
        assert!(!verdict.forced_hold);
        assert_eq!(verdict.votes.approve, 3);
        assert!(!verdict.should_execute());
    }

    #[test]
    fn test_all_low_confidence_holds() {
        let verdict = decide_action(&recs([(Buyback, 10.0), (Buyback, 20.0), (Buyback, 30.0)]));
        assert_eq!(verdict.action, Hold);
        assert_eq!(verdict.leader_votes, 0);
        assert_eq!(verdict.votes.abstain, 3);
    }

    #[test]
    fn test_plurality_and_display_thresholds_differ() {
        // Both burns count for plurality (> 30) but only one clears the
        // display threshold (> 50), so the execution gate stays closed.
        let verdict = decide_action(&recs([(Burn, 45.0), (Burn, 75.0), (Hold, 20.0)]));
        assert_eq!(verdict.action, Burn);
        assert_eq!(
            verdict.votes,
            VoteSummary {
                approve: 1,
                reject: 0,
                abstain: 2
            }
        );
        assert!(!verdict.should_execute());
    }

    #[test]
    fn test_display_tally_boundary() {
        let tally = display_tally(&recs([(Burn, 50.0), (Burn, 51.0), (Hold, 51.0)]), Burn);
        assert_eq!(
            tally,
            VoteSummary {
                approve: 1,
                reject: 1,
                abstain: 1
            }
        );
    }

    #[test]
    fn test_fractional_confidence_just_above_plurality_threshold_counts() {
        let verdict = decide_action(&recs([(Buyback, 30.4), (Buyback, 80.0), (Hold, 90.0)]));
        assert_eq!(verdict.action, Buyback);
        assert_eq!(verdict.leader_votes, 2);
        assert!(!verdict.forced_hold);
    }

    #[test]
    fn test_fractional_confidence_just_above_display_threshold_approves() {
        let verdict = decide_action(&recs([(Burn, 50.4), (Burn, 80.0), (Hold, 50.0)]));
        assert_eq!(verdict.action, Burn);
        assert_eq!(
            verdict.votes,
            VoteSummary {
                approve: 2,
                reject: 0,
                abstain: 1
            }
        );
        assert!(verdict.should_execute());
    }
}
