//! Progress notification port
//!
//! Defines the interface for reporting progress while voters deliberate.

use council_domain::{Decision, VoterId};

/// Callback for progress updates during a deliberation
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (progress bars, plain text, ...)
pub trait ProgressNotifier: Send + Sync {
    /// Called when voting starts
    fn on_voting_start(&self, decision: &Decision, total_voters: usize);

    /// Called when one voter's call completes
    fn on_voter_complete(&self, voter: VoterId, success: bool);

    /// Called once all voters are in, or the deliberation aborted
    fn on_voting_complete(&self, success: bool);
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl ProgressNotifier for NoProgress {
    fn on_voting_start(&self, _decision: &Decision, _total_voters: usize) {}
    fn on_voter_complete(&self, _voter: VoterId, _success: bool) {}
    fn on_voting_complete(&self, _success: bool) {}
}
