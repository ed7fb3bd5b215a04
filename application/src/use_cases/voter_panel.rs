//! Voter panel
//!
//! The fixed roster of three voters and the parallel fan-out over them.
//! A fan-out is all-or-nothing: the first failing voter aborts the remaining
//! calls and the caller gets no partial result.

use super::voter_adapter::{VoterAdapter, VoterError};
use crate::ports::progress::{NoProgress, ProgressNotifier};
use crate::ports::reasoning_gateway::ReasoningGateway;
use council_domain::{
    AutonomousContext, Decision, DomainError, Recommendation, Vote, VoterId, VoterProfile,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinSet;
use tracing::{info, warn};

/// The three voters, held in declaration order
pub struct VoterPanel<G: ReasoningGateway + ?Sized + 'static> {
    voters: Vec<Arc<VoterAdapter<G>>>,
}

impl<G: ReasoningGateway + ?Sized + 'static> VoterPanel<G> {
    /// Build a panel from one profile per voter
    ///
    /// Profiles may come in any order; duplicates or a missing voter are
    /// rejected.
    pub fn new(
        gateway: Arc<G>,
        profiles: Vec<VoterProfile>,
        timeout: Option<Duration>,
    ) -> Result<Self, DomainError> {
        let mut voters = Vec::with_capacity(VoterId::ALL.len());
        for voter in VoterId::ALL {
            let mut matching = profiles.iter().filter(|p| p.voter == voter);
            let profile = matching.next().ok_or_else(|| {
                DomainError::validation("voters", format!("no profile for {}", voter.name()))
            })?;
            if matching.next().is_some() {
                return Err(DomainError::validation(
                    "voters",
                    format!("more than one profile for {}", voter.name()),
                ));
            }
            voters.push(Arc::new(
                VoterAdapter::new(Arc::clone(&gateway), profile.clone()).with_timeout(timeout),
            ));
        }
        Ok(Self { voters })
    }

    /// All three voters on the same model
    pub fn uniform(gateway: Arc<G>, model: &str, timeout: Option<Duration>) -> Self {
        let voters = VoterId::ALL
            .into_iter()
            .map(|voter| {
                Arc::new(
                    VoterAdapter::new(Arc::clone(&gateway), VoterProfile::new(voter, model))
                        .with_timeout(timeout),
                )
            })
            .collect();
        Self { voters }
    }

    pub fn profiles(&self) -> impl Iterator<Item = &VoterProfile> {
        self.voters.iter().map(|v| v.profile())
    }

    pub async fn collect_votes(&self, decision: &Decision) -> Result<Vec<Vote>, VoterError> {
        self.collect_votes_with_progress(decision, &NoProgress).await
    }

    /// Ask all voters for a vote in parallel
    pub async fn collect_votes_with_progress(
        &self,
        decision: &Decision,
        progress: &dyn ProgressNotifier,
    ) -> Result<Vec<Vote>, VoterError> {
        info!(decision = %decision.id, "Collecting votes from {} voters", self.voters.len());
        progress.on_voting_start(decision, self.voters.len());

        let mut join_set = JoinSet::new();
        for voter in &self.voters {
            let voter = Arc::clone(voter);
            let decision = decision.clone();
            join_set.spawn(async move { voter.cast_vote(&decision).await });
        }

        let result = drain(join_set, |vote: &Vote| vote.voter, progress).await;
        progress.on_voting_complete(result.is_ok());
        result
    }

    /// Ask all voters for a treasury recommendation in parallel
    pub async fn collect_recommendations(
        &self,
        context: &AutonomousContext,
    ) -> Result<Vec<Recommendation>, VoterError> {
        info!("Collecting recommendations from {} voters", self.voters.len());

        let mut join_set = JoinSet::new();
        for voter in &self.voters {
            let voter = Arc::clone(voter);
            let context = context.clone();
            join_set.spawn(async move { voter.recommend(&context).await });
        }

        drain(join_set, |rec: &Recommendation| rec.voter, &NoProgress).await
    }
}

/// Join every task, returning results in voter declaration order
///
/// Stops at the first failure; dropping the set aborts the tasks still
/// in flight.
async fn drain<T: Send + 'static>(
    mut join_set: JoinSet<Result<T, VoterError>>,
    voter_of: impl Fn(&T) -> VoterId,
    progress: &dyn ProgressNotifier,
) -> Result<Vec<T>, VoterError> {
    let mut collected = Vec::with_capacity(VoterId::ALL.len());

    while let Some(joined) = join_set.join_next().await {
        match joined {
            Ok(Ok(item)) => {
                let voter = voter_of(&item);
                info!("{} responded", voter.name());
                progress.on_voter_complete(voter, true);
                collected.push(item);
            }
            Ok(Err(e)) => {
                warn!("Aborting fan-out: {}", e);
                if let Some(voter) = e.voter() {
                    progress.on_voter_complete(voter, false);
                }
                join_set.abort_all();
                return Err(e);
            }
            Err(e) => {
                warn!("Voter task join error: {}", e);
                join_set.abort_all();
                return Err(VoterError::Task(e.to_string()));
            }
        }
    }

    collected.sort_by_key(|item| voter_of(item));
    Ok(collected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::reasoning_gateway::GatewayError;
    use crate::use_cases::test_support::{ScriptedGateway, recommendation_json, vote_json};
    use council_domain::{
        DecisionCategory, NewDecision, TreasuryAction, TreasurySnapshot, VoteChoice,
    };

    fn decision() -> Decision {
        Decision::create(NewDecision::new("Add dark mode", DecisionCategory::Feature)).unwrap()
    }

    #[test]
    fn test_new_requires_every_voter_once() {
        let gateway = Arc::new(ScriptedGateway::default());
        let missing = vec![
            VoterProfile::new(VoterId::Risk, "m"),
            VoterProfile::new(VoterId::Ethics, "m"),
        ];
        assert!(VoterPanel::new(Arc::clone(&gateway), missing, None).is_err());

        let duplicated = vec![
            VoterProfile::new(VoterId::Risk, "m"),
            VoterProfile::new(VoterId::Risk, "m"),
            VoterProfile::new(VoterId::Structure, "m"),
            VoterProfile::new(VoterId::Ethics, "m"),
        ];
        assert!(VoterPanel::new(Arc::clone(&gateway), duplicated, None).is_err());

        let shuffled = vec![
            VoterProfile::new(VoterId::Ethics, "c"),
            VoterProfile::new(VoterId::Risk, "a"),
            VoterProfile::new(VoterId::Structure, "b"),
        ];
        let panel = VoterPanel::new(gateway, shuffled, None).unwrap();
        let models: Vec<_> = panel.profiles().map(|p| p.model.as_str()).collect();
        assert_eq!(models, vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn test_collect_votes_in_declaration_order() {
        let gateway = ScriptedGateway::default()
            .respond(VoterId::Ethics, vote_json("reject", 40))
            .respond(VoterId::Risk, vote_json("approve", 80))
            .respond(VoterId::Structure, vote_json("approve", 70));
        let panel = VoterPanel::uniform(Arc::new(gateway), "m", None);

        let votes = panel.collect_votes(&decision()).await.unwrap();
        let voters: Vec<_> = votes.iter().map(|v| v.voter).collect();
        assert_eq!(voters, VoterId::ALL.to_vec());
        assert_eq!(votes[2].choice, VoteChoice::Reject);
    }

    #[tokio::test]
    async fn test_single_failure_aborts_votes() {
        let gateway = ScriptedGateway::default()
            .respond(VoterId::Risk, vote_json("approve", 80))
            .fail(VoterId::Structure, GatewayError::Timeout(60))
            .respond(VoterId::Ethics, vote_json("approve", 70));
        let panel = VoterPanel::uniform(Arc::new(gateway), "m", None);

        let err = panel.collect_votes(&decision()).await.unwrap_err();
        assert_eq!(err.voter(), Some(VoterId::Structure));
    }

    #[tokio::test]
    async fn test_recommendations_fail_on_unparseable_reply() {
        let gateway = ScriptedGateway::default()
            .respond(VoterId::Risk, recommendation_json("buyback", 80))
            .respond(VoterId::Structure, "no idea")
            .respond(VoterId::Ethics, recommendation_json("hold", 60));
        let panel = VoterPanel::uniform(Arc::new(gateway), "m", None);
        let context = AutonomousContext::new(TreasurySnapshot::default(), vec![]);

        let err = panel.collect_recommendations(&context).await.unwrap_err();
        assert!(matches!(err, VoterError::Parse { voter: VoterId::Structure, .. }));
    }

    #[tokio::test]
    async fn test_recommendations_collected() {
        let gateway = ScriptedGateway::default()
            .respond(VoterId::Risk, recommendation_json("buyback", 80))
            .respond(VoterId::Structure, recommendation_json("buyback", 60))
            .respond(VoterId::Ethics, recommendation_json("hold", 60));
        let panel = VoterPanel::uniform(Arc::new(gateway), "m", None);
        let context = AutonomousContext::new(TreasurySnapshot::default(), vec![]);

        let recs = panel.collect_recommendations(&context).await.unwrap();
        assert_eq!(recs.len(), 3);
        assert_eq!(recs[0].action, TreasuryAction::Buyback);
        assert_eq!(recs[2].action, TreasuryAction::Hold);
    }
}
