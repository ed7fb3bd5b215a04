//! Deliberate use case
//!
//! Manual decisions: create, collect the three votes, compute consensus,
//! and every read/write around them. All writes to a decision go through
//! here, serialized per decision id.

use super::voter_adapter::VoterError;
use super::voter_panel::VoterPanel;
use crate::ports::audit_logger::{AuditEvent, AuditLogger, NoAuditLogger};
use crate::ports::decision_store::{DecisionStore, StoreError};
use crate::ports::progress::{NoProgress, ProgressNotifier};
use crate::ports::reasoning_gateway::ReasoningGateway;
use council_domain::{
    ActivityEntry, ActivityKind, Consensus, Decision, DecisionId, DomainError, NewDecision, Vote,
    VoterId, calculate_consensus,
};
use serde_json::json;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;
use tokio::sync::OwnedMutexGuard;
use tracing::{debug, info, warn};

/// Errors surfaced by deliberation operations
#[derive(Error, Debug)]
pub enum DeliberationError {
    #[error(transparent)]
    Validation(DomainError),

    #[error("Decision not found: {0}")]
    NotFound(DecisionId),

    #[error("Decision {id} was already deliberated ({})", .consensus.outcome)]
    AlreadyDeliberated {
        id: DecisionId,
        consensus: Box<Consensus>,
    },

    #[error("Decision {id} is still missing votes from: {}", voter_names(.missing))]
    MissingVoters { id: DecisionId, missing: Vec<VoterId> },

    #[error("Deliberation failed: {0}")]
    VoterFailed(#[from] VoterError),

    #[error("Consensus failed: {0}")]
    Consensus(DomainError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl DeliberationError {
    /// Request was malformed or conflicts with the decision's state
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            DeliberationError::Validation(_)
                | DeliberationError::NotFound(_)
                | DeliberationError::AlreadyDeliberated { .. }
                | DeliberationError::MissingVoters { .. }
        )
    }
}

fn voter_names(voters: &[VoterId]) -> String {
    voters
        .iter()
        .map(|v| v.name())
        .collect::<Vec<_>>()
        .join(", ")
}

/// A decision together with the consensus just reached for it
#[derive(Debug, Clone)]
pub struct DeliberationOutcome {
    pub decision: Decision,
    pub consensus: Consensus,
}

/// Use case for manual deliberation
pub struct DeliberateUseCase<G, S>
where
    G: ReasoningGateway + ?Sized + 'static,
    S: DecisionStore + ?Sized,
{
    panel: Arc<VoterPanel<G>>,
    store: Arc<S>,
    audit: Arc<dyn AuditLogger>,
    locks: LockTable,
}

impl<G, S> DeliberateUseCase<G, S>
where
    G: ReasoningGateway + ?Sized + 'static,
    S: DecisionStore + ?Sized,
{
    pub fn new(panel: Arc<VoterPanel<G>>, store: Arc<S>) -> Self {
        Self {
            panel,
            store,
            audit: Arc::new(NoAuditLogger),
            locks: Mutex::new(HashMap::new()),
        }
    }

    pub fn with_audit_logger(mut self, audit: Arc<dyn AuditLogger>) -> Self {
        self.audit = audit;
        self
    }

    // ==================== Writes ====================

    /// Validate and store a new pending decision
    pub async fn create_decision(&self, payload: NewDecision) -> Result<Decision, DeliberationError> {
        let decision = Decision::create(payload).map_err(DeliberationError::Validation)?;
        self.store.insert(decision.clone()).await?;

        info!(decision = %decision.id, title = %decision.title, "Decision created");
        self.record_activity(
            decision.id,
            ActivityKind::DecisionCreated,
            format!("Decision \"{}\" created", decision.title),
        )
        .await?;
        self.audit.log(AuditEvent::of("decision_created", &decision));
        Ok(decision)
    }

    pub async fn deliberate(&self, id: DecisionId) -> Result<DeliberationOutcome, DeliberationError> {
        self.deliberate_with_progress(id, &NoProgress).await
    }

    /// Ask all three voters, record their votes and compute consensus
    ///
    /// Rejected when the decision already reached consensus; the error
    /// carries that consensus unchanged. A failing voter aborts the whole
    /// deliberation and nothing is recorded.
    pub async fn deliberate_with_progress(
        &self,
        id: DecisionId,
        progress: &dyn ProgressNotifier,
    ) -> Result<DeliberationOutcome, DeliberationError> {
        let _lock = self.lock_decision(id).await;

        let mut decision = self.load(id).await?;
        Self::ensure_open(&decision)?;

        self.record_activity(
            id,
            ActivityKind::DeliberationStarted,
            format!("Council deliberation started for \"{}\"", decision.title),
        )
        .await?;

        let votes = match self
            .panel
            .collect_votes_with_progress(&decision, progress)
            .await
        {
            Ok(votes) => votes,
            Err(e) => {
                warn!(decision = %id, voter = ?e.voter(), error = %e, "Deliberation aborted");
                self.audit.log(AuditEvent::new(
                    "deliberation_failed",
                    json!({ "decision_id": id, "error": e.to_string() }),
                ));
                return Err(e.into());
            }
        };

        for vote in votes {
            decision.record_vote(vote);
        }
        self.store.update(decision.clone()).await?;
        for vote in decision.votes() {
            self.audit.log(AuditEvent::of("vote_cast", &VoteRecord::new(id, vote)));
        }
        self.record_activity(
            id,
            ActivityKind::DeliberationCompleted,
            "All three voters have voted",
        )
        .await?;

        let consensus = self.finalize(&mut decision).await?;
        Ok(DeliberationOutcome {
            decision,
            consensus,
        })
    }

    /// Create a decision and deliberate on it in one call
    pub async fn create_and_deliberate(
        &self,
        payload: NewDecision,
        progress: &dyn ProgressNotifier,
    ) -> Result<DeliberationOutcome, DeliberationError> {
        let decision = self.create_decision(payload).await?;
        self.deliberate_with_progress(decision.id, progress).await
    }

    /// Record one vote, replacing any earlier vote from the same voter
    pub async fn submit_vote(&self, id: DecisionId, vote: Vote) -> Result<Decision, DeliberationError> {
        let _lock = self.lock_decision(id).await;

        let mut decision = self.load(id).await?;
        Self::ensure_open(&decision)?;

        let record = AuditEvent::of("vote_cast", &VoteRecord::new(id, &vote));
        let voter = vote.voter;
        let completed = decision.record_vote(vote);
        self.store.update(decision.clone()).await?;
        self.audit.log(record);
        debug!(decision = %id, voter = %voter, "Vote recorded");

        if completed {
            self.record_activity(
                id,
                ActivityKind::DeliberationCompleted,
                "All three voters have voted",
            )
            .await?;
        }
        Ok(decision)
    }

    /// Compute consensus from the votes already recorded
    pub async fn compute_consensus(&self, id: DecisionId) -> Result<DeliberationOutcome, DeliberationError> {
        let _lock = self.lock_decision(id).await;

        let mut decision = self.load(id).await?;
        Self::ensure_open(&decision)?;
        Self::ensure_complete(&decision)?;

        let consensus = self.finalize(&mut decision).await?;
        Ok(DeliberationOutcome {
            decision,
            consensus,
        })
    }

    /// Remove a decision with its votes, consensus and activity
    pub async fn delete_decision(&self, id: DecisionId) -> Result<Decision, DeliberationError> {
        let _lock = self.lock_decision(id).await;

        let removed = self
            .store
            .delete(id)
            .await?
            .ok_or(DeliberationError::NotFound(id))?;
        self.record_activity(
            id,
            ActivityKind::DecisionDeleted,
            format!("Decision \"{}\" deleted", removed.title),
        )
        .await?;
        self.audit.log(AuditEvent::new(
            "decision_deleted",
            json!({ "decision_id": id, "title": removed.title }),
        ));
        info!(decision = %id, "Decision deleted");
        Ok(removed)
    }

    // ==================== Reads ====================

    pub async fn get_decision(&self, id: DecisionId) -> Result<Decision, DeliberationError> {
        self.load(id).await
    }

    /// All decisions, newest first
    pub async fn list_decisions(&self) -> Result<Vec<Decision>, DeliberationError> {
        Ok(self.store.list().await?)
    }

    pub async fn get_vote(&self, id: DecisionId, voter: VoterId) -> Result<Option<Vote>, DeliberationError> {
        Ok(self.load(id).await?.vote_of(voter).cloned())
    }

    /// The stored consensus; `None` while all votes are in but none was computed
    pub async fn get_consensus(&self, id: DecisionId) -> Result<Option<Consensus>, DeliberationError> {
        let decision = self.load(id).await?;
        if let Some(consensus) = decision.consensus() {
            return Ok(Some(consensus.clone()));
        }
        Self::ensure_complete(&decision)?;
        Ok(None)
    }

    /// Activity newest first, optionally for one decision
    pub async fn list_activity(
        &self,
        decision: Option<DecisionId>,
        limit: Option<usize>,
    ) -> Result<Vec<ActivityEntry>, DeliberationError> {
        Ok(self.store.activity(decision, limit).await?)
    }

    // ==================== Internals ====================

    async fn load(&self, id: DecisionId) -> Result<Decision, DeliberationError> {
        self.store
            .get(id)
            .await?
            .ok_or(DeliberationError::NotFound(id))
    }

    fn ensure_open(decision: &Decision) -> Result<(), DeliberationError> {
        match decision.consensus() {
            Some(consensus) => Err(DeliberationError::AlreadyDeliberated {
                id: decision.id,
                consensus: Box::new(consensus.clone()),
            }),
            None => Ok(()),
        }
    }

    fn ensure_complete(decision: &Decision) -> Result<(), DeliberationError> {
        let missing = decision.missing_voters();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(DeliberationError::MissingVoters {
                id: decision.id,
                missing,
            })
        }
    }

    async fn finalize(&self, decision: &mut Decision) -> Result<Consensus, DeliberationError> {
        let consensus = calculate_consensus(decision.votes()).map_err(DeliberationError::Consensus)?;
        decision.attach_consensus(consensus.clone());
        self.store.update(decision.clone()).await?;

        info!(
            decision = %decision.id,
            outcome = %consensus.outcome,
            unanimous = consensus.unanimous,
            "Consensus reached"
        );
        self.record_activity(
            decision.id,
            ActivityKind::for_outcome(consensus.outcome),
            format!(
                "Council {} \"{}\" ({})",
                consensus.outcome,
                decision.title,
                consensus.vote_summary.glyphs()
            ),
        )
        .await?;
        self.audit.log(AuditEvent::new(
            "consensus",
            json!({ "decision_id": decision.id, "consensus": consensus }),
        ));
        Ok(consensus)
    }

    async fn record_activity(
        &self,
        id: DecisionId,
        kind: ActivityKind,
        message: impl Into<String>,
    ) -> Result<(), DeliberationError> {
        let entry = ActivityEntry::new(id, kind, message);
        self.audit.log(AuditEvent::of("activity", &entry));
        self.store.append_activity(entry).await?;
        Ok(())
    }

    async fn lock_decision(&self, id: DecisionId) -> DecisionLock<'_> {
        let lock = {
            let mut locks = self.locks.lock().unwrap_or_else(|e| e.into_inner());
            Arc::clone(locks.entry(id).or_default())
        };
        DecisionLock {
            locks: &self.locks,
            id,
            guard: Some(lock.lock_owned().await),
        }
    }

    #[cfg(test)]
    fn tracked_locks(&self) -> usize {
        self.locks.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}

type LockTable = Mutex<HashMap<DecisionId, Arc<tokio::sync::Mutex<()>>>>;

/// Exclusive hold on one decision id
///
/// Dropping it releases the id, and forgets the id's lock once no other
/// caller is holding or waiting on it.
struct DecisionLock<'a> {
    locks: &'a LockTable,
    id: DecisionId,
    guard: Option<OwnedMutexGuard<()>>,
}

impl Drop for DecisionLock<'_> {
    fn drop(&mut self) {
        let mut locks = self.locks.lock().unwrap_or_else(|e| e.into_inner());
        self.guard.take();
        if locks
            .get(&self.id)
            .is_some_and(|lock| Arc::strong_count(lock) == 1)
        {
            locks.remove(&self.id);
        }
    }
}

/// Audit payload for a recorded vote
#[derive(serde::Serialize)]
struct VoteRecord<'a> {
    decision_id: DecisionId,
    #[serde(flatten)]
    vote: &'a Vote,
}

impl<'a> VoteRecord<'a> {
    fn new(decision_id: DecisionId, vote: &'a Vote) -> Self {
        Self { decision_id, vote }
    }
}
