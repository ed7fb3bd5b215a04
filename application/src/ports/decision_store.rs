//! Decision store port
//!
//! Persistence for manually submitted decisions (with their votes and
//! consensus) and the activity log. Only the deliberation use case writes
//! through it.

use async_trait::async_trait;
use council_domain::{ActivityEntry, Decision, DecisionId};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    #[error("Decision not found: {0}")]
    NotFound(DecisionId),

    #[error("Decision already exists: {0}")]
    Duplicate(DecisionId),

    #[error("Storage backend error: {0}")]
    Backend(String),
}

/// Storage for decisions and the append-only activity log
#[async_trait]
pub trait DecisionStore: Send + Sync {
    /// Insert a new decision
    async fn insert(&self, decision: Decision) -> Result<(), StoreError>;

    /// Replace a stored decision (votes, consensus and derived status)
    async fn update(&self, decision: Decision) -> Result<(), StoreError>;

    async fn get(&self, id: DecisionId) -> Result<Option<Decision>, StoreError>;

    /// All decisions, newest first
    async fn list(&self) -> Result<Vec<Decision>, StoreError>;

    /// Remove a decision together with its votes, consensus and activity
    async fn delete(&self, id: DecisionId) -> Result<Option<Decision>, StoreError>;

    async fn append_activity(&self, entry: ActivityEntry) -> Result<(), StoreError>;

    /// Activity newest first, optionally for one decision and capped at `limit`
    async fn activity(
        &self,
        decision: Option<DecisionId>,
        limit: Option<usize>,
    ) -> Result<Vec<ActivityEntry>, StoreError>;
}
