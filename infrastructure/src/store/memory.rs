//! In-memory decision store.
//!
//! Decisions keep insertion order so listing newest-first is a reverse walk.
//! The activity log is a plain append-only vector.

use async_trait::async_trait;
use council_application::ports::decision_store::{DecisionStore, StoreError};
use council_domain::{ActivityEntry, Decision, DecisionId};
use tokio::sync::RwLock;

#[derive(Default)]
struct Tables {
    decisions: Vec<Decision>,
    activity: Vec<ActivityEntry>,
}

/// Process-local store; contents are lost on exit
#[derive(Default)]
pub struct InMemoryDecisionStore {
    tables: RwLock<Tables>,
}

impl InMemoryDecisionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DecisionStore for InMemoryDecisionStore {
    async fn insert(&self, decision: Decision) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        if tables.decisions.iter().any(|d| d.id == decision.id) {
            return Err(StoreError::Duplicate(decision.id));
        }
        tables.decisions.push(decision);
        Ok(())
    }

    async fn update(&self, decision: Decision) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        let slot = tables
            .decisions
            .iter_mut()
            .find(|d| d.id == decision.id)
            .ok_or(StoreError::NotFound(decision.id))?;
        *slot = decision;
        Ok(())
    }

    async fn get(&self, id: DecisionId) -> Result<Option<Decision>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.decisions.iter().find(|d| d.id == id).cloned())
    }

    async fn list(&self) -> Result<Vec<Decision>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.decisions.iter().rev().cloned().collect())
    }

    async fn delete(&self, id: DecisionId) -> Result<Option<Decision>, StoreError> {
        let mut tables = self.tables.write().await;
        let Some(index) = tables.decisions.iter().position(|d| d.id == id) else {
            return Ok(None);
        };
        let removed = tables.decisions.remove(index);
        tables.activity.retain(|entry| entry.decision_id != id);
        Ok(Some(removed))
    }

    async fn append_activity(&self, entry: ActivityEntry) -> Result<(), StoreError> {
        self.tables.write().await.activity.push(entry);
        Ok(())
    }

    async fn activity(
        &self,
        decision: Option<DecisionId>,
        limit: Option<usize>,
    ) -> Result<Vec<ActivityEntry>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .activity
            .iter()
            .rev()
            .filter(|entry| decision.is_none_or(|id| entry.decision_id == id))
            .take(limit.unwrap_or(usize::MAX))
            .cloned()
            .collect())
    }
}
