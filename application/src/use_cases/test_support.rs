//! Shared mocks for use case tests

use crate::ports::audit_logger::{AuditEvent, AuditLogger};
use crate::ports::context_provider::{ContextError, ContextProvider};
use crate::ports::decision_store::{DecisionStore, StoreError};
use crate::ports::execution_dispatcher::{
    ExecutionDispatcher, ExecutionError, ExecutionOrder, ExecutionReceipt,
};
use crate::ports::reasoning_gateway::{GatewayError, ReasoningGateway, ReasoningRequest};
use async_trait::async_trait;
use council_domain::{ActivityEntry, Decision, DecisionId, TreasurySnapshot, VoterId};
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

pub fn vote_json(choice: &str, confidence: u8) -> String {
    format!(
        r#"{{"vote": "{choice}", "reasoning": "because {choice}", "confidence": {confidence}, "recommendations": ["ship it behind a flag"]}}"#
    )
}

pub fn recommendation_json(action: &str, confidence: u8) -> String {
    format!(
        r#"{{"action": "{action}", "reasoning": "prefer {action}", "confidence": {confidence}}}"#
    )
}

/// Gateway answering per voter from a script
///
/// Each voter has a queue of replies; the last reply repeats once the queue
/// is down to one entry. The voter is recognized from its system prompt.
#[derive(Default)]
pub struct ScriptedGateway {
    replies: Mutex<HashMap<VoterId, VecDeque<Result<String, GatewayError>>>>,
    delay: Option<Duration>,
    calls: AtomicUsize,
}

impl ScriptedGateway {
    pub fn respond(self, voter: VoterId, reply: impl Into<String>) -> Self {
        self.push(voter, Ok(reply.into()))
    }

    pub fn fail(self, voter: VoterId, error: GatewayError) -> Self {
        self.push(voter, Err(error))
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn push(self, voter: VoterId, reply: Result<String, GatewayError>) -> Self {
        self.replies
            .lock()
            .unwrap()
            .entry(voter)
            .or_default()
            .push_back(reply);
        self
    }

    fn voter_of(request: &ReasoningRequest) -> VoterId {
        VoterId::ALL
            .into_iter()
            .find(|v| request.system_prompt.contains(&format!("You are {},", v.name())))
            .expect("request carries a voter system prompt")
    }
}

#[async_trait]
impl ReasoningGateway for ScriptedGateway {
    async fn complete(&self, request: &ReasoningRequest) -> Result<String, GatewayError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let voter = Self::voter_of(request);
        let mut replies = self.replies.lock().unwrap();
        let queue = replies
            .get_mut(&voter)
            .unwrap_or_else(|| panic!("no scripted reply for {}", voter));
        if queue.len() > 1 {
            queue.pop_front().unwrap()
        } else {
            queue.front().cloned().unwrap()
        }
    }
}

/// Minimal in-memory store
#[derive(Default)]
pub struct MemoryStore {
    decisions: Mutex<Vec<Decision>>,
    activity: Mutex<Vec<ActivityEntry>>,
    reject_updates: AtomicBool,
}

impl MemoryStore {
    /// Make every later `update` fail with a backend error
    pub fn reject_updates(&self) {
        self.reject_updates.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl DecisionStore for MemoryStore {
    async fn insert(&self, decision: Decision) -> Result<(), StoreError> {
        let mut decisions = self.decisions.lock().unwrap();
        if decisions.iter().any(|d| d.id == decision.id) {
            return Err(StoreError::Duplicate(decision.id));
        }
        decisions.push(decision);
        Ok(())
    }

    async fn update(&self, decision: Decision) -> Result<(), StoreError> {
        if self.reject_updates.load(Ordering::SeqCst) {
            return Err(StoreError::Backend("disk full".into()));
        }
        let mut decisions = self.decisions.lock().unwrap();
        let slot = decisions
            .iter_mut()
            .find(|d| d.id == decision.id)
            .ok_or(StoreError::NotFound(decision.id))?;
        *slot = decision;
        Ok(())
    }

    async fn get(&self, id: DecisionId) -> Result<Option<Decision>, StoreError> {
        Ok(self
            .decisions
            .lock()
            .unwrap()
            .iter()
            .find(|d| d.id == id)
            .cloned())
    }

    async fn list(&self) -> Result<Vec<Decision>, StoreError> {
        Ok(self.decisions.lock().unwrap().iter().rev().cloned().collect())
    }

    async fn delete(&self, id: DecisionId) -> Result<Option<Decision>, StoreError> {
        let mut decisions = self.decisions.lock().unwrap();
        let Some(index) = decisions.iter().position(|d| d.id == id) else {
            return Ok(None);
        };
        self.activity
            .lock()
            .unwrap()
            .retain(|e| e.decision_id != id);
        Ok(Some(decisions.remove(index)))
    }

    async fn append_activity(&self, entry: ActivityEntry) -> Result<(), StoreError> {
        self.activity.lock().unwrap().push(entry);
        Ok(())
    }

    async fn activity(
        &self,
        decision: Option<DecisionId>,
        limit: Option<usize>,
    ) -> Result<Vec<ActivityEntry>, StoreError> {
        Ok(self
            .activity
            .lock()
            .unwrap()
            .iter()
            .rev()
            .filter(|e| decision.is_none_or(|id| e.decision_id == id))
            .take(limit.unwrap_or(usize::MAX))
            .cloned()
            .collect())
    }
}

/// Context provider returning a fixed snapshot, or failing
pub struct FixedContext(pub Result<TreasurySnapshot, ContextError>);

impl FixedContext {
    pub fn balance(sol_balance: f64) -> Self {
        Self(Ok(TreasurySnapshot {
            sol_balance,
            ..TreasurySnapshot::default()
        }))
    }
}

#[async_trait]
impl ContextProvider for FixedContext {
    async fn snapshot(&self) -> Result<TreasurySnapshot, ContextError> {
        self.0.clone()
    }
}

/// Dispatcher that records orders and answers with a fixed receipt
pub struct RecordingDispatcher {
    reply: Result<ExecutionReceipt, ExecutionError>,
    orders: Mutex<Vec<ExecutionOrder>>,
}

impl RecordingDispatcher {
    pub fn succeeding() -> Self {
        Self::replying(Ok(ExecutionReceipt::succeeded(Some("sig123".into()))))
    }

    pub fn replying(reply: Result<ExecutionReceipt, ExecutionError>) -> Self {
        Self {
            reply,
            orders: Mutex::new(Vec::new()),
        }
    }

    pub fn orders(&self) -> Vec<ExecutionOrder> {
        self.orders.lock().unwrap().clone()
    }
}

#[async_trait]
impl ExecutionDispatcher for RecordingDispatcher {
    async fn execute(&self, order: &ExecutionOrder) -> Result<ExecutionReceipt, ExecutionError> {
        self.orders.lock().unwrap().push(order.clone());
        self.reply.clone()
    }
}

/// Audit logger keeping event types in order
#[derive(Default)]
pub struct RecordingAudit {
    events: Mutex<Vec<&'static str>>,
}

impl RecordingAudit {
    pub fn events(&self) -> Vec<&'static str> {
        self.events.lock().unwrap().clone()
    }
}

impl AuditLogger for RecordingAudit {
    fn log(&self, event: AuditEvent) {
        self.events.lock().unwrap().push(event.event_type);
    }
}
