//! Autonomous treasury engine
//!
//! A periodic state machine (`stopped` / `running`) that runs one cycle per
//! timer tick:
//!
//! 1. Snapshot treasury context plus the last five actions taken
//! 2. Ask all three voters for a recommendation (strict, all-or-nothing)
//! 3. Apply the quorum rule
//! 4. Execute the chosen action when the gate allows it
//! 5. Push the resulting record onto the bounded history
//!
//! A failing cycle never stops the engine; it yields a degraded `hold`
//! record instead.

use super::voter_adapter::VoterError;
use super::voter_panel::VoterPanel;
use crate::config::{EngineParams, ExecutionPolicy};
use crate::ports::audit_logger::{AuditEvent, AuditLogger, NoAuditLogger};
use crate::ports::context_provider::{ContextError, ContextProvider};
use crate::ports::execution_dispatcher::ExecutionDispatcher;
use crate::ports::reasoning_gateway::ReasoningGateway;
use chrono::{DateTime, Utc};
use council_domain::autonomous::quorum::EXECUTION_MIN_APPROVALS;
use council_domain::{
    AutonomousContext, AutonomousDecision, DecisionHistory, QuorumVerdict, TreasurySnapshot,
    decide_action,
};
use serde::Serialize;
use std::sync::{Arc, Mutex, MutexGuard, Weak};
use thiserror::Error;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

/// Why a cycle was aborted
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CycleError {
    #[error("Context unavailable: {0}")]
    Context(#[from] ContextError),

    #[error(transparent)]
    Voter(#[from] VoterError),
}

/// Snapshot of the engine for status queries
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EngineStatus {
    pub running: bool,
    pub last_cycle_at: Option<DateTime<Utc>>,
    /// Records currently held in history (bounded)
    pub total_decisions: usize,
    /// Cycles run since the engine was built, timer and manual
    pub total_cycles: u64,
    pub interval_ms: u64,
}

struct Timer {
    token: CancellationToken,
    _handle: JoinHandle<()>,
}

struct EngineState {
    timer: Option<Timer>,
    history: DecisionHistory,
    last_cycle_at: Option<DateTime<Utc>>,
    total_cycles: u64,
}

/// The autonomous cycle engine
pub struct AutonomousEngine<G, C, E>
where
    G: ReasoningGateway + ?Sized + 'static,
    C: ContextProvider + ?Sized + 'static,
    E: ExecutionDispatcher + ?Sized + 'static,
{
    panel: Arc<VoterPanel<G>>,
    context: Arc<C>,
    dispatcher: Arc<E>,
    policy: ExecutionPolicy,
    params: EngineParams,
    audit: Arc<dyn AuditLogger>,
    state: Mutex<EngineState>,
}

impl<G, C, E> AutonomousEngine<G, C, E>
where
    G: ReasoningGateway + ?Sized + 'static,
    C: ContextProvider + ?Sized + 'static,
    E: ExecutionDispatcher + ?Sized + 'static,
{
    pub fn new(panel: Arc<VoterPanel<G>>, context: Arc<C>, dispatcher: Arc<E>) -> Self {
        Self {
            panel,
            context,
            dispatcher,
            policy: ExecutionPolicy::default(),
            params: EngineParams::default(),
            audit: Arc::new(NoAuditLogger),
            state: Mutex::new(EngineState {
                timer: None,
                history: DecisionHistory::new(),
                last_cycle_at: None,
                total_cycles: 0,
            }),
        }
    }

    pub fn with_policy(mut self, policy: ExecutionPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_params(mut self, params: EngineParams) -> Self {
        self.params = params;
        self
    }

    pub fn with_audit_logger(mut self, audit: Arc<dyn AuditLogger>) -> Self {
        self.audit = audit;
        self
    }

    // ==================== Lifecycle ====================

    /// Start the cycle timer; returns `false` if it was already running
    ///
    /// The first timer cycle fires one interval after start.
    pub fn start(self: &Arc<Self>) -> bool {
        let mut state = self.state();
        if state.timer.is_some() {
            info!("Autonomous engine already running");
            return false;
        }

        let period = self.params.cycle_interval;
        let token = CancellationToken::new();
        let engine: Weak<Self> = Arc::downgrade(self);
        let cancelled = token.clone();

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    _ = cancelled.cancelled() => break,
                    _ = ticker.tick() => {
                        let Some(engine) = engine.upgrade() else { break };
                        engine.run_cycle().await;
                    }
                }
            }
        });

        state.timer = Some(Timer {
            token,
            _handle: handle,
        });
        info!(interval_ms = period.as_millis() as u64, "Autonomous engine started");
        true
    }

    /// Stop the cycle timer; returns `false` if it was not running
    ///
    /// A cycle already in flight finishes and is recorded.
    pub fn stop(&self) -> bool {
        match self.state().timer.take() {
            Some(timer) => {
                timer.token.cancel();
                info!("Autonomous engine stopped");
                true
            }
            None => {
                info!("Autonomous engine already stopped");
                false
            }
        }
    }

    pub fn is_running(&self) -> bool {
        self.state().timer.is_some()
    }

    pub fn status(&self) -> EngineStatus {
        let state = self.state();
        EngineStatus {
            running: state.timer.is_some(),
            last_cycle_at: state.last_cycle_at,
            total_decisions: state.history.len(),
            total_cycles: state.total_cycles,
            interval_ms: self.params.cycle_interval.as_millis() as u64,
        }
    }

    /// Most recent records, newest first
    pub fn history(&self, limit: usize) -> Vec<AutonomousDecision> {
        self.state().history.recent(limit)
    }

    // ==================== Cycle ====================

    /// Run exactly one cycle and return its record
    ///
    /// Independent of the timer: callable while stopped or running, and does
    /// not change the running state.
    pub async fn run_cycle(&self) -> AutonomousDecision {
        info!("Starting autonomous cycle");

        let record = match self.deliberate().await {
            Ok((verdict, record, snapshot)) => self.execute(&verdict, record, &snapshot).await,
            Err(e) => {
                warn!(error = %e, "Autonomous cycle aborted");
                AutonomousDecision::aborted(e.to_string())
            }
        };

        info!(
            action = %record.action,
            executed = record.executed,
            votes = %record.votes.glyphs(),
            "Autonomous cycle complete"
        );
        self.audit.log(AuditEvent::of("autonomous_decision", &record));

        let mut state = self.state();
        state.history.push(record.clone());
        state.last_cycle_at = Some(record.timestamp);
        state.total_cycles += 1;
        record
    }

    async fn deliberate(
        &self,
    ) -> Result<(QuorumVerdict, AutonomousDecision, TreasurySnapshot), CycleError> {
        let snapshot = self.context.snapshot().await?;
        let recent_actions = self.state().history.recent_actions();
        let context = AutonomousContext::new(snapshot.clone(), recent_actions);

        let recommendations = self.panel.collect_recommendations(&context).await?;
        let verdict = decide_action(&recommendations);
        let record = AutonomousDecision::from_verdict(&verdict, recommendations);
        Ok((verdict, record, snapshot))
    }

    async fn execute(
        &self,
        verdict: &QuorumVerdict,
        record: AutonomousDecision,
        snapshot: &TreasurySnapshot,
    ) -> AutonomousDecision {
        if verdict.action.is_hold() {
            return record;
        }
        if !verdict.should_execute() {
            let note = format!(
                "not executed: {} of {} required approvals",
                verdict.votes.approve, EXECUTION_MIN_APPROVALS
            );
            info!(action = %verdict.action, "{}", note);
            return record.with_execution(false, Some(note));
        }
        let Some(order) = self.policy.order_for(verdict.action, snapshot) else {
            return record;
        };

        info!(?order, "Executing treasury action");
        match self.dispatcher.execute(&order).await {
            Ok(receipt) => {
                if !receipt.success {
                    warn!(action = %verdict.action, result = %receipt.summary(), "Execution failed");
                }
                record.with_execution(receipt.success, Some(receipt.summary()))
            }
            Err(e) => {
                error!(action = %verdict.action, error = %e, "Execution dispatch failed");
                record.with_execution(false, Some(e.to_string()))
            }
        }
    }

    fn state(&self) -> MutexGuard<'_, EngineState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl<G, C, E> Drop for AutonomousEngine<G, C, E>
where
    G: ReasoningGateway + ?Sized + 'static,
    C: ContextProvider + ?Sized + 'static,
    E: ExecutionDispatcher + ?Sized + 'static,
{
    fn drop(&mut self) {
        if let Some(timer) = self.state().timer.take() {
            timer.token.cancel();
        }
    }
}
