//! Bounded, newest-first history of autonomous decisions

use super::action::TreasuryAction;
use super::decision::AutonomousDecision;
use std::collections::VecDeque;

/// Maximum number of retained autonomous decisions
pub const HISTORY_CAPACITY: usize = 100;

/// Number of recent actions fed back into the next cycle's context
pub const RECENT_ACTIONS_WINDOW: usize = 5;

/// In-memory history; the oldest entries are evicted silently past capacity
#[derive(Debug, Clone)]
pub struct DecisionHistory {
    entries: VecDeque<AutonomousDecision>,
    capacity: usize,
}

impl DecisionHistory {
    pub fn new() -> Self {
        Self::with_capacity(HISTORY_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Insert at the front, truncating from the tail
    pub fn push(&mut self, decision: AutonomousDecision) {
        self.entries.push_front(decision);
        self.entries.truncate(self.capacity);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn latest(&self) -> Option<&AutonomousDecision> {
        self.entries.front()
    }

    /// Entries newest first
    pub fn iter(&self) -> impl Iterator<Item = &AutonomousDecision> {
        self.entries.iter()
    }

    /// Up to `limit` entries, newest first
    pub fn recent(&self, limit: usize) -> Vec<AutonomousDecision> {
        self.entries.iter().take(limit).cloned().collect()
    }

    /// Actions of the most recent decisions, newest first
    pub fn recent_actions(&self) -> Vec<TreasuryAction> {
        self.entries
            .iter()
            .take(RECENT_ACTIONS_WINDOW)
            .map(|d| d.action)
            .collect()
    }
}

impl Default for DecisionHistory {
    fn default() -> Self {
        Self::new()
    }
}
