//! Port for the structured audit trail.
//!
//! Defines the [`AuditLogger`] trait for recording votes, consensus results,
//! activity entries and autonomous decisions to an append-only log.
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostic messages, while this port captures the decision
//! record in a machine-readable format (JSONL).

use serde::Serialize;
use serde_json::Value;

/// A structured audit event.
pub struct AuditEvent {
    /// Event type identifier (e.g., "vote_cast", "consensus", "autonomous_decision").
    pub event_type: &'static str,
    /// JSON payload with event-specific data.
    pub payload: Value,
}

impl AuditEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }

    /// Build an event from any serializable record
    pub fn of<T: Serialize>(event_type: &'static str, record: &T) -> Self {
        Self::new(
            event_type,
            serde_json::to_value(record).unwrap_or(Value::Null),
        )
    }
}

/// Port for logging audit events.
///
/// The `log` method is synchronous and non-fallible: a failing audit sink
/// never disrupts deliberation or a cycle.
pub trait AuditLogger: Send + Sync {
    fn log(&self, event: AuditEvent);
}

/// No-op implementation for tests and when the audit log is disabled.
pub struct NoAuditLogger;

impl AuditLogger for NoAuditLogger {
    fn log(&self, _event: AuditEvent) {}
}
