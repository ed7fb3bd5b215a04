//! Output formatter trait

use crate::cli::commands::OutputFormat;
use council_application::EngineStatus;
use council_domain::{ActivityEntry, AutonomousDecision, Decision, Vote};

/// Trait for rendering council entities
pub trait OutputFormatter: Send + Sync {
    /// One decision with its votes and consensus
    fn format_decision(&self, decision: &Decision) -> String;

    /// Decision listing, newest first
    fn format_decisions(&self, decisions: &[Decision]) -> String;

    /// A single ballot
    fn format_vote(&self, vote: &Vote) -> String;

    /// Activity feed, newest first
    fn format_activity(&self, entries: &[ActivityEntry]) -> String;

    /// Result of one autonomous cycle
    fn format_autonomous(&self, decision: &AutonomousDecision) -> String;

    /// Autonomous history, newest first
    fn format_history(&self, history: &[AutonomousDecision]) -> String;

    /// Engine status snapshot
    fn format_status(&self, status: &EngineStatus) -> String;
}

/// Pick the formatter for an output format
pub fn formatter_for(format: OutputFormat) -> Box<dyn OutputFormatter> {
    match format {
        OutputFormat::Text => Box::new(crate::output::console::ConsoleFormatter),
        OutputFormat::Json => Box::new(crate::output::json::JsonFormatter),
    }
}
