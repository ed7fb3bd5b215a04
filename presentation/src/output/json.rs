//! JSON output formatter

use crate::output::formatter::OutputFormatter;
use council_application::EngineStatus;
use council_domain::{ActivityEntry, AutonomousDecision, Decision, Vote};
use serde::Serialize;

/// Formats entities as pretty-printed JSON
pub struct JsonFormatter;

impl JsonFormatter {
    pub fn to_json<T: Serialize + ?Sized>(value: &T) -> String {
        serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_decision(&self, decision: &Decision) -> String {
        Self::to_json(decision)
    }

    fn format_decisions(&self, decisions: &[Decision]) -> String {
        Self::to_json(decisions)
    }

    fn format_vote(&self, vote: &Vote) -> String {
        Self::to_json(vote)
    }

    fn format_activity(&self, entries: &[ActivityEntry]) -> String {
        Self::to_json(entries)
    }

    fn format_autonomous(&self, decision: &AutonomousDecision) -> String {
        Self::to_json(decision)
    }

    fn format_history(&self, history: &[AutonomousDecision]) -> String {
        Self::to_json(history)
    }

    fn format_status(&self, status: &EngineStatus) -> String {
        Self::to_json(status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use council_domain::{DecisionCategory, NewDecision};

    #[test]
    fn test_decision_json_carries_status() {
        let decision =
            Decision::create(NewDecision::new("Add dark mode", DecisionCategory::Feature)).unwrap();
        let json: serde_json::Value =
            serde_json::from_str(&JsonFormatter.format_decision(&decision)).unwrap();
        assert_eq!(json["title"], "Add dark mode");
        assert_eq!(json["status"], "pending");
        assert_eq!(json["votes"], serde_json::json!([]));
    }

    #[test]
    fn test_aborted_cycle_json() {
        let record = AutonomousDecision::aborted("Context unavailable: down");
        let json: serde_json::Value =
            serde_json::from_str(&JsonFormatter.format_autonomous(&record)).unwrap();
        assert_eq!(json["action"], "hold");
        assert_eq!(json["executed"], false);
    }
}
