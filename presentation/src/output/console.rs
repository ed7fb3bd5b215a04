//! Console output formatter for council entities

use crate::output::formatter::OutputFormatter;
use colored::{ColoredString, Colorize};
use council_application::EngineStatus;
use council_domain::core::string::{single_line, truncate};
use council_domain::{
    ActivityEntry, AutonomousDecision, ConsensusOutcome, Decision, DecisionId, DecisionStatus,
    TreasuryAction, Vote, VoteChoice,
};

/// Longest title or result shown on a one-line listing
const LIST_TITLE_LEN: usize = 60;

/// Formats council entities for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format a decision with its ballots and, once reached, the consensus
    pub fn format_decision(decision: &Decision) -> String {
        let mut output = String::new();

        output.push_str(&Self::header(&decision.title));
        output.push('\n');
        output.push_str(&format!("{} {}\n", "ID:".cyan().bold(), decision.id));
        output.push_str(&format!(
            "{} {}   {} {}\n",
            "Category:".cyan().bold(),
            decision.category,
            "Priority:".cyan().bold(),
            decision.priority
        ));
        output.push_str(&format!(
            "{} {}\n",
            "Status:".cyan().bold(),
            Self::status_label(decision.status())
        ));

        if !decision.description.is_empty() {
            output.push_str(&format!("\n{}\n", Self::indent(&decision.description, "  ")));
        }
        if let Some(context) = &decision.context {
            output.push_str(&format!(
                "\n{}\n{}\n",
                "Context:".cyan().bold(),
                Self::indent(context, "  ")
            ));
        }

        output.push_str(&Self::section_header("Votes"));
        if decision.votes().is_empty() {
            output.push_str(&format!("  {}\n", "No votes yet".dimmed()));
        }
        for vote in decision.votes() {
            output.push_str(&Self::format_vote(vote));
        }
        let missing = decision.missing_voters();
        if !decision.votes().is_empty() && !missing.is_empty() {
            let names: Vec<_> = missing.iter().map(|v| v.name()).collect();
            output.push_str(&format!(
                "\n  {} {}\n",
                "Waiting on:".yellow(),
                names.join(", ")
            ));
        }

        if let Some(consensus) = decision.consensus() {
            output.push_str(&Self::section_header("Consensus"));
            output.push_str(&format!(
                "\n  {} {}{}\n",
                Self::outcome_label(consensus.outcome),
                consensus.vote_summary.glyphs(),
                if consensus.unanimous { " (unanimous)" } else { "" }
            ));
            output.push_str(&format!("\n{}\n", Self::indent(&consensus.reasoning, "  ")));

            if !consensus.action_items.is_empty() {
                output.push_str(&format!("\n{}\n", "Action Items:".green().bold()));
                for item in &consensus.action_items {
                    output.push_str(&format!("  * {}\n", item));
                }
            }
        }

        output.push_str(&Self::footer());
        output
    }

    /// One line per decision
    pub fn format_decisions(decisions: &[Decision]) -> String {
        if decisions.is_empty() {
            return format!("{}\n", "No decisions yet".dimmed());
        }

        decisions
            .iter()
            .map(|d| {
                let outcome = d
                    .consensus()
                    .map(|c| format!(" {} {}", Self::outcome_label(c.outcome), c.vote_summary.glyphs()))
                    .unwrap_or_default();
                format!(
                    "{}  {:<18} {:<10} {}{}\n",
                    Self::short_id(&d.id).yellow(),
                    Self::status_label(d.status()),
                    d.category.as_str(),
                    truncate(&single_line(&d.title), LIST_TITLE_LEN),
                    outcome
                )
            })
            .collect()
    }

    /// A single ballot, indented under its voter
    pub fn format_vote(vote: &Vote) -> String {
        let mut output = format!(
            "\n{} {} {}\n",
            format!("── {} ({}) ──", vote.voter.name(), vote.voter.role())
                .yellow()
                .bold(),
            Self::choice_label(vote.choice),
            format!("{}%", vote.confidence).dimmed()
        );
        output.push_str(&Self::indent(&vote.reasoning, "  "));
        output.push('\n');

        if !vote.risks.is_empty() {
            output.push_str(&format!("  {}\n", "Risks:".red()));
            for risk in &vote.risks {
                output.push_str(&format!("    * {}\n", risk));
            }
        }
        if !vote.recommendations.is_empty() {
            output.push_str(&format!("  {}\n", "Recommendations:".green()));
            for rec in &vote.recommendations {
                output.push_str(&format!("    * {}\n", rec));
            }
        }
        output
    }

    pub fn format_activity(entries: &[ActivityEntry]) -> String {
        if entries.is_empty() {
            return format!("{}\n", "No activity".dimmed());
        }

        entries
            .iter()
            .map(|e| {
                format!(
                    "{} {} {:<26} {}\n",
                    e.timestamp.format("%Y-%m-%d %H:%M:%S").to_string().dimmed(),
                    Self::short_id(&e.decision_id).yellow(),
                    e.kind.as_str(),
                    e.message
                )
            })
            .collect()
    }

    /// Format one autonomous cycle result
    pub fn format_autonomous(decision: &AutonomousDecision) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("Autonomous Treasury Cycle"));
        output.push('\n');
        output.push_str(&format!(
            "{} {} {}\n",
            "Action:".cyan().bold(),
            Self::action_label(decision.action),
            decision.votes.glyphs()
        ));
        output.push_str(&format!(
            "{} {}\n",
            "Executed:".cyan().bold(),
            if decision.executed {
                "yes".green()
            } else {
                "no".normal()
            }
        ));
        if let Some(result) = &decision.result {
            output.push_str(&format!("{} {}\n", "Result:".cyan().bold(), result));
        }

        output.push_str(&Self::section_header("Reasoning"));
        output.push_str(&format!("\n{}\n", Self::indent(&decision.reasoning, "  ")));

        if !decision.recommendations.is_empty() {
            output.push_str(&Self::section_header("Recommendations"));
            for rec in &decision.recommendations {
                output.push_str(&format!(
                    "\n{} {} {}\n",
                    format!("── {} ──", rec.voter.name()).yellow().bold(),
                    rec.action,
                    format!("{}%", rec.confidence).dimmed()
                ));
                output.push_str(&Self::indent(&rec.reasoning, "  "));
                output.push('\n');
            }
        }

        output.push_str(&Self::footer());
        output
    }

    pub fn format_history(history: &[AutonomousDecision]) -> String {
        if history.is_empty() {
            return format!("{}\n", "No autonomous decisions yet".dimmed());
        }

        history
            .iter()
            .map(|d| {
                format!(
                    "{} {:<14} {} {}{}\n",
                    d.timestamp.format("%Y-%m-%d %H:%M:%S").to_string().dimmed(),
                    Self::action_label(d.action),
                    d.votes.glyphs(),
                    if d.executed { "executed".green() } else { "not executed".dimmed() },
                    d.result
                        .as_deref()
                        .map(|r| format!(" ({})", truncate(&single_line(r), LIST_TITLE_LEN)))
                        .unwrap_or_default()
                )
            })
            .collect()
    }

    pub fn format_status(status: &EngineStatus) -> String {
        let state = if status.running {
            "running".green().bold()
        } else {
            "stopped".yellow().bold()
        };
        let last = status
            .last_cycle_at
            .map(|t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string())
            .unwrap_or_else(|| "never".to_string());

        format!(
            "{} {}\n{} {} ms\n{} {}\n{} {}\n{} {}\n",
            "Engine:".cyan().bold(),
            state,
            "Interval:".cyan().bold(),
            status.interval_ms,
            "Last cycle:".cyan().bold(),
            last,
            "Cycles run:".cyan().bold(),
            status.total_cycles,
            "Decisions kept:".cyan().bold(),
            status.total_decisions
        )
    }

    fn status_label(status: DecisionStatus) -> ColoredString {
        match status {
            DecisionStatus::Pending => status.as_str().normal(),
            DecisionStatus::Deliberating => status.as_str().yellow(),
            DecisionStatus::ConsensusReached => status.as_str().green(),
            DecisionStatus::Deadlock => status.as_str().red(),
        }
    }

    fn outcome_label(outcome: ConsensusOutcome) -> ColoredString {
        let label = outcome.as_str().to_uppercase();
        match outcome {
            ConsensusOutcome::Approved => label.green().bold(),
            ConsensusOutcome::Rejected => label.red().bold(),
            ConsensusOutcome::NeedsRevision => label.yellow().bold(),
        }
    }

    fn choice_label(choice: VoteChoice) -> ColoredString {
        match choice {
            VoteChoice::Approve => choice.as_str().green(),
            VoteChoice::Reject => choice.as_str().red(),
            VoteChoice::Abstain => choice.as_str().dimmed(),
        }
    }

    fn action_label(action: TreasuryAction) -> ColoredString {
        if action.is_hold() {
            action.as_str().normal()
        } else {
            action.as_str().magenta().bold()
        }
    }

    /// First eight characters of an ID, enough to address it in the console
    pub fn short_id(id: &DecisionId) -> String {
        id.to_string().chars().take(8).collect()
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }

    /// Indent a multi-line string
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_decision(&self, decision: &Decision) -> String {
        Self::format_decision(decision)
    }

    fn format_decisions(&self, decisions: &[Decision]) -> String {
        Self::format_decisions(decisions)
    }

    fn format_vote(&self, vote: &Vote) -> String {
        Self::format_vote(vote)
    }

    fn format_activity(&self, entries: &[ActivityEntry]) -> String {
        Self::format_activity(entries)
    }

    fn format_autonomous(&self, decision: &AutonomousDecision) -> String {
        Self::format_autonomous(decision)
    }

    fn format_history(&self, history: &[AutonomousDecision]) -> String {
        Self::format_history(history)
    }

    fn format_status(&self, status: &EngineStatus) -> String {
        Self::format_status(status)
    }
}
