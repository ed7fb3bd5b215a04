//! Progress reporting for council deliberations

use colored::Colorize;
use council_application::ports::progress::ProgressNotifier;
use council_domain::{Decision, VoterId};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::sync::Mutex;

/// Reports deliberation progress with a progress bar
pub struct ProgressReporter {
    multi: MultiProgress,
    bar: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            multi: MultiProgress::new(),
            bar: Mutex::new(None),
        }
    }

    fn voting_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:30.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-")
    }

    fn voter_status(voter: VoterId, success: bool) -> String {
        if success {
            format!("{} {}", "v".green(), voter.name())
        } else {
            format!("{} {}", "x".red(), voter.name())
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressNotifier for ProgressReporter {
    fn on_voting_start(&self, decision: &Decision, total_voters: usize) {
        let pb = self.multi.add(ProgressBar::new(total_voters as u64));
        pb.set_style(Self::voting_style());
        pb.set_prefix("Council voting");
        pb.set_message(format!("\"{}\"", decision.title));

        if let Ok(mut bar) = self.bar.lock() {
            *bar = Some(pb);
        }
    }

    fn on_voter_complete(&self, voter: VoterId, success: bool) {
        if let Ok(bar) = self.bar.lock()
            && let Some(pb) = bar.as_ref()
        {
            pb.set_message(Self::voter_status(voter, success));
            pb.inc(1);
        }
    }

    fn on_voting_complete(&self, success: bool) {
        if let Ok(mut bar) = self.bar.lock()
            && let Some(pb) = bar.take()
        {
            if success {
                pb.finish_with_message(format!("{}", "all votes in".green()));
            } else {
                pb.abandon_with_message(format!("{}", "deliberation aborted".red()));
            }
        }
    }
}

/// Simple text-based progress (no fancy UI)
pub struct SimpleProgress;

impl ProgressNotifier for SimpleProgress {
    fn on_voting_start(&self, decision: &Decision, total_voters: usize) {
        println!(
            "{} {} ({} voters)",
            "->".cyan(),
            format!("Deliberating \"{}\"", decision.title).bold(),
            total_voters
        );
    }

    fn on_voter_complete(&self, voter: VoterId, success: bool) {
        if success {
            println!("  {} {}", "v".green(), voter.name());
        } else {
            println!("  {} {} (failed)", "x".red(), voter.name());
        }
    }

    fn on_voting_complete(&self, _success: bool) {
        println!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use council_domain::{DecisionCategory, NewDecision};

    #[test]
    fn test_reporter_lifecycle_clears_bar() {
        let reporter = ProgressReporter::new();
        let decision =
            Decision::create(NewDecision::new("Add dark mode", DecisionCategory::Feature)).unwrap();

        reporter.on_voting_start(&decision, 3);
        reporter.on_voter_complete(VoterId::Risk, true);
        reporter.on_voter_complete(VoterId::Ethics, false);
        assert_eq!(
            reporter.bar.lock().unwrap().as_ref().map(|pb| pb.position()),
            Some(2)
        );

        reporter.on_voting_complete(false);
        assert!(reporter.bar.lock().unwrap().is_none());
    }
}
