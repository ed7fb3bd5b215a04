//! Interactive council console
//!
//! One process-wide store and engine shared by every command, so decisions
//! created here can be voted on, inspected and deleted in the same session
//! while the autonomous engine keeps running in the background.

use super::command::ConsoleCommand;
use crate::output::console::ConsoleFormatter;
use crate::output::formatter::OutputFormatter;
use crate::progress::reporter::{ProgressReporter, SimpleProgress};
use colored::Colorize;
use council_application::ports::progress::{NoProgress, ProgressNotifier};
use council_application::{
    AutonomousEngine, ContextProvider, DecisionStore, DeliberateUseCase, ExecutionDispatcher,
    ReasoningGateway,
};
use council_domain::{DecisionId, NewDecision, Vote};
use reedline::{DefaultPrompt, DefaultPromptSegment, FileBackedHistory, Reedline, Signal};
use std::path::PathBuf;
use std::sync::Arc;

/// Number of lines kept in the console history file
const HISTORY_CAPACITY: usize = 1000;

/// How progress is shown while voters deliberate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressMode {
    Bars,
    Plain,
    Off,
}

/// Interactive console over the council and the autonomous engine
pub struct CouncilConsole<G, S, C, E>
where
    G: ReasoningGateway + ?Sized + 'static,
    S: DecisionStore + ?Sized,
    C: ContextProvider + ?Sized + 'static,
    E: ExecutionDispatcher + ?Sized + 'static,
{
    deliberation: Arc<DeliberateUseCase<G, S>>,
    engine: Arc<AutonomousEngine<G, C, E>>,
    formatter: Box<dyn OutputFormatter>,
    progress: ProgressMode,
    history_file: Option<PathBuf>,
}

impl<G, S, C, E> CouncilConsole<G, S, C, E>
where
    G: ReasoningGateway + ?Sized + 'static,
    S: DecisionStore + ?Sized,
    C: ContextProvider + ?Sized + 'static,
    E: ExecutionDispatcher + ?Sized + 'static,
{
    pub fn new(
        deliberation: Arc<DeliberateUseCase<G, S>>,
        engine: Arc<AutonomousEngine<G, C, E>>,
    ) -> Self {
        Self {
            deliberation,
            engine,
            formatter: Box::new(ConsoleFormatter),
            progress: ProgressMode::Bars,
            history_file: dirs::data_dir()
                .map(|p| p.join("treasury-council").join("history.txt")),
        }
    }

    pub fn with_formatter(mut self, formatter: Box<dyn OutputFormatter>) -> Self {
        self.formatter = formatter;
        self
    }

    pub fn with_progress(mut self, progress: ProgressMode) -> Self {
        self.progress = progress;
        self
    }

    /// Set the history file (None disables persistent history)
    pub fn with_history_file(mut self, path: Option<PathBuf>) -> Self {
        self.history_file = path;
        self
    }

    /// Run the interactive console until /quit or Ctrl-D
    pub async fn run(&self) -> std::io::Result<()> {
        let mut editor = Reedline::create();
        if let Some(path) = &self.history_file {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            match FileBackedHistory::with_file(HISTORY_CAPACITY, path.clone()) {
                Ok(history) => editor = editor.with_history(Box::new(history)),
                Err(e) => eprintln!("History disabled: {}", e),
            }
        }

        let prompt = DefaultPrompt::new(
            DefaultPromptSegment::Basic("council".to_string()),
            DefaultPromptSegment::Empty,
        );

        self.print_welcome();

        loop {
            let signal = tokio::task::block_in_place(|| editor.read_line(&prompt))?;

            match signal {
                Signal::Success(line) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }

                    match ConsoleCommand::parse(line) {
                        Ok(ConsoleCommand::Quit) => {
                            println!("Bye!");
                            break;
                        }
                        Ok(command) => match self.execute(command).await {
                            Ok(output) => println!("{}", output),
                            Err(message) => eprintln!("{} {}", "Error:".red().bold(), message),
                        },
                        Err(message) => eprintln!("{}", message),
                    }
                }
                Signal::CtrlC => {
                    println!("^C");
                    continue;
                }
                Signal::CtrlD => {
                    println!("Bye!");
                    break;
                }
            }
        }

        if self.engine.stop() {
            println!("Autonomous engine stopped");
        }
        Ok(())
    }

    fn print_welcome(&self) {
        println!();
        println!("╭─────────────────────────────────────────────╮");
        println!("│         Treasury Council - Console          │");
        println!("╰─────────────────────────────────────────────╯");
        println!();
        println!("Type a proposal to put it to the council, or /help for commands.");
        println!();
    }

    fn help_text() -> String {
        [
            "Council:",
            "  <title>                          Create and deliberate a decision",
            "  /decide [category] <title>       Same, with a category",
            "  /create [category] <title>       Create without deliberating",
            "  /deliberate <id>                 Ask all three voters",
            "  /vote <id> <voter> <choice> <confidence> [reasoning]",
            "                                   Record a manual vote",
            "  /consensus <id>                  Compute consensus from recorded votes",
            "  /show <id>                       Show a decision",
            "  /list                            List decisions",
            "  /activity [id]                   Show the activity feed",
            "  /delete <id>                     Delete a decision",
            "",
            "Autonomous engine:",
            "  /cycle                           Run one cycle now",
            "  /start, /stop                    Start or stop the periodic engine",
            "  /status                          Engine status",
            "  /history [n]                     Recent autonomous decisions",
            "",
            "  /help, /quit",
            "",
            "IDs may be abbreviated to any unique prefix.",
        ]
        .join("\n")
    }

    /// Execute one command, returning the text to print
    pub async fn execute(&self, command: ConsoleCommand) -> Result<String, String> {
        match command {
            ConsoleCommand::Help => Ok(Self::help_text()),
            ConsoleCommand::Quit => Ok(String::new()),
            ConsoleCommand::Decide { title, category } => {
                let payload = NewDecision::new(title, category);
                let outcome = match self.progress {
                    ProgressMode::Bars => {
                        let progress = ProgressReporter::new();
                        self.create_and_deliberate(payload, &progress).await
                    }
                    ProgressMode::Plain => self.create_and_deliberate(payload, &SimpleProgress).await,
                    ProgressMode::Off => self.create_and_deliberate(payload, &NoProgress).await,
                }?;
                Ok(self.formatter.format_decision(&outcome))
            }
            ConsoleCommand::Create { title, category } => {
                let decision = self
                    .deliberation
                    .create_decision(NewDecision::new(title, category))
                    .await
                    .map_err(|e| e.to_string())?;
                Ok(self.formatter.format_decision(&decision))
            }
            ConsoleCommand::Deliberate(token) => {
                let id = self.resolve(&token).await?;
                let outcome = self
                    .deliberation
                    .deliberate(id)
                    .await
                    .map_err(|e| e.to_string())?;
                Ok(self.formatter.format_decision(&outcome.decision))
            }
            ConsoleCommand::Vote {
                id,
                voter,
                choice,
                confidence,
                reasoning,
            } => {
                let id = self.resolve(&id).await?;
                let vote = Vote::new(voter, choice, reasoning, confidence).map_err(|e| e.to_string())?;
                let decision = self
                    .deliberation
                    .submit_vote(id, vote)
                    .await
                    .map_err(|e| e.to_string())?;
                Ok(self.formatter.format_decision(&decision))
            }
            ConsoleCommand::Consensus(token) => {
                let id = self.resolve(&token).await?;
                let outcome = self
                    .deliberation
                    .compute_consensus(id)
                    .await
                    .map_err(|e| e.to_string())?;
                Ok(self.formatter.format_decision(&outcome.decision))
            }
            ConsoleCommand::Show(token) => {
                let id = self.resolve(&token).await?;
                let decision = self
                    .deliberation
                    .get_decision(id)
                    .await
                    .map_err(|e| e.to_string())?;
                Ok(self.formatter.format_decision(&decision))
            }
            ConsoleCommand::List => {
                let decisions = self
                    .deliberation
                    .list_decisions()
                    .await
                    .map_err(|e| e.to_string())?;
                Ok(self.formatter.format_decisions(&decisions))
            }
            ConsoleCommand::Activity(token) => {
                let id = match token {
                    Some(token) => Some(self.resolve(&token).await?),
                    None => None,
                };
                let entries = self
                    .deliberation
                    .list_activity(id, None)
                    .await
                    .map_err(|e| e.to_string())?;
                Ok(self.formatter.format_activity(&entries))
            }
            ConsoleCommand::Delete(token) => {
                let id = self.resolve(&token).await?;
                let decision = self
                    .deliberation
                    .delete_decision(id)
                    .await
                    .map_err(|e| e.to_string())?;
                Ok(format!("Deleted \"{}\" ({})", decision.title, decision.id))
            }
            ConsoleCommand::Cycle => {
                let decision = self.engine.run_cycle().await;
                Ok(self.formatter.format_autonomous(&decision))
            }
            ConsoleCommand::Start => {
                if self.engine.start() {
                    Ok(self.formatter.format_status(&self.engine.status()))
                } else {
                    Ok("Autonomous engine is already running".to_string())
                }
            }
            ConsoleCommand::Stop => {
                if self.engine.stop() {
                    Ok("Autonomous engine stopped".to_string())
                } else {
                    Ok("Autonomous engine is not running".to_string())
                }
            }
            ConsoleCommand::Status => Ok(self.formatter.format_status(&self.engine.status())),
            ConsoleCommand::History(limit) => {
                Ok(self.formatter.format_history(&self.engine.history(limit)))
            }
        }
    }

    async fn create_and_deliberate(
        &self,
        payload: NewDecision,
        progress: &dyn ProgressNotifier,
    ) -> Result<council_domain::Decision, String> {
        self.deliberation
            .create_and_deliberate(payload, progress)
            .await
            .map(|outcome| outcome.decision)
            .map_err(|e| e.to_string())
    }

    /// Resolve a full ID or a unique prefix of one
    async fn resolve(&self, token: &str) -> Result<DecisionId, String> {
        if let Ok(id) = token.parse::<DecisionId>() {
            return Ok(id);
        }

        let prefix = token.to_lowercase();
        let decisions = self
            .deliberation
            .list_decisions()
            .await
            .map_err(|e| e.to_string())?;
        let mut matching = decisions
            .iter()
            .filter(|d| d.id.to_string().starts_with(&prefix));

        match (matching.next(), matching.next()) {
            (Some(decision), None) => Ok(decision.id),
            (None, _) => Err(format!("No decision matches '{}'", token)),
            (Some(_), Some(_)) => Err(format!("'{}' matches more than one decision", token)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use council_application::{GatewayError, ReasoningRequest, VoterPanel};
    use council_domain::{TreasurySnapshot, VoteChoice, VoterId};
    use council_infrastructure::{DryRunDispatcher, InMemoryDecisionStore, StaticContextProvider};

    /// Approves every decision and recommends a buyback
    struct AgreeableGateway;

    #[async_trait]
    impl ReasoningGateway for AgreeableGateway {
        async fn complete(&self, request: &ReasoningRequest) -> Result<String, GatewayError> {
            if request.prompt.contains("\"action\"") {
                Ok(r#"{"action": "buyback", "reasoning": "cheap", "confidence": 80}"#.to_string())
            } else {
                Ok(r#"{"vote": "approve", "reasoning": "fine", "confidence": 75}"#.to_string())
            }
        }
    }

    type TestConsole = CouncilConsole<
        AgreeableGateway,
        InMemoryDecisionStore,
        StaticContextProvider,
        DryRunDispatcher,
    >;

    fn console() -> TestConsole {
        let panel = Arc::new(VoterPanel::uniform(Arc::new(AgreeableGateway), "m", None));
        let deliberation = Arc::new(DeliberateUseCase::new(
            Arc::clone(&panel),
            Arc::new(InMemoryDecisionStore::new()),
        ));
        let snapshot = TreasurySnapshot {
            sol_balance: 10.0,
            ..TreasurySnapshot::default()
        };
        let engine = Arc::new(AutonomousEngine::new(
            panel,
            Arc::new(StaticContextProvider::new(snapshot)),
            Arc::new(DryRunDispatcher),
        ));
        CouncilConsole::new(deliberation, engine)
            .with_progress(ProgressMode::Off)
            .with_history_file(None)
    }

    #[tokio::test]
    async fn test_decide_then_list_and_show_by_prefix() {
        let console = console();
        let output = console
            .execute(ConsoleCommand::parse("Add dark mode").unwrap())
            .await
            .unwrap();
        assert!(output.contains("APPROVED"));

        let decisions = console.deliberation.list_decisions().await.unwrap();
        let prefix = ConsoleFormatter::short_id(&decisions[0].id);
        let shown = console
            .execute(ConsoleCommand::Show(prefix.clone()))
            .await
            .unwrap();
        assert!(shown.contains("Add dark mode"));

        let listed = console.execute(ConsoleCommand::List).await.unwrap();
        assert!(listed.contains(&prefix));
    }

    #[tokio::test]
    async fn test_manual_votes_then_consensus() {
        let console = console();
        console
            .execute(ConsoleCommand::parse("/create bugfix Fix login").unwrap())
            .await
            .unwrap();
        let id = console.deliberation.list_decisions().await.unwrap()[0].id;

        for voter in ["sentinel", "architect", "steward"] {
            let line = format!("/vote {} {} reject 60 too risky", id, voter);
            console
                .execute(ConsoleCommand::parse(&line).unwrap())
                .await
                .unwrap();
        }
        let output = console
            .execute(ConsoleCommand::Consensus(id.to_string()))
            .await
            .unwrap();
        assert!(output.contains("REJECTED"));

        let decision = console.deliberation.get_decision(id).await.unwrap();
        assert_eq!(
            decision.vote_of(VoterId::Ethics).map(|v| v.choice),
            Some(VoteChoice::Reject)
        );
    }

    #[tokio::test]
    async fn test_unknown_id_reported() {
        let console = console();
        let err = console
            .execute(ConsoleCommand::Show("deadbeef".to_string()))
            .await
            .unwrap_err();
        assert!(err.contains("No decision matches"));
    }

    #[tokio::test]
    async fn test_delete_removes_decision() {
        let console = console();
        console
            .execute(ConsoleCommand::parse("/create Drop IE11").unwrap())
            .await
            .unwrap();
        let id = console.deliberation.list_decisions().await.unwrap()[0].id;

        let output = console
            .execute(ConsoleCommand::Delete(id.to_string()))
            .await
            .unwrap();
        assert!(output.contains("Drop IE11"));
        assert!(console.deliberation.list_decisions().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_cycle_and_history() {
        let console = console();
        let output = console.execute(ConsoleCommand::Cycle).await.unwrap();
        assert!(output.contains("buyback"));
        assert!(output.contains("dry-run:buyback"));

        let history = console.engine.history(10);
        assert_eq!(history.len(), 1);
        assert!(history[0].executed);
    }

    #[tokio::test]
    async fn test_start_stop() {
        let console = console();
        let started = console.execute(ConsoleCommand::Start).await.unwrap();
        assert!(started.contains("running"));
        assert_eq!(
            console.execute(ConsoleCommand::Start).await.unwrap(),
            "Autonomous engine is already running"
        );
        assert_eq!(
            console.execute(ConsoleCommand::Stop).await.unwrap(),
            "Autonomous engine stopped"
        );
        assert!(!console.engine.is_running());
    }
}
