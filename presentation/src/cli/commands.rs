//! CLI command definitions

use clap::{Parser, Subcommand, ValueEnum};
use council_domain::{DecisionCategory, Priority};
use std::path::PathBuf;

/// Output format for printed entities
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Colored, human-readable text
    Text,
    /// Pretty-printed JSON
    Json,
}

/// CLI arguments for treasury-council
#[derive(Parser, Debug)]
#[command(name = "treasury-council")]
#[command(author, version, about = "Three-voter LLM council with an autonomous treasury engine")]
#[command(long_about = r#"
Treasury Council asks three LLM voters with distinct roles to judge proposals.

  Sentinel   Risk & Momentum
  Architect  Structure & Execution
  Steward    Ethics & Restraint

Manual decisions reach consensus by 2-of-3 majority. The autonomous engine
periodically asks the same voters for a treasury action (buyback, burn, hold,
sell_partial, claim_rewards) and executes it only on a 2-vote quorum.

Configuration files are loaded from (in priority order):
1. COUNCIL_* environment variables (e.g. COUNCIL_REASONING__BASE_URL)
2. --config <path>     Explicit config file
3. ./council.toml      Project-level config
4. ~/.config/treasury-council/config.toml   Global config

Example:
  treasury-council decide "Add dark mode" --category feature
  treasury-council cycle --output json
  treasury-council run
  treasury-council console
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Output format (overrides [output] format)
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a decision and deliberate on it
    Decide {
        /// Decision title
        title: String,

        /// Longer description
        #[arg(short, long, default_value = "")]
        description: String,

        /// Extra context for the voters
        #[arg(long)]
        context: Option<String>,

        /// Decision category
        #[arg(short, long, value_parser = parse_category, default_value = "other")]
        category: DecisionCategory,

        /// Decision priority
        #[arg(short, long, value_parser = parse_priority, default_value = "medium")]
        priority: Priority,
    },

    /// Run one autonomous treasury cycle and print its decision
    Cycle {
        /// Log orders instead of sending them
        #[arg(long)]
        dry_run: bool,
    },

    /// Start the autonomous engine and run until Ctrl-C
    Run {
        /// Milliseconds between cycles (overrides [autonomous] interval_ms)
        #[arg(long, value_name = "MS")]
        interval_ms: Option<u64>,

        /// Log orders instead of sending them
        #[arg(long)]
        dry_run: bool,
    },

    /// Interactive console sharing one in-memory store
    Console,

    /// Show configuration sources and the effective configuration
    Config,
}

fn parse_category(s: &str) -> Result<DecisionCategory, String> {
    s.parse().map_err(|e: council_domain::DomainError| e.to_string())
}

fn parse_priority(s: &str) -> Result<Priority, String> {
    s.parse().map_err(|e: council_domain::DomainError| e.to_string())
}
