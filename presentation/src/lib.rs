//! Presentation layer for treasury-council
//!
//! This crate contains CLI definitions, output formatters,
//! progress reporters, and the interactive council console.

pub mod cli;
pub mod console;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use cli::commands::{Cli, Command, OutputFormat};
pub use console::{ConsoleCommand, CouncilConsole, ProgressMode};
pub use output::console::ConsoleFormatter;
pub use output::formatter::{OutputFormatter, formatter_for};
pub use output::json::JsonFormatter;
pub use output::set_color_enabled;
pub use progress::reporter::{ProgressReporter, SimpleProgress};
