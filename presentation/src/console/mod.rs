//! Interactive console

pub mod command;
pub mod repl;

pub use command::ConsoleCommand;
pub use repl::{CouncilConsole, ProgressMode};
