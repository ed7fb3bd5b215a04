//! Infrastructure layer for treasury-council
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod logging;
pub mod reasoning;
pub mod store;
pub mod treasury;

// Re-export commonly used types
pub use config::{ConfigIssue, ConfigLoader, ConfigSources, FileConfig, FileOutputFormat, Severity};
pub use logging::JsonlAuditLogger;
pub use reasoning::{HttpReasoningGateway, ReasoningEndpoint};
pub use store::InMemoryDecisionStore;
pub use treasury::{
    DryRunDispatcher, HttpContextProvider, HttpExecutionDispatcher, StaticContextProvider,
    TreasuryClient, TreasuryHttpError,
};

#[cfg(test)]
mod end_to_end;
