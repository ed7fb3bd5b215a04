//! Context provider port
//!
//! Supplies the treasury balance, managed token and market snapshot that
//! seeds every autonomous cycle.

use async_trait::async_trait;
use council_domain::TreasurySnapshot;
use thiserror::Error;

/// Errors raised while gathering cycle context
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ContextError {
    #[error("Treasury API unavailable: {0}")]
    Unavailable(String),

    #[error("Invalid treasury data: {0}")]
    InvalidData(String),
}

/// Source of the current treasury state
#[async_trait]
pub trait ContextProvider: Send + Sync {
    async fn snapshot(&self) -> Result<TreasurySnapshot, ContextError>;
}
