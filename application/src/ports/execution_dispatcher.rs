//! Execution dispatcher port
//!
//! Carries a chosen treasury action to the external trading API.

use async_trait::async_trait;
use council_domain::TreasuryAction;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Transport-level failures of the trading API
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExecutionError {
    #[error("Trading API unreachable: {0}")]
    Unreachable(String),

    #[error("Trading API returned status {status}: {message}")]
    Rejected { status: u16, message: String },

    #[error("Invalid trading API response: {0}")]
    InvalidResponse(String),
}

/// A concrete, parameterized instruction for one non-hold action
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ExecutionOrder {
    /// Spend `sol_amount` SOL buying the managed token
    Buyback { sol_amount: f64 },
    /// Burn `percent` of the held supply
    Burn { percent: f64 },
    /// Sell `percent` of held tokens
    SellPartial { percent: f64 },
    /// Collect accrued creator fees
    ClaimRewards,
}

impl ExecutionOrder {
    pub fn action(&self) -> TreasuryAction {
        match self {
            ExecutionOrder::Buyback { .. } => TreasuryAction::Buyback,
            ExecutionOrder::Burn { .. } => TreasuryAction::Burn,
            ExecutionOrder::SellPartial { .. } => TreasuryAction::SellPartial,
            ExecutionOrder::ClaimRewards => TreasuryAction::ClaimRewards,
        }
    }
}

/// What the trading API reported for one order
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ExecutionReceipt {
    pub success: bool,
    pub signature: Option<String>,
    pub error: Option<String>,
}

impl ExecutionReceipt {
    pub fn succeeded(signature: Option<String>) -> Self {
        Self {
            success: true,
            signature,
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            signature: None,
            error: Some(error.into()),
        }
    }

    /// Text stored verbatim as the autonomous decision's result
    pub fn summary(&self) -> String {
        match (self.success, &self.signature, &self.error) {
            (true, Some(signature), _) => signature.clone(),
            (true, None, _) => "executed".to_string(),
            (false, _, Some(error)) => error.clone(),
            (false, _, None) => "execution failed".to_string(),
        }
    }
}

/// Dispatches orders to the trading collaborator
#[async_trait]
pub trait ExecutionDispatcher: Send + Sync {
    async fn execute(&self, order: &ExecutionOrder) -> Result<ExecutionReceipt, ExecutionError>;
}
