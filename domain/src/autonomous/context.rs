//! Context snapshot fed to voters at the start of each autonomous cycle

use super::action::TreasuryAction;
use serde::{Deserialize, Serialize};

/// Identity of the token the treasury manages
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManagedToken {
    /// Mint address
    pub mint: String,
    pub symbol: Option<String>,
    pub name: Option<String>,
}

/// Market metrics for the managed token
///
/// Every field is optional: the market API may not know all of them yet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketMetrics {
    pub price_usd: Option<f64>,
    pub market_cap_usd: Option<f64>,
    pub volume_24h_usd: Option<f64>,
    pub price_change_24h_pct: Option<f64>,
    pub holders: Option<u64>,
}

/// External state as reported by the context provider
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TreasurySnapshot {
    /// Treasury wallet balance in SOL
    pub sol_balance: f64,
    pub token: Option<ManagedToken>,
    /// Absent while no token is managed
    pub market: Option<MarketMetrics>,
}

/// Everything a voter sees when asked for an action recommendation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AutonomousContext {
    #[serde(flatten)]
    pub snapshot: TreasurySnapshot,
    /// Actions of the most recent autonomous decisions, newest first
    pub recent_actions: Vec<TreasuryAction>,
}

impl AutonomousContext {
    pub fn new(snapshot: TreasurySnapshot, recent_actions: Vec<TreasuryAction>) -> Self {
        Self {
            snapshot,
            recent_actions,
        }
    }
}
