//! Treasury actions the autonomous engine can choose between

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Advisory action category for one autonomous cycle
///
/// Declaration order is the tie-break order of the plurality rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TreasuryAction {
    /// Spend treasury SOL to buy back the managed token
    Buyback,
    /// Burn a fixed share of the token supply
    Burn,
    /// Do nothing this cycle
    Hold,
    /// Sell a fixed percentage of held tokens
    SellPartial,
    /// Collect accrued creator fees
    ClaimRewards,
}

impl TreasuryAction {
    /// All actions in tie-break order
    pub const ALL: [TreasuryAction; 5] = [
        TreasuryAction::Buyback,
        TreasuryAction::Burn,
        TreasuryAction::Hold,
        TreasuryAction::SellPartial,
        TreasuryAction::ClaimRewards,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TreasuryAction::Buyback => "buyback",
            TreasuryAction::Burn => "burn",
            TreasuryAction::Hold => "hold",
            TreasuryAction::SellPartial => "sell_partial",
            TreasuryAction::ClaimRewards => "claim_rewards",
        }
    }

    pub fn is_hold(&self) -> bool {
        matches!(self, TreasuryAction::Hold)
    }
}

impl std::fmt::Display for TreasuryAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for TreasuryAction {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['-', ' '], "_");
        TreasuryAction::ALL
            .into_iter()
            .find(|a| a.as_str() == normalized)
            .ok_or_else(|| DomainError::UnknownAction(s.to_string()))
    }
}
