//! Execution policy: how a chosen action becomes a sized order.
//!
//! [`ExecutionPolicy`] holds the fixed fractions and caps applied when the
//! autonomous engine executes a non-hold action.

use crate::ports::execution_dispatcher::ExecutionOrder;
use council_domain::{TreasuryAction, TreasurySnapshot};
use serde::{Deserialize, Serialize};

/// Sizing rules for treasury orders
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionPolicy {
    /// Share of the SOL balance spent on a buyback (0.0 - 1.0)
    pub buyback_fraction: f64,
    /// Ceiling on a single buyback, in SOL
    pub buyback_cap_sol: f64,
    /// Percentage of held tokens sold by `sell_partial`
    pub sell_percent: f64,
    /// Percentage of supply removed by `burn`
    pub burn_percent: f64,
}

impl Default for ExecutionPolicy {
    fn default() -> Self {
        Self {
            buyback_fraction: 0.10,
            buyback_cap_sol: 0.5,
            sell_percent: 5.0,
            burn_percent: 1.0,
        }
    }
}

impl ExecutionPolicy {
    /// Size an order for `action`; `hold` has no order
    pub fn order_for(
        &self,
        action: TreasuryAction,
        snapshot: &TreasurySnapshot,
    ) -> Option<ExecutionOrder> {
        match action {
            TreasuryAction::Hold => None,
            TreasuryAction::Buyback => {
                let sol_amount = (snapshot.sol_balance.max(0.0) * self.buyback_fraction)
                    .min(self.buyback_cap_sol);
                Some(ExecutionOrder::Buyback { sol_amount })
            }
            TreasuryAction::Burn => Some(ExecutionOrder::Burn {
                percent: self.burn_percent,
            }),
            TreasuryAction::SellPartial => Some(ExecutionOrder::SellPartial {
                percent: self.sell_percent,
            }),
            TreasuryAction::ClaimRewards => Some(ExecutionOrder::ClaimRewards),
        }
    }

    // ==================== Builder Methods ====================

    pub fn with_buyback(mut self, fraction: f64, cap_sol: f64) -> Self {
        self.buyback_fraction = fraction;
        self.buyback_cap_sol = cap_sol;
        self
    }

    pub fn with_sell_percent(mut self, percent: f64) -> Self {
        self.sell_percent = percent;
        self
    }

    pub fn with_burn_percent(mut self, percent: f64) -> Self {
        self.burn_percent = percent;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn balance(sol: f64) -> TreasurySnapshot {
        TreasurySnapshot {
            sol_balance: sol,
            ..TreasurySnapshot::default()
        }
    }

    #[test]
    fn test_hold_has_no_order() {
        assert!(ExecutionPolicy::default()
            .order_for(TreasuryAction::Hold, &balance(10.0))
            .is_none());
    }

    #[test]
    fn test_buyback_fraction_and_cap() {
        let policy = ExecutionPolicy::default();
        assert_eq!(
            policy.order_for(TreasuryAction::Buyback, &balance(2.0)),
            Some(ExecutionOrder::Buyback { sol_amount: 0.2 })
        );
        // 10% of 20 SOL is 2 SOL, capped at 0.5
        assert_eq!(
            policy.order_for(TreasuryAction::Buyback, &balance(20.0)),
            Some(ExecutionOrder::Buyback { sol_amount: 0.5 })
        );
    }

    #[test]
    fn test_percent_orders() {
        let policy = ExecutionPolicy::default()
            .with_sell_percent(7.5)
            .with_burn_percent(2.0);
        assert_eq!(
            policy.order_for(TreasuryAction::SellPartial, &balance(0.0)),
            Some(ExecutionOrder::SellPartial { percent: 7.5 })
        );
        assert_eq!(
            policy.order_for(TreasuryAction::Burn, &balance(0.0)),
            Some(ExecutionOrder::Burn { percent: 2.0 })
        );
        assert_eq!(
            policy.order_for(TreasuryAction::ClaimRewards, &balance(0.0)),
            Some(ExecutionOrder::ClaimRewards)
        );
    }
}
