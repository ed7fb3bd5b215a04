//! Context providers.

use super::client::{TreasuryClient, TreasuryHttpError};
use async_trait::async_trait;
use council_application::ports::context_provider::{ContextError, ContextProvider};
use council_domain::{ManagedToken, MarketMetrics, TreasurySnapshot};
use serde::Deserialize;
use tracing::debug;

impl From<TreasuryHttpError> for ContextError {
    fn from(e: TreasuryHttpError) -> Self {
        match e {
            TreasuryHttpError::Decode(message) => ContextError::InvalidData(message),
            other => ContextError::Unavailable(other.to_string()),
        }
    }
}

#[derive(Debug, Deserialize)]
struct BalanceResponse {
    sol_balance: f64,
}

/// Reads balance, token and market data from the treasury API
pub struct HttpContextProvider {
    client: TreasuryClient,
}

impl HttpContextProvider {
    pub fn new(client: TreasuryClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ContextProvider for HttpContextProvider {
    async fn snapshot(&self) -> Result<TreasurySnapshot, ContextError> {
        let balance: BalanceResponse = self.client.get("balance").await?;
        if !balance.sol_balance.is_finite() || balance.sol_balance < 0.0 {
            return Err(ContextError::InvalidData(format!(
                "sol_balance out of range: {}",
                balance.sol_balance
            )));
        }

        let token: Option<ManagedToken> = self.client.get_optional("token").await?;
        let market: Option<MarketMetrics> = match &token {
            Some(token) => {
                self.client
                    .get_optional(&format!("market/{}", token.mint))
                    .await?
            }
            None => None,
        };

        debug!(
            sol_balance = balance.sol_balance,
            token = token.as_ref().map(|t| t.mint.as_str()),
            "Treasury snapshot"
        );
        Ok(TreasurySnapshot {
            sol_balance: balance.sol_balance,
            token,
            market,
        })
    }
}

/// Returns the same snapshot every cycle
///
/// Stands in for the treasury API when none is configured.
pub struct StaticContextProvider {
    snapshot: TreasurySnapshot,
}

impl StaticContextProvider {
    pub fn new(snapshot: TreasurySnapshot) -> Self {
        Self { snapshot }
    }
}

#[async_trait]
impl ContextProvider for StaticContextProvider {
    async fn snapshot(&self) -> Result<TreasurySnapshot, ContextError> {
        Ok(self.snapshot.clone())
    }
}
