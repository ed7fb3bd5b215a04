//! Execution dispatchers.

use super::client::{TreasuryClient, TreasuryHttpError};
use async_trait::async_trait;
use council_application::ports::execution_dispatcher::{
    ExecutionDispatcher, ExecutionError, ExecutionOrder, ExecutionReceipt,
};
use tracing::info;

impl From<TreasuryHttpError> for ExecutionError {
    fn from(e: TreasuryHttpError) -> Self {
        match e {
            TreasuryHttpError::Unreachable(message) => ExecutionError::Unreachable(message),
            TreasuryHttpError::Status { status, message } => {
                ExecutionError::Rejected { status, message }
            }
            TreasuryHttpError::Decode(message) => ExecutionError::InvalidResponse(message),
        }
    }
}

/// Sends orders to the treasury API's `/execute` endpoint
pub struct HttpExecutionDispatcher {
    client: TreasuryClient,
}

impl HttpExecutionDispatcher {
    pub fn new(client: TreasuryClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ExecutionDispatcher for HttpExecutionDispatcher {
    async fn execute(&self, order: &ExecutionOrder) -> Result<ExecutionReceipt, ExecutionError> {
        let receipt: ExecutionReceipt = self.client.post("execute", order).await?;
        info!(action = %order.action(), success = receipt.success, "Order executed");
        Ok(receipt)
    }
}

/// Logs orders instead of sending them
pub struct DryRunDispatcher;

#[async_trait]
impl ExecutionDispatcher for DryRunDispatcher {
    async fn execute(&self, order: &ExecutionOrder) -> Result<ExecutionReceipt, ExecutionError> {
        info!(?order, "Dry run: order not sent");
        Ok(ExecutionReceipt::succeeded(Some(format!(
            "dry-run:{}",
            order.action()
        ))))
    }
}
