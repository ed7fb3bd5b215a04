//! Reasoning gateway port
//!
//! Defines the interface for invoking the external reasoning (LLM) service.

use async_trait::async_trait;
use thiserror::Error;

/// Transport-level failures when talking to the reasoning service
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GatewayError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Request failed with status {status}: {message}")]
    RequestFailed { status: u16, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Timed out after {0} seconds")]
    Timeout(u64),

    #[error("Other error: {0}")]
    Other(String),
}

/// One completion request: role instructions plus a rendered prompt
#[derive(Debug, Clone, PartialEq)]
pub struct ReasoningRequest {
    pub model: String,
    pub system_prompt: String,
    pub prompt: String,
}

impl ReasoningRequest {
    pub fn new(
        model: impl Into<String>,
        system_prompt: impl Into<String>,
        prompt: impl Into<String>,
    ) -> Self {
        Self {
            model: model.into(),
            system_prompt: system_prompt.into(),
            prompt: prompt.into(),
        }
    }
}

/// Gateway to the reasoning service
///
/// Implementations (adapters) live in the infrastructure layer. A call is
/// made exactly once per voter invocation; retries are not the gateway's job.
#[async_trait]
pub trait ReasoningGateway: Send + Sync {
    /// Send one request and return the raw text of the reply
    async fn complete(&self, request: &ReasoningRequest) -> Result<String, GatewayError>;
}
