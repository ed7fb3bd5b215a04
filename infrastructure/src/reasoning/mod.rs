//! Reasoning service adapters
//!
//! [`HttpReasoningGateway`] talks to any OpenAI-compatible chat completions
//! endpoint (OpenAI, vLLM, Ollama, LocalAI, ...).

mod http_gateway;

pub use http_gateway::{HttpReasoningGateway, ReasoningEndpoint};
