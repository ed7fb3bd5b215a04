//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod audit_logger;
pub mod context_provider;
pub mod decision_store;
pub mod execution_dispatcher;
pub mod progress;
pub mod reasoning_gateway;
