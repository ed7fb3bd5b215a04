//! Application-level configuration.
//!
//! This module provides configuration types that control how use cases behave:
//!
//! - [`EngineParams`]: cycle interval and per-voter timeout
//! - [`ExecutionPolicy`]: sizing of buyback / burn / sell orders

pub mod engine_params;
pub mod execution_policy;

pub use engine_params::EngineParams;
pub use execution_policy::ExecutionPolicy;
