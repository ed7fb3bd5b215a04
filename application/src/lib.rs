//! Application layer for treasury-council
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::{EngineParams, ExecutionPolicy};
pub use ports::{
    audit_logger::{AuditEvent, AuditLogger, NoAuditLogger},
    context_provider::{ContextError, ContextProvider},
    decision_store::{DecisionStore, StoreError},
    execution_dispatcher::{ExecutionDispatcher, ExecutionError, ExecutionOrder, ExecutionReceipt},
    progress::{NoProgress, ProgressNotifier},
    reasoning_gateway::{GatewayError, ReasoningGateway, ReasoningRequest},
};
pub use use_cases::autonomous_engine::{AutonomousEngine, CycleError, EngineStatus};
pub use use_cases::deliberate::{DeliberateUseCase, DeliberationError, DeliberationOutcome};
pub use use_cases::voter_adapter::{VoterAdapter, VoterError};
pub use use_cases::voter_panel::VoterPanel;
