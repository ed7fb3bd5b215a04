//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("Invalid field '{field}': {message}")]
    Validation { field: String, message: String },

    #[error("Unknown voter: {0}")]
    UnknownVoter(String),

    #[error("Unknown action: {0}")]
    UnknownAction(String),

    #[error("Unknown value '{value}' for {kind}")]
    UnknownVariant { kind: &'static str, value: String },

    #[error("Consensus requires exactly one vote per voter, got {0}")]
    IncompleteVoteSet(usize),
}

impl DomainError {
    /// Shorthand for a field-level validation failure
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        DomainError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Check if this error is a payload validation failure
    pub fn is_validation(&self) -> bool {
        matches!(self, DomainError::Validation { .. })
    }
}
