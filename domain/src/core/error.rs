//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("Invalid patient profile: {0}")]
    InvalidProfile(String),

    #[error("Invalid session identifier: {0}")]
    InvalidSession(String),

    #[error("Unknown feature name: {0}")]
    UnknownFeature(String),

    #[error("Invalid assessment transition: cannot {action} while {phase}")]
    InvalidTransition {
        action: &'static str,
        phase: &'static str,
    },
}

impl DomainError {
    /// Check if this error came from profile validation
    pub fn is_invalid_profile(&self) -> bool {
        matches!(self, DomainError::InvalidProfile(_))
    }
}
