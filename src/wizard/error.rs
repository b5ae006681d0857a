// ABOUTME: Error types for the creation wizard

use thiserror::Error;

use super::steps::StepId;

/// Failure reported by the resource-creation collaborator
///
/// The wizard never interprets the detail; it is surfaced to the caller as-is.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct CreationError {
    pub message: String,
}

impl CreationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Errors surfaced by the flow controller
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WizardError {
    /// A field needed to assemble the creation payload is missing
    #[error("Cannot create resource: {0} is missing")]
    Incomplete(&'static str),

    /// A required step's predicate does not hold
    #[error("Cannot create resource: step {0} is incomplete")]
    StepIncomplete(StepId),

    /// The flow already created its resource
    #[error("Resource was already created in this session")]
    AlreadyCompleted,

    /// The collaborator rejected the creation call
    #[error("Resource creation failed: {0}")]
    CreationFailed(#[from] CreationError),
}

/// Result type for wizard operations
pub type WizardResult<T> = Result<T, WizardError>;
