//! Error types for the workflow service

use thiserror::Error;

/// Result type alias using WorkflowError
pub type Result<T> = std::result::Result<T, WorkflowError>;

/// Errors returned to hosts driving the workflow
#[derive(Debug, Error)]
pub enum WorkflowError {
    /// Caller supplied unusable input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The action is not accepted in the current step
    #[error("Invalid transition: {0}")]
    InvalidTransition(String),

    /// A spawned request task panicked or was cancelled
    #[error("Background task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl WorkflowError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn invalid_transition(msg: impl Into<String>) -> Self {
        Self::InvalidTransition(msg.into())
    }
}

/// Reasons a design extraction falls back
///
/// Never returned to hosts; the requester logs it and records it in the
/// fallback record's origin.
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error(transparent)]
    Gateway(#[from] inference::GatewayError),

    #[error("No response from model")]
    EmptyReply,

    #[error("Malformed design JSON: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Design has no sections")]
    NoSections,
}
