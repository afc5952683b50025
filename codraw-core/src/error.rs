//! Error types for canvas operations.

use thiserror::Error;

use crate::state::SessionState;

/// Result type for canvas operations.
pub type CanvasResult<T> = Result<T, CanvasError>;

/// Errors that can occur in canvas operations.
#[derive(Debug, Error)]
pub enum CanvasError {
    /// A color string could not be parsed.
    #[error("Invalid color: {0}")]
    InvalidColor(String),

    /// A submission was attempted with an empty prompt.
    #[error("Prompt must not be empty")]
    EmptyPrompt,

    /// The session cannot perform the requested action in its current state.
    #[error("Cannot {action} while {state}")]
    InvalidTransition {
        /// The action that was rejected.
        action: &'static str,
        /// Name of the state the session was in.
        state: &'static str,
    },

    /// An encoded image payload was malformed.
    #[error("Invalid image payload: {0}")]
    InvalidPayload(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl CanvasError {
    /// Build an [`CanvasError::InvalidTransition`] for the given state.
    #[must_use]
    pub fn invalid_transition(action: &'static str, state: &SessionState) -> Self {
        Self::InvalidTransition {
            action,
            state: state.name(),
        }
    }
}
