//! Session state machine.
//!
//! ```text
//!            submit(prompt)             success(image)
//!   Idle ─────────────────▶ Submitting ───────────────▶ Idle
//!    ▲                          │
//!    │ dismiss                  │ failure / no image
//!    └────── ErrorShown ◀───────┘
//! ```
//!
//! Every change goes through a named transition; a transition attempted from
//! the wrong state returns [`CanvasError::InvalidTransition`] and leaves the
//! state untouched.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{CanvasError, CanvasResult};
use crate::error_text::{extract_error_message, FALLBACK_ERROR_MESSAGE};

/// Error text for a generation that succeeded but returned no image.
pub const EMPTY_RESULT_MESSAGE: &str = "Failed to generate image. Please try again.";

/// Why a submission failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// The boundary call failed (transport, API status, parsing).
    Request,
    /// The boundary call succeeded but returned no image.
    EmptyResult,
}

/// State of a drawing session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SessionState {
    /// Ready for drawing, clearing and submitting.
    #[default]
    Idle,
    /// A generation request is in flight.
    Submitting {
        /// Id of the in-flight request.
        request_id: Uuid,
    },
    /// The error dialog is open.
    ErrorShown {
        /// Failure category.
        kind: FailureKind,
        /// The raw error text as reported by the failing layer.
        raw_error: String,
    },
}

impl SessionState {
    /// Short name of the state, for errors and logs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Submitting { .. } => "submitting",
            Self::ErrorShown { .. } => "showing an error",
        }
    }

    /// Whether the session is idle.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// Whether a submission is in flight. Hosts disable the submit control
    /// while this is true.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Submitting { .. })
    }

    /// Whether pointer input should reach the canvas.
    #[must_use]
    pub fn accepts_drawing(&self) -> bool {
        self.is_idle()
    }

    /// Id of the in-flight request, if any.
    #[must_use]
    pub fn request_id(&self) -> Option<Uuid> {
        match self {
            Self::Submitting { request_id } => Some(*request_id),
            _ => None,
        }
    }

    /// `Idle -> Submitting`.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::EmptyPrompt`] for a blank prompt and
    /// [`CanvasError::InvalidTransition`] when not idle.
    pub fn begin_submit(&mut self, prompt: &str) -> CanvasResult<Uuid> {
        if !self.is_idle() {
            return Err(CanvasError::invalid_transition("submit", self));
        }
        if prompt.trim().is_empty() {
            return Err(CanvasError::EmptyPrompt);
        }

        let request_id = Uuid::new_v4();
        *self = Self::Submitting { request_id };
        Ok(request_id)
    }

    /// `Submitting -> Idle` after a generation produced an image.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::InvalidTransition`] when nothing is in flight.
    pub fn complete(&mut self) -> CanvasResult<()> {
        if !self.is_loading() {
            return Err(CanvasError::invalid_transition("complete a submission", self));
        }
        *self = Self::Idle;
        Ok(())
    }

    /// `Submitting -> ErrorShown`.
    ///
    /// An empty `raw_error` is replaced with [`FALLBACK_ERROR_MESSAGE`].
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::InvalidTransition`] when nothing is in flight.
    pub fn fail(&mut self, kind: FailureKind, raw_error: impl Into<String>) -> CanvasResult<()> {
        if !self.is_loading() {
            return Err(CanvasError::invalid_transition("fail a submission", self));
        }
        let mut raw_error = raw_error.into();
        if raw_error.trim().is_empty() {
            raw_error = FALLBACK_ERROR_MESSAGE.to_string();
        }
        *self = Self::ErrorShown { kind, raw_error };
        Ok(())
    }

    /// `ErrorShown -> Idle`.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::InvalidTransition`] when no error is shown.
    pub fn dismiss(&mut self) -> CanvasResult<()> {
        if !matches!(self, Self::ErrorShown { .. }) {
            return Err(CanvasError::invalid_transition("dismiss the error", self));
        }
        *self = Self::Idle;
        Ok(())
    }

    /// Check that the canvas may be cleared (idle only).
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::InvalidTransition`] when not idle.
    pub fn ensure_can_clear(&self) -> CanvasResult<()> {
        if self.is_idle() {
            Ok(())
        } else {
            Err(CanvasError::invalid_transition("clear", self))
        }
    }

    /// The failure category, if the error dialog is open.
    #[must_use]
    pub fn failure_kind(&self) -> Option<FailureKind> {
        match self {
            Self::ErrorShown { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    /// The text the error dialog displays, if it is open.
    #[must_use]
    pub fn error_text(&self) -> Option<String> {
        match self {
            Self::ErrorShown { raw_error, .. } => Some(extract_error_message(raw_error)),
            _ => None,
        }
    }
}
