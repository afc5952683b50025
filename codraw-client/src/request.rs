//! Generation requests and results.

use std::fmt;

use codraw_core::{ImagePayload, FALLBACK_ERROR_MESSAGE};
use uuid::Uuid;

use crate::error::GenerationError;

/// Appended to the prompt whenever a sketch accompanies it.
pub const STYLE_SUFFIX: &str = ". Keep the same minimal line doodle style.";

/// A single submission to the generation boundary.
#[derive(Clone)]
pub struct GenerationRequest {
    /// Correlates log lines for this submission.
    pub request_id: Uuid,
    /// The user's prompt, as typed.
    pub prompt: String,
    /// Exported sketch, if any.
    pub image: Option<ImagePayload>,
    /// Credential replacing the client's default for this call.
    pub override_credential: Option<String>,
}

impl GenerationRequest {
    /// Create a prompt-only request.
    #[must_use]
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            request_id: Uuid::new_v4(),
            prompt: prompt.into(),
            image: None,
            override_credential: None,
        }
    }

    /// Use a specific request id.
    #[must_use]
    pub fn with_request_id(mut self, request_id: Uuid) -> Self {
        self.request_id = request_id;
        self
    }

    /// Attach the exported sketch.
    #[must_use]
    pub fn with_image(mut self, image: ImagePayload) -> Self {
        self.image = Some(image);
        self
    }

    /// Override the credential for this call. Blank values are ignored.
    #[must_use]
    pub fn with_override_credential(mut self, credential: Option<String>) -> Self {
        self.override_credential = credential.filter(|c| !c.trim().is_empty());
        self
    }

    /// The prompt text sent alongside a sketch.
    #[must_use]
    pub fn styled_prompt(&self) -> String {
        format!("{}{STYLE_SUFFIX}", self.prompt)
    }
}

impl fmt::Debug for GenerationRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GenerationRequest")
            .field("request_id", &self.request_id)
            .field("prompt", &self.prompt)
            .field("image", &self.image)
            .field(
                "override_credential",
                &self.override_credential.as_ref().map(|_| "**********"),
            )
            .finish()
    }
}

/// What the generation boundary returned.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationOutput {
    /// The last text part, if any.
    pub message: Option<String>,
    /// The last inline image part, if any.
    pub image: Option<ImagePayload>,
}

/// Flattened outcome of a generation call, errors included.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationResult {
    /// Whether the round trip completed without error.
    pub success: bool,
    /// Text returned by the model.
    pub message: Option<String>,
    /// Image returned by the model.
    pub image: Option<ImagePayload>,
    /// Error text when the round trip failed.
    pub error: Option<String>,
}

impl GenerationResult {
    /// Whether there is an image to display.
    #[must_use]
    pub fn has_image(&self) -> bool {
        self.success && self.image.is_some()
    }
}

impl From<Result<GenerationOutput, GenerationError>> for GenerationResult {
    fn from(result: Result<GenerationOutput, GenerationError>) -> Self {
        match result {
            Ok(output) => Self {
                success: true,
                message: output.message,
                image: output.image,
                error: None,
            },
            Err(e) => {
                let mut error = e.to_string();
                if error.trim().is_empty() {
                    error = FALLBACK_ERROR_MESSAGE.to_string();
                }
                Self {
                    success: false,
                    message: None,
                    image: None,
                    error: Some(error),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn styled_prompt_appends_suffix() {
        let request = GenerationRequest::new("a cat");
        assert_eq!(
            request.styled_prompt(),
            "a cat. Keep the same minimal line doodle style."
        );
    }

    #[test]
    fn blank_override_is_dropped() {
        let request = GenerationRequest::new("x").with_override_credential(Some("  ".into()));
        assert!(request.override_credential.is_none());
        let request = GenerationRequest::new("x").with_override_credential(Some("k".into()));
        assert_eq!(request.override_credential.as_deref(), Some("k"));
    }

    #[test]
    fn debug_masks_credential_and_truncates_image() {
        let request = GenerationRequest::new("x")
            .with_image(ImagePayload::new("image/png", "B".repeat(400)))
            .with_override_credential(Some("secret-key".into()));
        let debug = format!("{request:?}");
        assert!(!debug.contains("secret-key"));
        assert!(debug.contains("**********"));
        assert!(debug.contains("(truncated)"));
    }

    #[test]
    fn result_from_error_carries_message() {
        let result: GenerationResult = Err(GenerationError::Api {
            status: 429,
            body: r#"{"error":{"message":"quota exceeded"}}"#.into(),
        })
        .into();
        assert!(!result.success);
        assert!(!result.has_image());
        assert!(result.error.unwrap().contains("quota exceeded"));
    }

    #[test]
    fn result_from_empty_output_is_success_without_image() {
        let result: GenerationResult = Ok(GenerationOutput {
            message: Some("hi".into()),
            image: None,
        })
        .into();
        assert!(result.success);
        assert!(!result.has_image());
        assert_eq!(result.message.as_deref(), Some("hi"));
    }
}
