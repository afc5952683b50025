//! Generation client errors.

use thiserror::Error;

/// Errors that can occur when talking to the generation service.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// The configured endpoint URL is invalid.
    #[error("invalid generation endpoint URL: {0}")]
    InvalidUrl(String),
    /// No credential was configured and no override was supplied.
    #[error("no API key configured; set GEMINI_API_KEY or supply an override key")]
    MissingCredential,
    /// The prompt was empty.
    #[error("prompt must not be empty")]
    EmptyPrompt,
    /// HTTP layer failed (connection, timeout, etc.).
    #[error("generation request failed: {0}")]
    Http(#[from] reqwest::Error),
    /// JSON parsing failed.
    #[error("failed to parse generation response: {0}")]
    Json(#[from] serde_json::Error),
    /// The service answered with a non-success status.
    #[error("generation API returned {status}: {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Response body, compacted when it is JSON.
        body: String,
    },
}
