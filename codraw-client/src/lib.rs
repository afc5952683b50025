//! # Co-Drawing Generation Client
//!
//! Sends a prompt, optionally with the exported sketch, to a generative image
//! API and returns the text and image it produced.
//!
//! The [`GenerationClient`] trait is the seam the session controller talks
//! to; [`GeminiClient`] implements it over the Gemini `generateContent` REST
//! endpoint. Clients are constructed explicitly and injected, so tests can
//! substitute their own implementation.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod gemini;
pub mod request;
pub mod wire;

pub use error::GenerationError;
pub use gemini::{ClientConfig, GeminiClient, DEFAULT_ENDPOINT, DEFAULT_MODEL};
pub use request::{GenerationOutput, GenerationRequest, GenerationResult, STYLE_SUFFIX};

use async_trait::async_trait;

/// A generation boundary: one request in, one complete response out.
#[async_trait]
pub trait GenerationClient: Send + Sync {
    /// Perform a single generation round trip.
    ///
    /// A response without an image is `Ok` with [`GenerationOutput::image`]
    /// set to `None`; deciding whether that is a failure is up to the caller.
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be sent, the service rejects
    /// it, or the response cannot be parsed.
    async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<GenerationOutput, GenerationError>;

    /// Perform a round trip and fold any error into a [`GenerationResult`].
    async fn generate_result(&self, request: &GenerationRequest) -> GenerationResult {
        self.generate(request).await.into()
    }
}
