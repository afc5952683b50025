//! Gemini `generateContent` client.
//!
//! One POST per submission to
//! `{endpoint}/v1beta/models/{model}:generateContent`, authenticated with the
//! `x-goog-api-key` header. No retries and no streaming: the call waits for
//! the complete response.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use url::Url;

use crate::error::GenerationError;
use crate::request::{GenerationOutput, GenerationRequest};
use crate::wire::{GenerateContentRequest, GenerateContentResponse};
use crate::GenerationClient;

/// Public Gemini API endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com";

/// Model with native image output.
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash-preview-image-generation";

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Configuration for [`GeminiClient`].
#[derive(Clone)]
pub struct ClientConfig {
    /// Base URL of the API.
    pub endpoint: String,
    /// Model identifier.
    pub model: String,
    /// Default credential, used unless a request overrides it.
    pub api_key: Option<String>,
    /// Whole-request timeout.
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key: None,
            timeout: Duration::from_secs(120),
        }
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .field("api_key", &self.api_key.as_ref().map(|_| "**********"))
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// HTTP client for the Gemini image generation API.
#[derive(Clone)]
pub struct GeminiClient {
    inner: Arc<InnerClient>,
}

struct InnerClient {
    http: Client,
    generate_url: Url,
    model: String,
    api_key: Option<String>,
}

impl GeminiClient {
    /// Create a new client.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::InvalidUrl`] if the endpoint is malformed.
    /// Returns [`GenerationError::Http`] if the HTTP client fails to build.
    pub fn new(config: ClientConfig) -> Result<Self, GenerationError> {
        let generate_url = Self::generate_url(&config.endpoint, &config.model)?;

        let http = Client::builder()
            .user_agent(concat!("codraw/", env!("CARGO_PKG_VERSION")))
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            inner: Arc::new(InnerClient {
                http,
                generate_url,
                model: config.model,
                api_key: config.api_key.filter(|k| !k.trim().is_empty()),
            }),
        })
    }

    /// The model requests are sent to.
    #[must_use]
    pub fn model(&self) -> &str {
        &self.inner.model
    }

    fn generate_url(endpoint: &str, model: &str) -> Result<Url, GenerationError> {
        let mut url =
            Url::parse(endpoint).map_err(|e| GenerationError::InvalidUrl(e.to_string()))?;
        if model.trim().is_empty() {
            return Err(GenerationError::InvalidUrl("model must not be empty".into()));
        }

        let method = format!("{model}:generateContent");
        url.path_segments_mut()
            .map_err(|()| {
                GenerationError::InvalidUrl(format!("{endpoint} cannot be a base URL"))
            })?
            .pop_if_empty()
            .extend(["v1beta", "models", method.as_str()]);
        Ok(url)
    }

    fn credential<'a>(
        &'a self,
        request: &'a GenerationRequest,
    ) -> Result<&'a str, GenerationError> {
        request
            .override_credential
            .as_deref()
            .or(self.inner.api_key.as_deref())
            .ok_or(GenerationError::MissingCredential)
    }

    /// Compact a JSON error body so an embedded `{"error":{...}}` object sits
    /// on one line; non-JSON bodies are returned trimmed.
    fn compact_body(body: &str) -> String {
        serde_json::from_str::<Value>(body)
            .map_or_else(|_| body.trim().to_string(), |v| v.to_string())
    }
}

#[async_trait]
impl GenerationClient for GeminiClient {
    async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<GenerationOutput, GenerationError> {
        if request.prompt.trim().is_empty() {
            return Err(GenerationError::EmptyPrompt);
        }
        let api_key = self.credential(request)?;
        let body = GenerateContentRequest::from_request(request);

        tracing::info!(
            request_id = %request.request_id,
            model = %self.inner.model,
            with_sketch = request.image.is_some(),
            "Sending generation request"
        );
        tracing::debug!("Request payload: {request:?}");

        let response = self
            .inner
            .http
            .post(self.inner.generate_url.clone())
            .header(API_KEY_HEADER, api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            tracing::warn!(
                request_id = %request.request_id,
                status = status.as_u16(),
                "Generation request rejected"
            );
            return Err(GenerationError::Api {
                status: status.as_u16(),
                body: Self::compact_body(&text),
            });
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&text)?;
        let output = parsed.into_output();

        tracing::info!(
            request_id = %request.request_id,
            has_message = output.message.is_some(),
            image_len = output.image.as_ref().map_or(0, codraw_core::ImagePayload::len),
            "Received generation response"
        );
        if let Some(message) = &output.message {
            tracing::debug!("Model text: {message}");
        }

        Ok(output)
    }
}
