//! JSON shapes of the Gemini `generateContent` API.
//!
//! Only the fields this client sends or reads are modelled; unknown response
//! fields are ignored.

use codraw_core::ImagePayload;
use serde::{Deserialize, Serialize};

use crate::request::{GenerationOutput, GenerationRequest};

const USER_ROLE: &str = "user";

/// Request body.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    /// Ordered conversation contents.
    pub contents: Vec<Content>,
    /// Generation options.
    pub generation_config: GenerationConfig,
}

impl GenerateContentRequest {
    /// Build the body for a submission.
    ///
    /// Prompt only: one content with the prompt text. With a sketch: the
    /// image content first, then the prompt with the style suffix.
    #[must_use]
    pub fn from_request(request: &GenerationRequest) -> Self {
        let contents = match &request.image {
            None => vec![Content::user(vec![Part::text(&request.prompt)])],
            Some(image) => vec![
                Content::user(vec![Part::inline(image)]),
                Content::user(vec![Part::text(request.styled_prompt())]),
            ],
        };

        Self {
            contents,
            generation_config: GenerationConfig {
                response_modalities: vec![Modality::Text, Modality::Image],
            },
        }
    }
}

/// One conversation turn.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Content {
    /// Author role.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Ordered parts.
    #[serde(default)]
    pub parts: Vec<Part>,
}

impl Content {
    fn user(parts: Vec<Part>) -> Self {
        Self {
            role: Some(USER_ROLE.to_string()),
            parts,
        }
    }
}

/// A text or inline-data fragment.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    /// Text content.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Inline binary content.
    #[serde(default, alias = "inline_data", skip_serializing_if = "Option::is_none")]
    pub inline_data: Option<InlineData>,
}

impl Part {
    fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            inline_data: None,
        }
    }

    fn inline(image: &ImagePayload) -> Self {
        Self {
            text: None,
            inline_data: Some(InlineData {
                mime_type: image.mime_type.clone(),
                data: image.data.clone(),
            }),
        }
    }
}

/// Base64 data with its MIME type.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    /// MIME type.
    #[serde(default, alias = "mime_type")]
    pub mime_type: String,
    /// Base64 data.
    #[serde(default)]
    pub data: String,
}

/// Generation options.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    /// Output kinds the model may produce.
    pub response_modalities: Vec<Modality>,
}

/// Output modality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Modality {
    /// Text output.
    Text,
    /// Image output.
    Image,
}

/// Response body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenerateContentResponse {
    /// Candidate completions; only the first is used.
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

/// One candidate completion.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Candidate {
    /// Candidate content, absent when generation was blocked.
    #[serde(default)]
    pub content: Option<Content>,
}

impl GenerateContentResponse {
    /// Fold the first candidate's parts into an output: the last non-empty
    /// text part is the message, the last non-empty inline part the image.
    #[must_use]
    pub fn into_output(self) -> GenerationOutput {
        let mut output = GenerationOutput::default();
        let parts = self
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|c| c.parts)
            .unwrap_or_default();

        for part in parts {
            if let Some(text) = part.text.filter(|t| !t.is_empty()) {
                output.message = Some(text);
            } else if let Some(inline) = part.inline_data.filter(|d| !d.data.is_empty()) {
                let mime_type = if inline.mime_type.is_empty() {
                    codraw_core::PNG_MIME.to_string()
                } else {
                    inline.mime_type
                };
                output.image = Some(ImagePayload::new(mime_type, inline.data));
            }
        }
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn prompt_only_body() {
        let body = GenerateContentRequest::from_request(&GenerationRequest::new("a tree"));
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({
                "contents": [{"role": "user", "parts": [{"text": "a tree"}]}],
                "generationConfig": {"responseModalities": ["TEXT", "IMAGE"]}
            })
        );
    }

    #[test]
    fn sketch_body_puts_image_first() {
        let request = GenerationRequest::new("a tree")
            .with_image(ImagePayload::new("image/png", "AAAA"));
        let value = serde_json::to_value(GenerateContentRequest::from_request(&request)).unwrap();
        assert_eq!(
            value["contents"],
            json!([
                {"role": "user", "parts": [{"inlineData": {"mimeType": "image/png", "data": "AAAA"}}]},
                {"role": "user", "parts": [{"text": "a tree. Keep the same minimal line doodle style."}]}
            ])
        );
    }

    #[test]
    fn last_parts_win() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{"content": {"role": "model", "parts": [
                {"text": "first"},
                {"inlineData": {"mimeType": "image/png", "data": "ONE"}},
                {"text": "second"},
                {"inlineData": {"mimeType": "image/jpeg", "data": "TWO"}}
            ]}}]
        }))
        .unwrap();
        let output = response.into_output();
        assert_eq!(output.message.as_deref(), Some("second"));
        assert_eq!(output.image, Some(ImagePayload::new("image/jpeg", "TWO")));
    }

    #[test]
    fn missing_candidates_yield_empty_output() {
        let response: GenerateContentResponse = serde_json::from_value(json!({})).unwrap();
        assert_eq!(response.into_output(), GenerationOutput::default());

        let blocked: GenerateContentResponse =
            serde_json::from_value(json!({"candidates": [{"finishReason": "SAFETY"}]})).unwrap();
        assert_eq!(blocked.into_output(), GenerationOutput::default());
    }

    #[test]
    fn missing_mime_type_defaults_to_png() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{"content": {"parts": [{"inlineData": {"data": "AAAA"}}]}}]
        }))
        .unwrap();
        assert_eq!(
            response.into_output().image.map(|i| i.mime_type),
            Some("image/png".to_string())
        );
    }
}
