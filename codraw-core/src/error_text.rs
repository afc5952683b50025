//! Human-readable error text for the error dialog.
//!
//! Errors from the generation boundary often embed the API's JSON error body,
//! e.g. `got status 429: {"error":{"code":429,"message":"quota exceeded"}}`.
//! The dialog shows just the inner `message` when one can be found and the
//! raw text otherwise.

use serde_json::Value;

/// Shown when a failure carries no message of its own.
pub const FALLBACK_ERROR_MESSAGE: &str = "An unexpected error occurred.";

const ERROR_OBJECT_PREFIX: &str = "{\"error\":";

/// Extract the `message` of an embedded `{"error":{...}}` object.
///
/// Falls back to `raw` unchanged when there is no embedded error object, it
/// is not valid JSON, or it has no non-empty string `message`.
#[must_use]
pub fn extract_error_message(raw: &str) -> String {
    embedded_message(raw).unwrap_or_else(|| raw.to_string())
}

fn embedded_message(raw: &str) -> Option<String> {
    let start = raw.find(ERROR_OBJECT_PREFIX)? + ERROR_OBJECT_PREFIX.len();
    let rest = &raw[start..];
    let inner = &rest[..rest.rfind('}')?];

    let error: Value = serde_json::from_str(inner).ok()?;
    match error.get("message") {
        Some(Value::String(message)) if !message.is_empty() => Some(message.clone()),
        _ => {
            tracing::debug!("Embedded error object has no message");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_error_body() {
        assert_eq!(
            extract_error_message(r#"{"error":{"message":"quota exceeded"}}"#),
            "quota exceeded"
        );
    }

    #[test]
    fn error_body_embedded_in_text() {
        let raw = r#"generation API returned 429 Too Many Requests: {"error":{"code":429,"message":"Resource has been exhausted","status":"RESOURCE_EXHAUSTED"}}"#;
        assert_eq!(extract_error_message(raw), "Resource has been exhausted");
    }

    #[test]
    fn plain_text_is_returned_verbatim() {
        assert_eq!(
            extract_error_message("connection refused"),
            "connection refused"
        );
    }

    #[test]
    fn malformed_json_is_returned_verbatim() {
        let raw = r#"{"error":{"message": oops}}"#;
        assert_eq!(extract_error_message(raw), raw);
    }

    #[test]
    fn missing_or_empty_message_is_returned_verbatim() {
        let raw = r#"{"error":{"code":500}}"#;
        assert_eq!(extract_error_message(raw), raw);

        let raw = r#"{"error":{"message":""}}"#;
        assert_eq!(extract_error_message(raw), raw);
    }

    #[test]
    fn non_object_error_is_returned_verbatim() {
        let raw = r#"{"error":"nope"}"#;
        assert_eq!(extract_error_message(raw), raw);
    }
}
