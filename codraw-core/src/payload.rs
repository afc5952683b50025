//! Encoded image payloads.
//!
//! A payload is the base64 text of an encoded raster image with the
//! `data:<mime>;base64,` preamble stripped off. The canvas export produces
//! one and the generation boundary returns one.

use std::fmt;

use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::error::{CanvasError, CanvasResult};

/// MIME type used for exported sketches.
pub const PNG_MIME: &str = "image/png";

/// Base64-encoded image data plus its MIME type.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImagePayload {
    /// MIME type of the encoded image.
    pub mime_type: String,
    /// Base64 data without any data-URI preamble.
    pub data: String,
}

impl ImagePayload {
    /// Wrap already-encoded base64 data.
    #[must_use]
    pub fn new(mime_type: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            mime_type: mime_type.into(),
            data: data.into(),
        }
    }

    /// Encode raw image bytes.
    #[must_use]
    pub fn encode(mime_type: impl Into<String>, bytes: &[u8]) -> Self {
        Self::new(
            mime_type,
            base64::engine::general_purpose::STANDARD.encode(bytes),
        )
    }

    /// Encode raw PNG bytes.
    #[must_use]
    pub fn png(bytes: &[u8]) -> Self {
        Self::encode(PNG_MIME, bytes)
    }

    /// Parse a base64 data URI such as `data:image/png;base64,iVBOR...`,
    /// keeping only the payload after the comma.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::InvalidPayload`] if the URI is not a base64
    /// data URI.
    pub fn from_data_uri(uri: &str) -> CanvasResult<Self> {
        let rest = uri
            .strip_prefix("data:")
            .ok_or_else(|| CanvasError::InvalidPayload("not a data URI".to_string()))?;
        let (metadata, data) = rest
            .split_once(',')
            .ok_or_else(|| CanvasError::InvalidPayload("missing comma".to_string()))?;
        let mime_type = metadata
            .strip_suffix(";base64")
            .ok_or_else(|| CanvasError::InvalidPayload("data URI is not base64".to_string()))?;

        Ok(Self::new(mime_type, data))
    }

    /// Render this payload back into a data URI.
    #[must_use]
    pub fn to_data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.data)
    }

    /// Decode the base64 data into raw image bytes.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::InvalidPayload`] if the data is not valid base64.
    pub fn decode(&self) -> CanvasResult<Vec<u8>> {
        base64::engine::general_purpose::STANDARD
            .decode(self.data.trim())
            .map_err(|e| CanvasError::InvalidPayload(format!("failed to decode base64: {e}")))
    }

    /// Whether the payload carries no data.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Length of the base64 data in characters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// The first `max` characters of the data, for logging.
    #[must_use]
    pub fn preview(&self, max: usize) -> String {
        match self.data.char_indices().nth(max) {
            Some((end, _)) => format!("{}... (truncated)", &self.data[..end]),
            None => self.data.clone(),
        }
    }
}

impl fmt::Debug for ImagePayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImagePayload")
            .field("mime_type", &self.mime_type)
            .field("data", &self.preview(50))
            .finish()
    }
}
