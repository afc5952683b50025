//! Image decoding.
//!
//! Generated images arrive as base64 payloads; starting backgrounds may be
//! read from disk. Both are decoded with the `image` crate into straight-alpha
//! RGBA and converted into a premultiplied tiny-skia [`Pixmap`] for drawing.

use codraw_core::ImagePayload;
use tiny_skia::{IntSize, Pixmap};

use crate::error::{RenderError, RenderResult};

/// Decoded RGBA image data.
#[derive(Debug, Clone)]
pub struct TextureData {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// RGBA pixel data (4 bytes per pixel, straight alpha).
    pub data: Vec<u8>,
    /// Original format of the image.
    pub format: ImageFormat,
}

impl TextureData {
    /// Convert into a premultiplied pixmap.
    ///
    /// # Errors
    ///
    /// Returns an error if the dimensions are zero or do not match the data.
    #[allow(clippy::cast_possible_truncation)]
    pub fn to_pixmap(&self) -> RenderResult<Pixmap> {
        let size = IntSize::from_wh(self.width, self.height).ok_or_else(|| {
            RenderError::Resource(format!(
                "Invalid image size {}x{}",
                self.width, self.height
            ))
        })?;
        if self.data.len() != self.width as usize * self.height as usize * 4 {
            return Err(RenderError::Resource(
                "Pixel data does not match image size".to_string(),
            ));
        }

        let mut premultiplied = Vec::with_capacity(self.data.len());
        for px in self.data.chunks_exact(4) {
            let alpha = u16::from(px[3]);
            let scale = |c: u8| ((u16::from(c) * alpha + 127) / 255) as u8;
            premultiplied.extend_from_slice(&[scale(px[0]), scale(px[1]), scale(px[2]), px[3]]);
        }

        Pixmap::from_vec(premultiplied, size)
            .ok_or_else(|| RenderError::Resource("Failed to build pixmap".to_string()))
    }
}

/// Supported image formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    /// PNG with alpha support.
    Png,
    /// JPEG (no alpha).
    Jpeg,
    /// WebP (alpha support).
    WebP,
    /// Unknown/other format.
    Unknown,
}

impl ImageFormat {
    /// Detect format from MIME type.
    #[must_use]
    pub fn from_mime(mime: &str) -> Self {
        match mime.to_lowercase().as_str() {
            "image/png" => Self::Png,
            "image/jpeg" | "image/jpg" => Self::Jpeg,
            "image/webp" => Self::WebP,
            _ => Self::Unknown,
        }
    }

    /// Detect format from magic bytes.
    #[must_use]
    pub fn from_magic_bytes(data: &[u8]) -> Self {
        if data.len() < 4 {
            return Self::Unknown;
        }

        // PNG: 89 50 4E 47
        if data.starts_with(&[0x89, 0x50, 0x4E, 0x47]) {
            return Self::Png;
        }

        // JPEG: FF D8 FF
        if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
            return Self::Jpeg;
        }

        // WebP: RIFF....WEBP
        if data.len() >= 12 && &data[0..4] == b"RIFF" && &data[8..12] == b"WEBP" {
            return Self::WebP;
        }

        Self::Unknown
    }
}

/// Load an image from raw bytes.
///
/// # Errors
///
/// Returns an error if the image cannot be decoded.
pub fn load_image_from_bytes(data: &[u8]) -> RenderResult<TextureData> {
    let format = ImageFormat::from_magic_bytes(data);

    let img = image::load_from_memory(data)
        .map_err(|e| RenderError::Resource(format!("Failed to decode image: {e}")))?;

    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();

    Ok(TextureData {
        width,
        height,
        data: rgba.into_raw(),
        format,
    })
}

/// Load an image from a base64 payload.
///
/// A declared MIME type that disagrees with the decoded bytes is logged and
/// otherwise ignored; the bytes win.
///
/// # Errors
///
/// Returns an error if the payload is not base64 or the image cannot be decoded.
pub fn load_image_from_payload(payload: &ImagePayload) -> RenderResult<TextureData> {
    let bytes = payload.decode()?;
    let texture = load_image_from_bytes(&bytes)?;

    let declared = ImageFormat::from_mime(&payload.mime_type);
    if declared != ImageFormat::Unknown && declared != texture.format {
        tracing::warn!(
            "Payload declared {} but decoded as {:?}",
            payload.mime_type,
            texture.format
        );
    }

    Ok(texture)
}

/// Create a solid color texture.
#[cfg(any(test, feature = "test-support"))]
#[must_use]
pub fn create_solid_color(width: u32, height: u32, r: u8, g: u8, b: u8, a: u8) -> TextureData {
    let pixel_count = (width * height) as usize;
    let mut data = Vec::with_capacity(pixel_count * 4);

    for _ in 0..pixel_count {
        data.extend_from_slice(&[r, g, b, a]);
    }

    TextureData {
        width,
        height,
        data,
        format: ImageFormat::Unknown,
    }
}
