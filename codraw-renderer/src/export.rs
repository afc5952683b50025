//! Canvas export to an encoded image payload.
//!
//! The live canvas is flattened onto an offscreen surface filled with an
//! opaque background, encoded as PNG and base64-encoded without a data-URI
//! header. That payload is the only representation of the sketch that leaves
//! the renderer.

use codraw_core::ImagePayload;
use tiny_skia::{Color, Pixmap, PixmapPaint, Transform};

use crate::error::{RenderError, RenderResult};
use crate::surface::CanvasSurface;

/// Configuration for sketch export.
#[derive(Debug, Clone)]
pub struct ExportConfig {
    /// Opaque background RGB the canvas is flattened onto.
    pub background: [u8; 3],
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            background: [255, 255, 255],
        }
    }
}

/// Flattens and encodes a [`CanvasSurface`].
#[derive(Debug, Clone, Default)]
pub struct SketchExporter {
    config: ExportConfig,
}

impl SketchExporter {
    /// Create a new exporter with the given configuration.
    #[must_use]
    pub fn new(config: ExportConfig) -> Self {
        Self { config }
    }

    /// Create an exporter with default configuration.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::default()
    }

    /// Flatten the surface onto an opaque offscreen pixmap of the same size.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Allocation`] if the offscreen pixmap cannot be
    /// allocated.
    pub fn flatten(&self, surface: &CanvasSurface) -> RenderResult<Pixmap> {
        let (width, height) = (surface.width(), surface.height());
        let mut flat =
            Pixmap::new(width, height).ok_or(RenderError::Allocation { width, height })?;

        let [r, g, b] = self.config.background;
        flat.fill(Color::from_rgba8(r, g, b, 255));
        flat.draw_pixmap(
            0,
            0,
            surface.pixmap().as_ref(),
            &PixmapPaint::default(),
            Transform::identity(),
            None,
        );
        Ok(flat)
    }

    /// Export the surface as PNG bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if flattening or encoding fails.
    pub fn export_png(&self, surface: &CanvasSurface) -> RenderResult<Vec<u8>> {
        self.flatten(surface)?
            .encode_png()
            .map_err(|e| RenderError::Export(format!("PNG encoding failed: {e}")))
    }

    /// Export the surface as a base64 PNG payload.
    ///
    /// # Errors
    ///
    /// Returns an error if flattening or encoding fails.
    pub fn export_payload(&self, surface: &CanvasSurface) -> RenderResult<ImagePayload> {
        let png = self.export_png(surface)?;
        let payload = ImagePayload::png(&png);
        tracing::debug!(
            "Exported {}x{} sketch: {} PNG bytes, {} base64 chars",
            surface.width(),
            surface.height(),
            png.len(),
            payload.len()
        );
        Ok(payload)
    }
}
