//! The canvas surface and its compositing rules.
//!
//! Layers from bottom to top: an opaque white fill, the optional background
//! image stretched to the full surface, then freehand strokes committed
//! directly into the same pixel buffer. The surface is never transparent.

use codraw_core::{PenColor, Point, CANVAS_HEIGHT, CANVAS_WIDTH, STROKE_WIDTH};
use tiny_skia::{
    Color, FilterQuality, LineCap, LineJoin, Paint, PathBuilder, Pixmap, PixmapPaint, Stroke,
    Transform,
};

use crate::error::{RenderError, RenderResult};

/// Fixed-size, always-opaque drawing surface.
#[derive(Debug, Clone)]
pub struct CanvasSurface {
    pixmap: Pixmap,
    background: Option<Pixmap>,
}

impl CanvasSurface {
    /// Allocate a blank white surface.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Allocation`] if either dimension is zero.
    pub fn new(width: u32, height: u32) -> RenderResult<Self> {
        let pixmap = Pixmap::new(width, height).ok_or(RenderError::Allocation { width, height })?;
        let mut surface = Self {
            pixmap,
            background: None,
        };
        surface.reset_to_blank();
        Ok(surface)
    }

    /// Allocate a blank surface at the standard 960×540 canvas size.
    ///
    /// # Errors
    ///
    /// Returns an error if the surface cannot be allocated.
    pub fn with_default_size() -> RenderResult<Self> {
        Self::new(CANVAS_WIDTH, CANVAS_HEIGHT)
    }

    /// Surface width in pixels.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    /// Surface height in pixels.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// The visible pixels.
    #[must_use]
    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    /// The current background image, if any.
    #[must_use]
    pub fn background(&self) -> Option<&Pixmap> {
        self.background.as_ref()
    }

    /// Fill the whole surface with opaque white.
    ///
    /// The stored background is kept; see [`CanvasSurface::clear`].
    pub fn reset_to_blank(&mut self) {
        self.pixmap.fill(Color::WHITE);
    }

    /// Replace the background image and repaint: white first, then the image
    /// stretched over the full surface. Strokes drawn afterwards sit on top.
    pub fn paint_background(&mut self, image: Pixmap) {
        tracing::debug!(
            "Painting {}x{} background onto {}x{} surface",
            image.width(),
            image.height(),
            self.width(),
            self.height()
        );
        self.background = Some(image);
        self.repaint_background();
    }

    /// Blank the surface and discard the background image.
    pub fn clear(&mut self) {
        self.background = None;
        self.reset_to_blank();
    }

    #[allow(clippy::cast_precision_loss)]
    fn repaint_background(&mut self) {
        self.reset_to_blank();

        let Some(image) = &self.background else {
            return;
        };
        let sx = self.pixmap.width() as f32 / image.width() as f32;
        let sy = self.pixmap.height() as f32 / image.height() as f32;
        let paint = PixmapPaint {
            quality: FilterQuality::Bilinear,
            ..PixmapPaint::default()
        };
        self.pixmap.draw_pixmap(
            0,
            0,
            image.as_ref(),
            &paint,
            Transform::from_scale(sx, sy),
            None,
        );
    }

    /// Draw one stroke segment with round caps and joins.
    pub fn draw_segment(&mut self, from: Point, to: Point, color: PenColor) {
        let mut pb = PathBuilder::new();
        pb.move_to(from.x, from.y);
        pb.line_to(to.x, to.y);
        let Some(path) = pb.finish() else {
            return;
        };

        let mut paint = Paint::default();
        paint.set_color_rgba8(color.r, color.g, color.b, 255);
        paint.anti_alias = true;

        let stroke = Stroke {
            width: STROKE_WIDTH,
            line_cap: LineCap::Round,
            line_join: LineJoin::Round,
            ..Stroke::default()
        };

        self.pixmap
            .stroke_path(&path, &paint, &stroke, Transform::identity(), None);
    }

    /// Straight-alpha RGBA of the pixel at `(x, y)`.
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        self.pixmap.pixel(x, y).map(|p| {
            let c = p.demultiply();
            [c.red(), c.green(), c.blue(), c.alpha()]
        })
    }

    /// Whether every pixel is fully opaque.
    #[must_use]
    pub fn is_opaque(&self) -> bool {
        self.pixmap.pixels().iter().all(|p| p.alpha() == 255)
    }

    /// Whether every pixel is opaque white.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.pixmap.data().iter().all(|&b| b == 255)
    }

    /// Encode the visible pixels as PNG.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Export`] if encoding fails.
    pub fn encode_png(&self) -> RenderResult<Vec<u8>> {
        self.pixmap
            .encode_png()
            .map_err(|e| RenderError::Export(format!("PNG encoding failed: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::create_solid_color;

    #[test]
    fn new_surface_is_blank_and_opaque() {
        let surface = CanvasSurface::with_default_size().unwrap();
        assert_eq!((surface.width(), surface.height()), (960, 540));
        assert!(surface.is_blank());
        assert!(surface.is_opaque());
        assert!(surface.background().is_none());
    }

    #[test]
    fn zero_sized_surface_is_rejected() {
        assert!(matches!(
            CanvasSurface::new(0, 10),
            Err(RenderError::Allocation { width: 0, height: 10 })
        ));
    }

    #[test]
    fn segment_paints_pen_color() {
        let mut surface = CanvasSurface::new(100, 100).unwrap();
        let red = PenColor::rgb(255, 0, 0);
        surface.draw_segment(Point::new(10.0, 50.0), Point::new(90.0, 50.0), red);
        assert_eq!(surface.pixel(50, 50), Some([255, 0, 0, 255]));
        assert_eq!(surface.pixel(50, 10), Some([255, 255, 255, 255]));
        assert!(surface.is_opaque());
    }

    #[test]
    fn background_is_stretched_to_full_surface() {
        let mut surface = CanvasSurface::new(100, 50).unwrap();
        let blue = create_solid_color(10, 10, 0, 0, 255, 255).to_pixmap().unwrap();
        surface.paint_background(blue);

        for (x, y) in [(0, 0), (99, 0), (0, 49), (99, 49), (50, 25)] {
            assert_eq!(surface.pixel(x, y), Some([0, 0, 255, 255]), "pixel ({x},{y})");
        }
        assert!(surface.background().is_some());
    }

    #[test]
    fn transparent_background_shows_white() {
        let mut surface = CanvasSurface::new(40, 40).unwrap();
        let (from, to) = (Point::new(0.0, 20.0), Point::new(40.0, 20.0));
        surface.draw_segment(from, to, PenColor::BLACK);

        let clear = create_solid_color(8, 8, 0, 0, 0, 0).to_pixmap().unwrap();
        surface.paint_background(clear);

        assert!(surface.is_blank());
        assert!(surface.is_opaque());
    }

    #[test]
    fn clear_discards_background_and_strokes() {
        let mut surface = CanvasSurface::new(64, 64).unwrap();
        let green = create_solid_color(4, 4, 0, 255, 0, 255).to_pixmap().unwrap();
        surface.paint_background(green);
        let (from, to) = (Point::new(5.0, 5.0), Point::new(60.0, 60.0));
        surface.draw_segment(from, to, PenColor::BLACK);

        surface.clear();

        let fresh = CanvasSurface::new(64, 64).unwrap();
        assert_eq!(surface.pixmap().data(), fresh.pixmap().data());
        assert!(surface.background().is_none());
    }

    #[test]
    fn reset_keeps_background_reference() {
        let mut surface = CanvasSurface::new(16, 16).unwrap();
        let red = create_solid_color(2, 2, 255, 0, 0, 255).to_pixmap().unwrap();
        surface.paint_background(red);
        surface.reset_to_blank();
        assert!(surface.is_blank());
        assert!(surface.background().is_some());
    }

    #[test]
    fn encoded_png_has_signature() {
        let surface = CanvasSurface::new(8, 8).unwrap();
        let png = surface.encode_png().unwrap();
        assert_eq!(&png[0..4], &[0x89, 0x50, 0x4E, 0x47]);
    }
}
