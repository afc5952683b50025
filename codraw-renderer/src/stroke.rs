//! Freehand stroke rendering.
//!
//! A stroke starts on pointer-down, grows by one segment per pointer-move
//! while the pen is down, and ends on pointer-up or when the pointer leaves
//! the canvas. Each segment is rasterized as soon as it arrives; nothing is
//! buffered or replayed.

use codraw_core::{CanvasGeometry, PenColor, Point, PointerEvent, PointerPhase};

use crate::surface::CanvasSurface;

/// What the host should do after an input event was handled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputResponse {
    /// Suppress the platform's default touch gesture (scroll, zoom).
    pub prevent_default: bool,
    /// Whether pixels changed.
    pub painted: bool,
}

/// Pen state for freehand drawing.
#[derive(Debug, Clone, Default)]
pub struct StrokeRenderer {
    drawing: bool,
    color: PenColor,
    last: Option<Point>,
}

impl StrokeRenderer {
    /// Create a renderer with a black pen.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the pen is down.
    #[must_use]
    pub fn is_drawing(&self) -> bool {
        self.drawing
    }

    /// The current pen color.
    #[must_use]
    pub fn color(&self) -> PenColor {
        self.color
    }

    /// Change the pen color. Applies to segments drawn from now on.
    pub fn set_color(&mut self, color: PenColor) {
        self.color = color;
    }

    /// Put the pen down at `point`, starting a new path.
    pub fn begin(&mut self, point: Point) {
        self.drawing = true;
        self.last = Some(point);
    }

    /// Extend the current path to `point`, painting the new segment.
    ///
    /// Returns `false` without touching the surface when the pen is up.
    pub fn extend(&mut self, surface: &mut CanvasSurface, point: Point) -> bool {
        if !self.drawing {
            return false;
        }
        let from = self.last.unwrap_or(point);
        surface.draw_segment(from, point, self.color);
        self.last = Some(point);
        true
    }

    /// Lift the pen.
    pub fn end(&mut self) {
        self.drawing = false;
        self.last = None;
    }

    /// Dispatch a pointer event.
    pub fn handle(
        &mut self,
        surface: &mut CanvasSurface,
        geometry: &CanvasGeometry,
        event: &PointerEvent,
    ) -> InputResponse {
        if event.ends_stroke() {
            self.end();
            return InputResponse::default();
        }

        let touch = event.input.is_touch();
        match event.phase {
            PointerPhase::Down => {
                if let Some(point) = geometry.map(&event.input) {
                    tracing::trace!("Pen down at ({:.1}, {:.1})", point.x, point.y);
                    self.begin(point);
                }
                InputResponse {
                    prevent_default: touch,
                    painted: false,
                }
            }
            PointerPhase::Move => {
                if !self.drawing {
                    return InputResponse::default();
                }
                let painted = geometry
                    .map(&event.input)
                    .is_some_and(|point| self.extend(surface, point));
                InputResponse {
                    prevent_default: touch,
                    painted,
                }
            }
            PointerPhase::Up | PointerPhase::Leave => InputResponse::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use codraw_core::PointerInput;
    use proptest::prelude::*;

    fn surface() -> CanvasSurface {
        CanvasSurface::new(200, 200).unwrap()
    }

    fn mouse(phase: PointerPhase, x: f32, y: f32) -> PointerEvent {
        PointerEvent::new(phase, PointerInput::mouse(x, y))
    }

    #[test]
    fn moves_without_pen_down_do_nothing() {
        let mut surface = surface();
        let mut pen = StrokeRenderer::new();
        let geometry = CanvasGeometry::unscaled(200, 200);

        let response = pen.handle(&mut surface, &geometry, &mouse(PointerPhase::Move, 50.0, 50.0));
        assert_eq!(response, InputResponse::default());
        assert!(surface.is_blank());
    }

    #[test]
    fn one_connected_stroke_per_down_up_cycle() {
        let mut surface = surface();
        let mut pen = StrokeRenderer::new();
        let geometry = CanvasGeometry::unscaled(200, 200);

        pen.handle(&mut surface, &geometry, &mouse(PointerPhase::Down, 20.0, 20.0));
        assert!(surface.is_blank(), "pen-down alone paints nothing");
        pen.handle(&mut surface, &geometry, &mouse(PointerPhase::Move, 120.0, 20.0));
        pen.handle(&mut surface, &geometry, &mouse(PointerPhase::Move, 120.0, 120.0));
        pen.handle(&mut surface, &geometry, &mouse(PointerPhase::Up, 120.0, 120.0));
        assert!(!pen.is_drawing());

        for (x, y) in [(20, 20), (70, 20), (120, 20), (120, 70), (120, 120)] {
            assert_eq!(surface.pixel(x, y), Some([0, 0, 0, 255]), "pixel ({x},{y})");
        }
        // The corner is not bridged diagonally.
        assert_eq!(surface.pixel(70, 70), Some([255, 255, 255, 255]));

        let snapshot = surface.pixmap().clone();
        pen.handle(&mut surface, &geometry, &mouse(PointerPhase::Move, 180.0, 180.0));
        assert_eq!(surface.pixmap().data(), snapshot.data());
    }

    #[test]
    fn leave_ends_stroke() {
        let mut surface = surface();
        let mut pen = StrokeRenderer::new();
        let geometry = CanvasGeometry::unscaled(200, 200);

        pen.handle(&mut surface, &geometry, &mouse(PointerPhase::Down, 10.0, 10.0));
        pen.handle(&mut surface, &geometry, &mouse(PointerPhase::Leave, 10.0, 10.0));
        assert!(!pen.is_drawing());
    }

    #[test]
    fn new_stroke_does_not_connect_to_previous_one() {
        let mut surface = surface();
        let mut pen = StrokeRenderer::new();
        let geometry = CanvasGeometry::unscaled(200, 200);

        pen.handle(&mut surface, &geometry, &mouse(PointerPhase::Down, 20.0, 20.0));
        pen.handle(&mut surface, &geometry, &mouse(PointerPhase::Move, 40.0, 20.0));
        pen.handle(&mut surface, &geometry, &mouse(PointerPhase::Up, 40.0, 20.0));
        pen.handle(&mut surface, &geometry, &mouse(PointerPhase::Down, 160.0, 20.0));
        pen.handle(&mut surface, &geometry, &mouse(PointerPhase::Move, 180.0, 20.0));

        assert_eq!(surface.pixel(100, 20), Some([255, 255, 255, 255]));
        assert_eq!(surface.pixel(170, 20), Some([0, 0, 0, 255]));
    }

    #[test]
    fn touch_input_requests_default_suppression() {
        let mut surface = surface();
        let mut pen = StrokeRenderer::new();
        let geometry = CanvasGeometry::unscaled(200, 200);

        let down = PointerEvent::new(PointerPhase::Down, PointerInput::touch(30.0, 30.0));
        assert!(pen.handle(&mut surface, &geometry, &down).prevent_default);

        let moved = PointerEvent::new(PointerPhase::Move, PointerInput::touch(60.0, 30.0));
        let response = pen.handle(&mut surface, &geometry, &moved);
        assert!(response.prevent_default);
        assert!(response.painted);

        let end = PointerEvent::new(PointerPhase::Up, PointerInput::touch_released());
        pen.handle(&mut surface, &geometry, &end);
        assert!(!pen.is_drawing());

        let mouse_down = mouse(PointerPhase::Down, 1.0, 1.0);
        assert!(!pen.handle(&mut surface, &geometry, &mouse_down).prevent_default);
    }

    #[test]
    fn color_change_applies_to_next_segment() {
        let mut surface = surface();
        let mut pen = StrokeRenderer::new();
        pen.set_color(PenColor::rgb(0, 128, 255));
        pen.begin(Point::new(10.0, 100.0));
        pen.extend(&mut surface, Point::new(190.0, 100.0));
        assert_eq!(surface.pixel(100, 100), Some([0, 128, 255, 255]));
    }

    fn arb_event() -> impl Strategy<Value = PointerEvent> {
        let phase = prop_oneof![
            Just(PointerPhase::Down),
            Just(PointerPhase::Move),
            Just(PointerPhase::Move),
            Just(PointerPhase::Move),
            Just(PointerPhase::Up),
            Just(PointerPhase::Leave),
        ];
        (phase, 0.0f32..200.0, 0.0f32..200.0).prop_map(|(phase, x, y)| mouse(phase, x, y))
    }

    proptest! {
        #[test]
        fn prop_pixels_change_only_while_drawing(
            events in prop::collection::vec(arb_event(), 0..40)
        ) {
            let mut surface = surface();
            let mut pen = StrokeRenderer::new();
            let geometry = CanvasGeometry::unscaled(200, 200);

            for event in &events {
                let was_drawing = pen.is_drawing();
                let before = surface.pixmap().data().to_vec();
                let response = pen.handle(&mut surface, &geometry, event);
                let changed = surface.pixmap().data() != before.as_slice();

                if changed {
                    prop_assert!(was_drawing && event.phase == PointerPhase::Move);
                    prop_assert!(response.painted);
                }
                prop_assert!(surface.is_opaque());
            }
        }
    }
}
