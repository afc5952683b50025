//! Pointer input and coordinate mapping.
//!
//! The canvas is allocated at a fixed intrinsic size but rendered at whatever
//! size the host layout gives it. Mouse input arrives as offsets relative to
//! the rendered canvas, touch input as client coordinates of each finger.
//! Both are resolved once into [`PointerInput`] and mapped into intrinsic
//! pixel space through [`CanvasGeometry`].

use serde::{Deserialize, Serialize};

/// A point in intrinsic canvas pixel space.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// X coordinate in pixels.
    pub x: f32,
    /// Y coordinate in pixels.
    pub y: f32,
}

impl Point {
    /// Create a new point.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// The canvas's rendered bounding box in display (client) coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DisplayRect {
    /// Left edge in client coordinates.
    pub left: f32,
    /// Top edge in client coordinates.
    pub top: f32,
    /// Rendered width.
    pub width: f32,
    /// Rendered height.
    pub height: f32,
}

impl DisplayRect {
    /// Create a new display rectangle.
    #[must_use]
    pub const fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }
}

/// Intrinsic size of the canvas together with its current rendered box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CanvasGeometry {
    /// Intrinsic width in pixels.
    pub intrinsic_width: u32,
    /// Intrinsic height in pixels.
    pub intrinsic_height: u32,
    /// Rendered bounding box.
    pub rendered: DisplayRect,
}

impl CanvasGeometry {
    /// Create a geometry for a canvas rendered into `rendered`.
    #[must_use]
    pub const fn new(intrinsic_width: u32, intrinsic_height: u32, rendered: DisplayRect) -> Self {
        Self {
            intrinsic_width,
            intrinsic_height,
            rendered,
        }
    }

    /// A canvas rendered 1:1 at the client origin.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn unscaled(intrinsic_width: u32, intrinsic_height: u32) -> Self {
        Self::new(
            intrinsic_width,
            intrinsic_height,
            DisplayRect::new(
                0.0,
                0.0,
                intrinsic_width as f32,
                intrinsic_height as f32,
            ),
        )
    }

    /// Update the rendered box, e.g. after a layout change.
    pub fn set_rendered(&mut self, rendered: DisplayRect) {
        self.rendered = rendered;
    }

    /// Scale factors `(sx, sy)` from display space to intrinsic space.
    ///
    /// A degenerate rendered box scales by 1 on that axis.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn scale(&self) -> (f32, f32) {
        let axis = |intrinsic: u32, rendered: f32| {
            if rendered.is_finite() && rendered > 0.0 {
                intrinsic as f32 / rendered
            } else {
                1.0
            }
        };
        (
            axis(self.intrinsic_width, self.rendered.width),
            axis(self.intrinsic_height, self.rendered.height),
        )
    }

    /// Map a pointer input into intrinsic canvas space.
    ///
    /// Returns `None` for touch input with no active touches.
    #[must_use]
    pub fn map(&self, input: &PointerInput) -> Option<Point> {
        input.position(self)
    }
}

/// Mouse input: offsets relative to the rendered canvas's padding edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MouseInput {
    /// Horizontal offset in display pixels.
    pub offset_x: f32,
    /// Vertical offset in display pixels.
    pub offset_y: f32,
}

/// A single touch point in client coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TouchPoint {
    /// Touch identifier (for multi-touch).
    #[serde(default)]
    pub id: u32,
    /// X position in client coordinates.
    pub client_x: f32,
    /// Y position in client coordinates.
    pub client_y: f32,
}

/// Touch input with the list of currently active touches.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TouchInput {
    /// All current touch points. Empty on touch-end.
    #[serde(default)]
    pub touches: Vec<TouchPoint>,
}

impl TouchInput {
    /// Get the primary (first) touch point.
    #[must_use]
    pub fn primary_touch(&self) -> Option<&TouchPoint> {
        self.touches.first()
    }
}

/// Pointer input resolved at the input boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "lowercase")]
pub enum PointerInput {
    /// Mouse (or pen reporting as mouse) input.
    Mouse(MouseInput),
    /// Touch input.
    Touch(TouchInput),
}

impl PointerInput {
    /// Mouse input at the given display offsets.
    #[must_use]
    pub fn mouse(offset_x: f32, offset_y: f32) -> Self {
        Self::Mouse(MouseInput { offset_x, offset_y })
    }

    /// Single-finger touch input at the given client coordinates.
    #[must_use]
    pub fn touch(client_x: f32, client_y: f32) -> Self {
        Self::Touch(TouchInput {
            touches: vec![TouchPoint {
                id: 0,
                client_x,
                client_y,
            }],
        })
    }

    /// Touch input with no active touches, as delivered on touch-end.
    #[must_use]
    pub fn touch_released() -> Self {
        Self::Touch(TouchInput::default())
    }

    /// Whether this input came from a touch screen.
    #[must_use]
    pub fn is_touch(&self) -> bool {
        matches!(self, Self::Touch(_))
    }

    /// Position of this input in intrinsic canvas space.
    #[must_use]
    pub fn position(&self, geometry: &CanvasGeometry) -> Option<Point> {
        let (sx, sy) = geometry.scale();
        match self {
            Self::Mouse(mouse) => Some(Point::new(mouse.offset_x * sx, mouse.offset_y * sy)),
            Self::Touch(touch) => touch.primary_touch().map(|t| {
                Point::new(
                    (t.client_x - geometry.rendered.left) * sx,
                    (t.client_y - geometry.rendered.top) * sy,
                )
            }),
        }
    }
}

/// Phase of a pointer interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerPhase {
    /// Button pressed or finger down.
    Down,
    /// Pointer moved.
    Move,
    /// Button released or finger lifted.
    Up,
    /// Pointer left the canvas.
    Leave,
}

/// A pointer event delivered to the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    /// Phase of this event.
    pub phase: PointerPhase,
    /// The resolved input.
    pub input: PointerInput,
}

impl PointerEvent {
    /// Create a new pointer event.
    #[must_use]
    pub fn new(phase: PointerPhase, input: PointerInput) -> Self {
        Self { phase, input }
    }

    /// Whether this event ends the current stroke.
    #[must_use]
    pub fn ends_stroke(&self) -> bool {
        matches!(self.phase, PointerPhase::Up | PointerPhase::Leave)
    }
}
