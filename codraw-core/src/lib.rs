//! # Co-Drawing Core
//!
//! Platform-independent logic for the co-drawing canvas: mapping pointer
//! input into canvas pixels, pen colors, encoded image payloads, and the
//! session state machine that gates drawing and submission.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │                codraw-core                  │
//! ├─────────────────────────────────────────────┤
//! │  Input            │  Session State          │
//! │  - Mouse / touch  │  - Idle                 │
//! │  - Coordinate map │  - Submitting           │
//! │                   │  - ErrorShown           │
//! ├─────────────────────────────────────────────┤
//! │  Pen color  │  Image payload  │  Error text │
//! └─────────────────────────────────────────────┘
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod color;
pub mod error;
pub mod error_text;
pub mod input;
pub mod payload;
pub mod state;

pub use color::PenColor;
pub use error::{CanvasError, CanvasResult};
pub use error_text::{extract_error_message, FALLBACK_ERROR_MESSAGE};
pub use input::{
    CanvasGeometry, DisplayRect, MouseInput, Point, PointerEvent, PointerInput, PointerPhase,
    TouchInput, TouchPoint,
};
pub use payload::{ImagePayload, PNG_MIME};
pub use state::{FailureKind, SessionState, EMPTY_RESULT_MESSAGE};

/// Intrinsic canvas width in pixels.
pub const CANVAS_WIDTH: u32 = 960;

/// Intrinsic canvas height in pixels.
pub const CANVAS_HEIGHT: u32 = 540;

/// Stroke width in pixels for freehand drawing.
pub const STROKE_WIDTH: f32 = 5.0;

/// Codraw core version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
