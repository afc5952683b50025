//! # Co-Drawing Renderer
//!
//! Raster surface for the co-drawing canvas, built on tiny-skia.
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │               CanvasSurface                 │
//! │   white fill → background image → strokes  │
//! ├──────────────┬──────────────┬───────────────┤
//! │ StrokeRender │ decode       │ SketchExporter│
//! │ (pen input)  │ (payload in) │ (payload out) │
//! └──────────────┴──────────────┴───────────────┘
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod decode;
pub mod error;
pub mod export;
pub mod stroke;
pub mod surface;

pub use decode::{load_image_from_bytes, load_image_from_payload, ImageFormat, TextureData};
pub use error::{RenderError, RenderResult};
pub use export::{ExportConfig, SketchExporter};
pub use stroke::{InputResponse, StrokeRenderer};
pub use surface::CanvasSurface;
pub use tiny_skia::Pixmap;
