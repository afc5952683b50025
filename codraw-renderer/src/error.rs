//! Renderer error types.

use codraw_core::CanvasError;
use thiserror::Error;

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Errors that can occur during rendering.
#[derive(Debug, Error)]
pub enum RenderError {
    /// A pixel buffer could not be allocated.
    #[error("Failed to allocate {width}x{height} surface")]
    Allocation {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
    },

    /// Resource loading failed.
    #[error("Failed to load resource: {0}")]
    Resource(String),

    /// Encoding the canvas failed.
    #[error("Export failed: {0}")]
    Export(String),

    /// A payload could not be decoded.
    #[error(transparent)]
    Canvas(#[from] CanvasError),
}
