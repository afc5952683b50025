//! Session and host errors.

use std::path::PathBuf;

use codraw_client::GenerationError;
use codraw_core::CanvasError;
use codraw_renderer::RenderError;
use thiserror::Error;

/// Result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;

/// Errors surfaced by the session controller and the host.
///
/// Failures of the generation round trip itself never appear here; they move
/// the session into its error state instead.
#[derive(Debug, Error)]
pub enum SessionError {
    /// A state transition or input was rejected.
    #[error(transparent)]
    Canvas(#[from] CanvasError),

    /// Surface allocation, image decoding or export failed.
    #[error(transparent)]
    Render(#[from] RenderError),

    /// The generation client could not be constructed.
    #[error(transparent)]
    Client(#[from] GenerationError),

    /// A drawing script could not be parsed.
    #[error("invalid drawing script: {0}")]
    Script(#[from] serde_json::Error),

    /// Reading or writing a file failed.
    #[error("{}: {source}", path.display())]
    Io {
        /// The file involved.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl SessionError {
    /// Wrap an I/O error with the path it occurred on.
    #[must_use]
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
