//! The drawing session.
//!
//! A [`Session`] is the single owner of the canvas pixels, the pen and the
//! [`SessionState`]. Pointer input paints only while the session is idle; a
//! submission exports the canvas, sends it with the prompt to the injected
//! generation client and, on success, paints the returned image as the new
//! background.

use std::sync::Arc;

use codraw_client::{GenerationClient, GenerationRequest};
use codraw_core::{
    CanvasError, CanvasGeometry, DisplayRect, FailureKind, ImagePayload, PenColor, PointerEvent,
    SessionState, CANVAS_HEIGHT, CANVAS_WIDTH, EMPTY_RESULT_MESSAGE,
};
use codraw_renderer::{
    load_image_from_bytes, load_image_from_payload, CanvasSurface, InputResponse, SketchExporter,
    StrokeRenderer,
};

use crate::error::SessionResult;

/// How a submission ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The generated image is now the background.
    Painted {
        /// Text the model returned alongside the image.
        message: Option<String>,
    },
    /// The error dialog is open.
    Failed(FailureKind),
}

/// A co-drawing session bound to one generation client.
pub struct Session {
    client: Arc<dyn GenerationClient>,
    state: SessionState,
    surface: CanvasSurface,
    pen: StrokeRenderer,
    geometry: CanvasGeometry,
    exporter: SketchExporter,
    prompt: String,
    override_credential: Option<String>,
}

impl Session {
    /// Create an idle session with a blank 960×540 canvas.
    ///
    /// # Errors
    ///
    /// Returns an error if the canvas cannot be allocated.
    pub fn new(client: Arc<dyn GenerationClient>) -> SessionResult<Self> {
        Ok(Self {
            client,
            state: SessionState::default(),
            surface: CanvasSurface::with_default_size()?,
            pen: StrokeRenderer::new(),
            geometry: CanvasGeometry::unscaled(CANVAS_WIDTH, CANVAS_HEIGHT),
            exporter: SketchExporter::with_defaults(),
            prompt: String::new(),
            override_credential: None,
        })
    }

    /// Current session state.
    #[must_use]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Whether a submission is in flight.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.state.is_loading()
    }

    /// Text of the open error dialog, if any.
    #[must_use]
    pub fn error_text(&self) -> Option<String> {
        self.state.error_text()
    }

    /// The canvas.
    #[must_use]
    pub fn surface(&self) -> &CanvasSurface {
        &self.surface
    }

    /// The prompt that the next submission will send.
    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// Replace the prompt.
    pub fn set_prompt(&mut self, prompt: impl Into<String>) {
        self.prompt = prompt.into();
    }

    /// Set or remove the per-session credential override.
    pub fn set_override_credential(&mut self, credential: Option<String>) {
        self.override_credential = credential;
    }

    /// Current pen color.
    #[must_use]
    pub fn pen_color(&self) -> PenColor {
        self.pen.color()
    }

    /// Change the pen color. Allowed in every state.
    pub fn set_pen_color(&mut self, color: PenColor) {
        tracing::debug!("Pen color set to {color}");
        self.pen.set_color(color);
    }

    /// Record where the canvas is currently displayed.
    pub fn set_display_rect(&mut self, rendered: DisplayRect) {
        self.geometry.set_rendered(rendered);
    }

    /// Route a pointer event to the pen.
    ///
    /// Ignored unless the session is idle.
    pub fn handle_pointer(&mut self, event: &PointerEvent) -> InputResponse {
        if !self.state.accepts_drawing() {
            tracing::trace!("Ignoring {:?} while {}", event.phase, self.state.name());
            return InputResponse::default();
        }
        self.pen.handle(&mut self.surface, &self.geometry, event)
    }

    /// Blank the canvas and discard the background image.
    ///
    /// # Errors
    ///
    /// Returns an error unless the session is idle.
    pub fn clear(&mut self) -> SessionResult<()> {
        self.state.ensure_can_clear()?;
        self.pen.end();
        self.surface.clear();
        tracing::debug!("Canvas cleared");
        Ok(())
    }

    /// Paint encoded image bytes as the background.
    ///
    /// # Errors
    ///
    /// Returns an error unless the session is idle, or if the bytes are not
    /// a decodable image.
    pub fn set_background(&mut self, bytes: &[u8]) -> SessionResult<()> {
        if !self.state.is_idle() {
            let err = CanvasError::invalid_transition("replace the background", &self.state);
            return Err(err.into());
        }
        let pixmap = load_image_from_bytes(bytes)?.to_pixmap()?;
        self.surface.paint_background(pixmap);
        Ok(())
    }

    /// Export the canvas as the payload a submission would send.
    ///
    /// # Errors
    ///
    /// Returns an error if export fails.
    pub fn export_sketch(&self) -> SessionResult<ImagePayload> {
        Ok(self.exporter.export_payload(&self.surface)?)
    }

    /// Export the canvas as PNG bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if export fails.
    pub fn export_png(&self) -> SessionResult<Vec<u8>> {
        Ok(self.exporter.export_png(&self.surface)?)
    }

    /// Submit the canvas and prompt for generation.
    ///
    /// Returns `Err` only when the submission is rejected before reaching the
    /// client (blank prompt, not idle). Every failure after that point opens
    /// the error dialog and is reported as [`SubmitOutcome::Failed`].
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::EmptyPrompt`] or
    /// [`CanvasError::InvalidTransition`] wrapped in a session error.
    pub async fn submit(&mut self) -> SessionResult<SubmitOutcome> {
        let request_id = self.state.begin_submit(&self.prompt)?;
        self.pen.end();

        let sketch = match self.exporter.export_payload(&self.surface) {
            Ok(sketch) => sketch,
            Err(e) => return self.fail(FailureKind::Request, e.to_string()),
        };

        let request = GenerationRequest::new(self.prompt.clone())
            .with_request_id(request_id)
            .with_image(sketch)
            .with_override_credential(self.override_credential.clone());

        tracing::info!(%request_id, "Submitting sketch: {:?}", self.prompt);

        let output = match self.client.generate(&request).await {
            Ok(output) => output,
            Err(e) => return self.fail(FailureKind::Request, e.to_string()),
        };

        let Some(image) = output.image else {
            return self.fail(FailureKind::EmptyResult, EMPTY_RESULT_MESSAGE);
        };

        if let Err(e) = self.paint_generated(&image) {
            return self.fail(FailureKind::Request, e.to_string());
        }
        self.state.complete()?;

        tracing::info!(%request_id, "Generated image painted as background");
        Ok(SubmitOutcome::Painted {
            message: output.message,
        })
    }

    /// Close the error dialog.
    ///
    /// # Errors
    ///
    /// Returns an error if no error is shown.
    pub fn dismiss_error(&mut self) -> SessionResult<()> {
        self.state.dismiss()?;
        Ok(())
    }

    fn paint_generated(&mut self, image: &ImagePayload) -> SessionResult<()> {
        let pixmap = load_image_from_payload(image)?.to_pixmap()?;
        self.surface.paint_background(pixmap);
        Ok(())
    }

    fn fail(
        &mut self,
        kind: FailureKind,
        raw_error: impl Into<String>,
    ) -> SessionResult<SubmitOutcome> {
        let raw_error = raw_error.into();
        tracing::warn!(
            request_id = ?self.state.request_id(),
            ?kind,
            "Generation failed: {raw_error}"
        );
        self.state.fail(kind, raw_error)?;
        Ok(SubmitOutcome::Failed(kind))
    }
}
