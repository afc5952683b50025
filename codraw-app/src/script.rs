//! Recorded drawing input.
//!
//! A script is a JSON document listing the input a user would produce in
//! front of the canvas:
//!
//! ```json
//! {
//!   "steps": [
//!     {"action": "display", "left": 0, "top": 0, "width": 480, "height": 270},
//!     {"action": "color", "color": "#ff0000"},
//!     {"action": "pointer", "phase": "down", "input": {"type": "mouse", "data": {"offset_x": 10, "offset_y": 10}}},
//!     {"action": "pointer", "phase": "move", "input": {"type": "mouse", "data": {"offset_x": 90, "offset_y": 40}}},
//!     {"action": "pointer", "phase": "up", "input": {"type": "mouse", "data": {"offset_x": 90, "offset_y": 40}}},
//!     {"action": "clear"}
//!   ]
//! }
//! ```

use std::path::Path;

use codraw_core::{DisplayRect, PenColor, PointerEvent};
use serde::{Deserialize, Serialize};

use crate::error::{SessionError, SessionResult};
use crate::session::Session;

/// One recorded input step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ScriptStep {
    /// A pointer event on the canvas.
    Pointer(PointerEvent),
    /// Pick a pen color.
    Color {
        /// The new color.
        color: PenColor,
    },
    /// The canvas was laid out at a new display size.
    Display(DisplayRect),
    /// Press the clear button.
    Clear,
}

/// An ordered list of input steps.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DrawingScript {
    /// Steps in the order they happened.
    pub steps: Vec<ScriptStep>,
}

impl DrawingScript {
    /// Parse a script from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Script`] if the JSON is malformed.
    pub fn from_json(json: &str) -> SessionResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a script file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> SessionResult<Self> {
        let json = std::fs::read_to_string(path).map_err(|e| SessionError::io(path, e))?;
        Self::from_json(&json)
    }

    /// Replay every step against `session`. Returns how many pointer events
    /// painted pixels.
    ///
    /// # Errors
    ///
    /// Returns an error if a clear is rejected by the session.
    pub fn replay(&self, session: &mut Session) -> SessionResult<usize> {
        let mut painted = 0;
        for step in &self.steps {
            match step {
                ScriptStep::Pointer(event) => {
                    if session.handle_pointer(event).painted {
                        painted += 1;
                    }
                }
                ScriptStep::Color { color } => session.set_pen_color(*color),
                ScriptStep::Display(rect) => session.set_display_rect(*rect),
                ScriptStep::Clear => session.clear()?,
            }
        }
        tracing::debug!(
            "Replayed {} steps, {} painted segments",
            self.steps.len(),
            painted
        );
        Ok(painted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use codraw_core::{PointerInput, PointerPhase};

    #[test]
    fn parses_every_step_kind() {
        let script = DrawingScript::from_json(
            r##"{"steps": [
                {"action": "display", "left": 10, "top": 20, "width": 480, "height": 270},
                {"action": "color", "color": "#f00"},
                {"action": "pointer", "phase": "down", "input": {"type": "touch", "data": {"touches": [{"client_x": 15, "client_y": 25}]}}},
                {"action": "pointer", "phase": "up", "input": {"type": "touch", "data": {"touches": []}}},
                {"action": "clear"}
            ]}"##,
        )
        .unwrap();

        assert_eq!(
            script.steps,
            vec![
                ScriptStep::Display(DisplayRect::new(10.0, 20.0, 480.0, 270.0)),
                ScriptStep::Color {
                    color: PenColor::rgb(255, 0, 0)
                },
                ScriptStep::Pointer(PointerEvent::new(
                    PointerPhase::Down,
                    PointerInput::touch(15.0, 25.0)
                )),
                ScriptStep::Pointer(PointerEvent::new(
                    PointerPhase::Up,
                    PointerInput::touch_released()
                )),
                ScriptStep::Clear,
            ]
        );
    }

    #[test]
    fn rejects_bad_color() {
        let err = DrawingScript::from_json(r#"{"steps": [{"action": "color", "color": "red"}]}"#)
            .unwrap_err();
        assert!(matches!(err, SessionError::Script(_)));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = DrawingScript::load(Path::new("/nonexistent/script.json")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/script.json"));
    }
}
