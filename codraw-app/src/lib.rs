//! # Co-Drawing App
//!
//! Session controller and headless host for the co-drawing canvas.
//!
//! ## Architecture
//!
//! - `CliArgs` - Command-line arguments parsed with clap
//! - `AppConfig` - Generation endpoint, credentials and file locations
//! - [`Session`] - Owns the canvas, the pen and the session state; talks to
//!   an injected [`codraw_client::GenerationClient`]
//! - [`DrawingScript`] - Recorded pointer input replayed against a session

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod script;
pub mod session;

pub use error::{SessionError, SessionResult};
pub use script::{DrawingScript, ScriptStep};
pub use session::{Session, SubmitOutcome};

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use codraw_client::{ClientConfig, DEFAULT_ENDPOINT, DEFAULT_MODEL};

/// Command-line arguments for codraw.
#[derive(Debug, Clone, Parser)]
#[command(name = "codraw")]
#[command(about = "Sketch on a canvas and let a generative image model redraw it")]
#[command(version)]
pub struct CliArgs {
    /// Default API key for the generation service
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// API key used for this run instead of the default
    #[arg(long)]
    pub override_key: Option<String>,

    /// Generation API base URL
    #[arg(long, env = "GEMINI_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// Model identifier
    #[arg(long, env = "GEMINI_MODEL", default_value = DEFAULT_MODEL)]
    pub model: String,

    /// Request timeout in seconds
    #[arg(long, default_value = "120")]
    pub timeout_secs: u64,

    /// What the model should turn the sketch into
    #[arg(long)]
    pub prompt: String,

    /// JSON drawing script replayed before submitting
    #[arg(long)]
    pub script: Option<PathBuf>,

    /// Image painted as the starting background
    #[arg(long)]
    pub background: Option<PathBuf>,

    /// Where the final canvas is written as PNG
    #[arg(long, default_value = "codraw.png")]
    pub output: PathBuf,

    /// Where the exported sketch is written as PNG
    #[arg(long)]
    pub sketch_output: Option<PathBuf>,

    /// Replay and export only; skip the network call
    #[arg(long)]
    pub dry_run: bool,

    /// Emit logs as JSON
    #[arg(long)]
    pub log_json: bool,
}

/// Configuration for a codraw run.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Generation client settings.
    pub client: ClientConfig,
    /// Per-run credential override.
    pub override_key: Option<String>,
    /// Prompt submitted after the script is replayed.
    pub prompt: String,
    /// Drawing script location.
    pub script: Option<PathBuf>,
    /// Starting background image location.
    pub background: Option<PathBuf>,
    /// Final canvas location.
    pub output: PathBuf,
    /// Exported sketch location.
    pub sketch_output: Option<PathBuf>,
    /// Skip the network call.
    pub dry_run: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl AppConfig {
    /// Create a configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self {
            client: ClientConfig::default(),
            override_key: None,
            prompt: String::new(),
            script: None,
            background: None,
            output: PathBuf::from("codraw.png"),
            sketch_output: None,
            dry_run: false,
        }
    }
}

impl From<CliArgs> for AppConfig {
    fn from(args: CliArgs) -> Self {
        Self {
            client: ClientConfig {
                endpoint: args.endpoint,
                model: args.model,
                api_key: args.api_key,
                timeout: Duration::from_secs(args.timeout_secs),
            },
            override_key: args.override_key,
            prompt: args.prompt,
            script: args.script,
            background: args.background,
            output: args.output,
            sketch_output: args.sketch_output,
            dry_run: args.dry_run,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_defaults() {
        let args = CliArgs::try_parse_from(["codraw", "--prompt", "a cat"]).unwrap();
        let config = AppConfig::from(args);

        assert_eq!(config.prompt, "a cat");
        assert_eq!(config.client.model, DEFAULT_MODEL);
        assert_eq!(config.client.timeout, Duration::from_secs(120));
        assert_eq!(config.output, PathBuf::from("codraw.png"));
        assert!(!config.dry_run);
    }

    #[test]
    fn cli_overrides() {
        let args = CliArgs::try_parse_from([
            "codraw",
            "--prompt",
            "a dog",
            "--endpoint",
            "http://localhost:9000",
            "--model",
            "m",
            "--api-key",
            "default-key",
            "--override-key",
            "user-key",
            "--timeout-secs",
            "5",
            "--dry-run",
        ])
        .unwrap();
        let config = AppConfig::from(args);

        assert_eq!(config.client.endpoint, "http://localhost:9000");
        assert_eq!(config.client.model, "m");
        assert_eq!(config.client.api_key.as_deref(), Some("default-key"));
        assert_eq!(config.override_key.as_deref(), Some("user-key"));
        assert_eq!(config.client.timeout, Duration::from_secs(5));
        assert!(config.dry_run);
    }

    #[test]
    fn prompt_is_required() {
        assert!(CliArgs::try_parse_from(["codraw"]).is_err());
    }
}
