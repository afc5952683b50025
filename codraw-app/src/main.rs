//! # Codraw
//!
//! Headless co-drawing host: replays a drawing script, submits the sketch and
//! writes the resulting canvas.

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use codraw_app::{AppConfig, CliArgs, DrawingScript, Session, SessionError, SubmitOutcome};
use codraw_client::GeminiClient;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();
    init_tracing(args.log_json);

    let config = AppConfig::from(args);
    tracing::info!(
        "Starting codraw {} against {}",
        codraw_core::VERSION,
        config.client.endpoint
    );

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(run(config))
}

fn init_tracing(json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "codraw=info,codraw_app=info,codraw_client=info".into());
    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

async fn run(config: AppConfig) -> anyhow::Result<()> {
    let client = GeminiClient::new(config.client.clone())?;
    tracing::info!("Using model {}", client.model());
    let mut session = Session::new(Arc::new(client))?;
    session.set_prompt(config.prompt.clone());
    session.set_override_credential(config.override_key.clone());

    if let Some(path) = &config.background {
        let bytes = std::fs::read(path).map_err(|e| SessionError::io(path, e))?;
        session
            .set_background(&bytes)
            .with_context(|| format!("loading background {}", path.display()))?;
        tracing::info!("Background loaded from {}", path.display());
    }

    if let Some(path) = &config.script {
        let script = DrawingScript::load(path)?;
        let painted = script.replay(&mut session)?;
        tracing::info!(
            "Replayed {} ({} steps, {} painted)",
            path.display(),
            script.steps.len(),
            painted
        );
    }

    if let Some(path) = &config.sketch_output {
        write_png(path, &session.export_png()?)?;
        tracing::info!("Sketch written to {}", path.display());
    }

    if config.dry_run {
        tracing::info!("Dry run; skipping generation");
        write_png(&config.output, &session.export_png()?)?;
        return Ok(());
    }

    match session.submit().await? {
        SubmitOutcome::Painted { message } => {
            if let Some(message) = message {
                tracing::info!("Model says: {message}");
            }
            write_png(&config.output, &session.export_png()?)?;
            tracing::info!("Canvas written to {}", config.output.display());
            Ok(())
        }
        SubmitOutcome::Failed(kind) => {
            let text = session.error_text().unwrap_or_default();
            tracing::warn!(?kind, "Generation failed: {text}");
            anyhow::bail!(text)
        }
    }
}

fn write_png(path: &Path, png: &[u8]) -> Result<(), SessionError> {
    std::fs::write(path, png).map_err(|e| SessionError::io(path, e))
}
