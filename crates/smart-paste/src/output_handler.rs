//! URL delivery for the paste-URL shortcut.
//!
//! Two policies, chosen by `behaviour.output_mode`: type the URL with
//! synthesized keystrokes (the clipboard keeps its image), or replace the
//! clipboard content with the URL text.

use crate::{AppCommand, AppError, AppResult, KeyTyper, config::OutputMode};

use std::panic::Location;

use arboard::Clipboard;
use error_location::ErrorLocation;
use tokio::sync::{mpsc, watch};
use tracing::{debug, error, info, instrument};

/// Output handler for typed and clipboard URL delivery.
pub struct OutputHandler {
    pub(crate) clipboard: Clipboard,
    mode: OutputMode,
}

impl OutputHandler {
    /// Create a new output handler using `mode`.
    #[track_caller]
    #[instrument]
    pub fn new(mode: OutputMode) -> AppResult<Self> {
        let clipboard = Clipboard::new().map_err(|e| AppError::ClipboardError {
            reason: format!("Failed to initialize clipboard: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        info!(mode = ?mode, "OutputHandler initialized");

        Ok(Self { clipboard, mode })
    }

    /// Active delivery policy.
    pub fn mode(&self) -> OutputMode {
        self.mode
    }

    /// Deliver URLs from `command_rx` until shutdown.
    ///
    /// Runs beside the poll loop so a trigger is delivered while an upload
    /// is still in flight.
    #[instrument(skip_all)]
    pub(crate) async fn run(
        mut self,
        mut command_rx: mpsc::Receiver<AppCommand>,
        mut shutdown_rx: watch::Receiver<bool>,
    ) -> AppResult<()> {
        info!(mode = ?self.mode(), "URL delivery started");

        loop {
            tokio::select! {
                _ = shutdown_rx.changed() => {
                    info!("URL delivery shutting down");
                    break;
                }
                cmd = command_rx.recv() => {
                    let Some(AppCommand::EmitUrl { trigger_id, url }) = cmd else {
                        debug!("Command channel closed");
                        break;
                    };
                    if let Err(e) = self.emit_url(&url).await {
                        error!(trigger_id = %trigger_id, error = ?e, "Failed to deliver URL");
                    }
                }
            }
        }

        Ok(())
    }

    /// Deliver `url` according to the configured policy.
    #[instrument(skip(self, url))]
    pub async fn emit_url(&mut self, url: &str) -> AppResult<()> {
        match self.mode {
            OutputMode::Type => self.type_text(url).await?,
            OutputMode::Clipboard => self.write_text(url)?,
        }

        info!(url_len = url.len(), mode = ?self.mode, "URL delivered");

        Ok(())
    }

    /// Replace the clipboard content with `text`.
    #[track_caller]
    pub fn write_text(&mut self, text: &str) -> AppResult<()> {
        self.clipboard
            .set_text(text)
            .map_err(|e| AppError::ClipboardError {
                reason: format!("Failed to set clipboard: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        debug!(text_len = text.len(), "Text copied to clipboard");

        Ok(())
    }

    /// Type `text` into the focused window without touching the clipboard.
    #[instrument(skip(self, text))]
    pub async fn type_text(&self, text: &str) -> AppResult<()> {
        // Enigo is not Send, so a fresh instance is created inside
        // spawn_blocking; construction is cheap.
        let text = text.to_string();
        let typing_result = tokio::task::spawn_blocking(move || {
            let mut typer = KeyTyper::new()?;
            typer.type_text(&text)
        })
        .await
        .map_err(|e| AppError::TypingFailed {
            reason: format!("Typing task panicked: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        typing_result?;

        debug!("URL typed");

        Ok(())
    }
}
