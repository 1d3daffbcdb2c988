//! Global hotkey listener for the paste-URL shortcut.
//!
//! Registers CTRL+SHIFT+U (CMD+SHIFT+U on macOS) and feeds its press and
//! release events through the [`Interceptor`]. Plain paste (CTRL+V) is never
//! registered, so the OS keeps handling it and pastes the clipboard image.

use crate::{AppCommand, AppError, AppResult};

use std::{
    panic::Location,
    time::{Duration, Instant},
};

use error_location::ErrorLocation;
use global_hotkey::{
    GlobalHotKeyEvent, GlobalHotKeyManager, HotKeyState,
    hotkey::{Code, HotKey, Modifiers},
};
use smart_paste_core::{InterceptAction, Interceptor, KeyEvent, SharedSession, TriggerOutcome};
use tokio::sync::{mpsc, watch};
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

const PASTE_URL_HOTKEY_LABEL: &str = if cfg!(target_os = "macos") {
    "CMD+SHIFT+U"
} else {
    "CTRL+SHIFT+U"
};

fn paste_url_hotkey() -> HotKey {
    #[cfg(target_os = "macos")]
    let modifiers = Modifiers::SUPER | Modifiers::SHIFT;
    #[cfg(not(target_os = "macos"))]
    let modifiers = Modifiers::CONTROL | Modifiers::SHIFT;

    HotKey::new(Some(modifiers), Code::KeyU)
}

/// Map a global-hotkey event onto the interceptor's input.
pub(crate) fn key_event(id: u32, state: HotKeyState) -> KeyEvent {
    match state {
        HotKeyState::Pressed => KeyEvent::pressed(id),
        HotKeyState::Released => KeyEvent::released(id),
    }
}

/// Global hotkey handler for the paste-URL shortcut.
pub struct HotkeyHandler {
    interceptor: Interceptor,
    session: SharedSession,
    debounce: Duration,
    command_tx: mpsc::Sender<AppCommand>,
}

impl HotkeyHandler {
    /// Register the paste-URL shortcut as a global hotkey.
    ///
    /// Must be called on a thread with a message pump (e.g. the main thread
    /// running a `tao` event loop) so that `WM_HOTKEY` messages are
    /// dispatched on Windows. The returned [`GlobalHotKeyManager`] must be
    /// kept alive on that thread for the hotkey to remain registered.
    #[track_caller]
    #[instrument]
    pub fn register_hotkey() -> AppResult<(GlobalHotKeyManager, u32)> {
        let manager =
            GlobalHotKeyManager::new().map_err(|e| AppError::HotkeyRegistrationFailed {
                reason: format!("Failed to create manager: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        let hotkey = paste_url_hotkey();

        manager
            .register(hotkey)
            .map_err(|e| AppError::HotkeyRegistrationFailed {
                reason: format!("Failed to register {}: {}", PASTE_URL_HOTKEY_LABEL, e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        info!(hotkey = PASTE_URL_HOTKEY_LABEL, "Global hotkey registered");

        Ok((manager, hotkey.id()))
    }

    /// Create a handler for a previously registered hotkey.
    ///
    /// The `hotkey_id` should come from [`Self::register_hotkey`]. This
    /// struct is `Send` and can live on any thread; it only listens on the
    /// global [`GlobalHotKeyEvent`] channel.
    pub fn new(
        hotkey_id: u32,
        session: SharedSession,
        debounce: Duration,
        command_tx: mpsc::Sender<AppCommand>,
    ) -> Self {
        Self {
            interceptor: Interceptor::new(hotkey_id),
            session,
            debounce,
            command_tx,
        }
    }

    /// Run the hotkey handler event loop.
    ///
    /// This method blocks until a shutdown signal is received.
    #[instrument(skip(self, shutdown_rx))]
    pub async fn run(mut self, mut shutdown_rx: watch::Receiver<bool>) -> AppResult<()> {
        let receiver = GlobalHotKeyEvent::receiver().clone();
        let (event_tx, mut event_rx) = mpsc::channel(32);

        // Single persistent blocking task that forwards hotkey events.
        // GlobalHotKeyEvent::receiver() returns a crossbeam_channel::Receiver
        // which has blocking recv() -- zero polling, instant response, one thread.
        //
        // Shutdown: when event_rx is dropped (loop breaks), the next
        // event_tx.blocking_send() fails, breaking the blocking loop.
        let handle = tokio::task::spawn_blocking(move || {
            while let Ok(event) = receiver.recv() {
                if event_tx.blocking_send(event).is_err() {
                    break;
                }
            }
        });

        loop {
            tokio::select! {
                _ = shutdown_rx.changed() => {
                    info!("Hotkey handler shutting down");
                    break;
                }
                Some(event) = event_rx.recv() => {
                    if let Err(e) = self.handle_event(key_event(event.id, event.state)).await {
                        warn!(error = ?e, "Failed to handle hotkey event");
                    }
                }
            }
        }

        drop(event_rx);

        // Best-effort join: the blocking task may be stuck in recv() if no
        // hotkey event arrives after shutdown. The task is cleaned up by the
        // runtime on process exit regardless.
        match tokio::time::timeout(Duration::from_secs(1), handle).await {
            Ok(Ok(())) => debug!("Hotkey event forwarder stopped cleanly"),
            Ok(Err(e)) => warn!(error = ?e, "Hotkey event forwarder task panicked"),
            Err(_) => debug!(
                "Hotkey event forwarder did not stop within timeout, \
                   will be cleaned up on exit"
            ),
        }

        Ok(())
    }

    /// Reduce one key event and act on it.
    #[instrument(skip(self))]
    pub(crate) async fn handle_event(&mut self, event: KeyEvent) -> AppResult<()> {
        match self.interceptor.on_event(event) {
            InterceptAction::EmitUrl => self.trigger().await,
            InterceptAction::PassThrough | InterceptAction::Consumed => Ok(()),
        }
    }

    async fn trigger(&self) -> AppResult<()> {
        match self.session.trigger(Instant::now(), self.debounce).await {
            TriggerOutcome::Emit(url) => {
                let trigger_id = Uuid::new_v4();

                self.command_tx
                    .send(AppCommand::EmitUrl {
                        trigger_id,
                        url: url.clone(),
                    })
                    .await
                    .map_err(|e| AppError::ChannelSendFailed {
                        message: format!("Failed to send EmitUrl: {}", e),
                        location: ErrorLocation::from(Location::caller()),
                    })?;

                info!(trigger_id = %trigger_id, url = %url, "Paste-URL shortcut triggered");
            }
            TriggerOutcome::NoUrl => {
                info!("Paste-URL shortcut pressed, but no image URL is available yet");
            }
            TriggerOutcome::Debounced { since_last } => {
                debug!(
                    since_last_ms = since_last.as_millis(),
                    "Paste-URL shortcut debounced"
                );
            }
        }

        Ok(())
    }
}
