use crate::{AppResult, ClipboardAdapter, MainCommand};

use std::time::Duration;

use smart_paste_core::{Resolution, SyncClient, Synchronizer, TickOutcome};
use tao::event_loop::EventLoopProxy;
use tokio::{sync::watch, time::MissedTickBehavior};
use tracing::{debug, error, info, instrument, warn};

/// Main application state.
///
/// Runs on the async runtime thread. Asks the main thread to exit via
/// `main_proxy` because the event loop pumping hotkey messages lives there.
/// URL delivery runs beside it in [`crate::OutputHandler::run`], so a slow
/// upload never delays the shortcut.
pub struct App {
    pub(crate) synchronizer: Synchronizer<SyncClient>,
    pub(crate) clipboard: ClipboardAdapter,
    pub(crate) check_interval: Duration,
    pub(crate) main_proxy: EventLoopProxy<MainCommand>,
    pub(crate) shutdown_tx: watch::Sender<bool>,
}

impl App {
    /// Run the poll loop until interrupted.
    ///
    /// An interrupt also cancels a tick that is waiting on the network.
    #[instrument(skip(self))]
    pub(crate) async fn run(mut self) -> AppResult<()> {
        info!(
            check_interval_ms = self.check_interval.as_millis(),
            "Monitoring clipboard"
        );

        let mut ticker = tokio::time::interval(self.check_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let ctrl_c = tokio::signal::ctrl_c();
        tokio::pin!(ctrl_c);

        loop {
            tokio::select! {
                biased;

                result = &mut ctrl_c => {
                    Self::interrupted(result);
                    break;
                }

                _ = ticker.tick() => {}
            }

            tokio::select! {
                biased;

                result = &mut ctrl_c => {
                    Self::interrupted(result);
                    break;
                }

                outcome = self.synchronizer.tick(&mut self.clipboard) => {
                    Self::report(&outcome);
                }
            }
        }

        // Stop the hotkey handler and URL delivery before leaving the runtime.
        if let Err(e) = self.shutdown_tx.send(true) {
            debug!(error = ?e, "Hotkey handler and URL delivery already stopped");
        }

        if let Err(e) = self.main_proxy.send_event(MainCommand::Shutdown) {
            warn!(error = ?e, "Main event loop already closed");
        }

        info!("Smart-Paste shut down successfully");

        Ok(())
    }

    fn interrupted(result: std::io::Result<()>) {
        if let Err(e) = result {
            error!(error = ?e, "Failed to listen for interrupt");
        }
        info!("Interrupt received, shutting down");
    }

    fn report(outcome: &TickOutcome) {
        match outcome {
            TickOutcome::NoImage | TickOutcome::Unchanged => {}
            TickOutcome::Resolved {
                fingerprint,
                url,
                resolution,
            } => {
                let how = match resolution {
                    Resolution::Existing => "already hosted",
                    Resolution::Uploaded => "uploaded",
                    Resolution::AlreadyOnServer => "already on server",
                };
                info!(
                    fingerprint = %fingerprint,
                    url = %url,
                    "Share link ready ({}); press the paste-URL shortcut to insert it",
                    how
                );
            }
            TickOutcome::Failed { fingerprint } => {
                debug!(fingerprint = %fingerprint, "Image not resolved this tick");
            }
        }
    }
}
