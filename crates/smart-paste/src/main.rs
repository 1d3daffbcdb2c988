//! Smart-Paste: clipboard image hosting with a paste-URL hotkey.

mod app;
mod app_command;
mod cli;
mod clipboard_adapter;
mod config;
mod error;
mod hotkey_handler;
mod key_typer;
mod main_command;
mod output_handler;
#[cfg(test)]
mod tests;

pub(crate) use {
    app::App,
    app_command::AppCommand,
    cli::Cli,
    clipboard_adapter::ClipboardAdapter,
    error::{AppError, Result as AppResult},
    hotkey_handler::HotkeyHandler,
    key_typer::KeyTyper,
    main_command::MainCommand,
    output_handler::OutputHandler,
};

use crate::config::Config;

use clap::Parser;
use global_hotkey::GlobalHotKeyManager;
use smart_paste_core::{SharedSession, SyncClient, Synchronizer};
use tao::{
    event::{Event, StartCause},
    event_loop::{ControlFlow, EventLoopBuilder},
};
use tokio::{
    runtime::Runtime,
    sync::{mpsc, watch},
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "smart_paste=info,smart_paste_core=info";

/// Application entry point.
fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    let cli = Cli::parse();

    let config = match Config::load(cli.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to load config: {:?}", e);
            std::process::exit(1);
        }
    };

    let runtime = match Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            error!("Failed to create tokio runtime: {:?}", e);
            std::process::exit(1);
        }
    };

    let sync_client = match connect(&config, &runtime) {
        Ok((client, body)) if cli.check => {
            println!("{} is healthy: {}", client.base_url(), body.trim());
            return;
        }
        Ok((client, body)) => {
            info!(server_url = %client.base_url(), body = %body.trim(), "Server reachable");
            client
        }
        Err(e) => {
            error!(
                server_url = %config.server_url,
                error = %e,
                "Cannot reach server. Start it, then run smart-paste again"
            );
            std::process::exit(1);
        }
    };

    info!(
        supported_formats = ?config.supported_formats,
        max_file_size = config.max_file_size,
        output_mode = ?config.behaviour.output_mode,
        "Configuration active"
    );

    let event_loop = EventLoopBuilder::<MainCommand>::with_user_event().build();
    let main_proxy = event_loop.create_proxy();

    // Moved into the runtime thread on Init; the closure is FnMut.
    let mut runtime = Some(runtime);
    let mut sync_client = Some(sync_client);

    // Persists across event loop iterations — dropping it unregisters the hotkey.
    let mut hotkey_manager: Option<GlobalHotKeyManager> = None;

    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Wait;

        match event {
            Event::UserEvent(MainCommand::Shutdown) => {
                *control_flow = ControlFlow::ExitWithCode(0);
                return;
            }
            Event::NewEvents(StartCause::Init) => {
                let (Some(rt), Some(sync_client)) = (runtime.take(), sync_client.take()) else {
                    return;
                };

                let clipboard = match ClipboardAdapter::new(config.max_file_size) {
                    Ok(adapter) => adapter,
                    Err(e) => {
                        error!("Failed to create ClipboardAdapter: {:?}", e);
                        std::process::exit(1);
                    }
                };

                let output_handler = match OutputHandler::new(config.behaviour.output_mode) {
                    Ok(oh) => oh,
                    Err(e) => {
                        error!("Failed to create OutputHandler: {:?}", e);
                        std::process::exit(1);
                    }
                };

                #[cfg(target_os = "macos")]
                unsafe {
                    use core_foundation::runloop::{CFRunLoopGetMain, CFRunLoopWakeUp};
                    CFRunLoopWakeUp(CFRunLoopGetMain());
                }

                // Register hotkey on the main thread — tao's event loop pumps
                // the Windows messages needed for WM_HOTKEY delivery.
                let (manager, hotkey_id) = match HotkeyHandler::register_hotkey() {
                    Ok(pair) => pair,
                    Err(e) => {
                        error!("Failed to register hotkey: {:?}", e);
                        std::process::exit(1);
                    }
                };
                hotkey_manager = Some(manager);

                let session = SharedSession::new();
                let (command_tx, command_rx) = mpsc::channel(32);
                let (shutdown_tx, shutdown_rx) = watch::channel(false);
                let delivery_shutdown_rx = shutdown_rx.clone();
                let main_proxy = main_proxy.clone();
                let check_interval = config.check_interval();
                let debounce = config.debounce();

                // Poll loop, URL delivery and hotkey handler share the runtime thread;
                // hotkey_manager stays on the main thread.
                std::thread::spawn(move || {
                    let hotkey_handler =
                        HotkeyHandler::new(hotkey_id, session.clone(), debounce, command_tx);

                    let app = App {
                        synchronizer: Synchronizer::new(sync_client, session),
                        clipboard,
                        check_interval,
                        main_proxy,
                        shutdown_tx,
                    };

                    let (hotkey_result, delivery_result, app_result) = rt.block_on(async {
                        tokio::join!(
                            hotkey_handler.run(shutdown_rx),
                            output_handler.run(command_rx, delivery_shutdown_rx),
                            app.run()
                        )
                    });

                    if let Err(e) = hotkey_result {
                        error!(error = ?e, "Hotkey handler error");
                    }

                    if let Err(e) = delivery_result {
                        error!(error = ?e, "URL delivery error");
                    }

                    if let Err(e) = app_result {
                        error!(error = ?e, "App error");
                        std::process::exit(1);
                    }
                });
            }
            _ => {}
        }

        // Keep hotkey_manager alive in the closure for the app's lifetime.
        let _ = &hotkey_manager;
    });
}

/// Build the sync client and probe the server's health endpoint.
///
/// Returns the client together with the health response body.
fn connect(config: &Config, runtime: &Runtime) -> AppResult<(SyncClient, String)> {
    let client = SyncClient::new(config.sync_client_config())?;
    let body = runtime.block_on(client.health())?;

    Ok((client, body))
}
