/// Commands sent from the async runtime to the main UI thread.
///
/// The main thread owns the event loop that pumps hotkey messages, so
/// process lifecycle events flow through this enum.
#[derive(Debug, Clone, Copy)]
pub enum MainCommand {
    /// Shut down the application. The main thread will exit the event loop.
    Shutdown,
}
