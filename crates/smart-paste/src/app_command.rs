use uuid::Uuid;

/// Commands sent from the hotkey handler to the main application.
#[derive(Debug, Clone)]
pub enum AppCommand {
    /// Deliver the cached URL to the focused application.
    EmitUrl {
        /// Trigger ID for log correlation.
        trigger_id: Uuid,
        /// URL to deliver.
        url: String,
    },
}
