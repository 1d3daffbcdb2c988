use crate::config::{OutputMode, default_debounce_ms};

use serde::{Deserialize, Serialize};

/// Application behavior configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BehaviourConfig {
    /// How the paste-URL shortcut delivers the URL.
    #[serde(default)]
    pub output_mode: OutputMode,

    /// Minimum gap between accepted shortcut triggers, in milliseconds.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

impl Default for BehaviourConfig {
    fn default() -> Self {
        Self {
            output_mode: OutputMode::default(),
            debounce_ms: default_debounce_ms(),
        }
    }
}
