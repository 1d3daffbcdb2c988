mod behaviour_config;
#[allow(clippy::module_inception)]
mod config;
mod output_mode;
mod timeouts_config;

pub(crate) use {
    behaviour_config::BehaviourConfig, config::Config, output_mode::OutputMode,
    timeouts_config::TimeoutsConfig,
};

use smart_paste_core::{DEFAULT_CHECK_TIMEOUT, DEFAULT_SERVER_URL, DEFAULT_UPLOAD_TIMEOUT};

pub(crate) const DEFAULT_CHECK_INTERVAL_SECS: f64 = 1.0;
pub(crate) const DEFAULT_MAX_FILE_SIZE: usize = 10 * 1024 * 1024;
pub(crate) const DEFAULT_DEBOUNCE_MS: u64 = 500;
pub(crate) const CONFIG_ENV_VAR: &str = "SMART_PASTE_CONFIG";
pub(crate) const LOCAL_CONFIG_FILE: &str = "smart-paste.toml";

pub(crate) fn default_server_url() -> String {
    DEFAULT_SERVER_URL.to_string()
}

pub(crate) fn default_check_interval() -> f64 {
    DEFAULT_CHECK_INTERVAL_SECS
}

pub(crate) fn default_supported_formats() -> Vec<String> {
    [".png", ".jpg", ".jpeg"]
        .iter()
        .map(|ext| ext.to_string())
        .collect()
}

pub(crate) fn default_max_file_size() -> usize {
    DEFAULT_MAX_FILE_SIZE
}

pub(crate) fn default_debounce_ms() -> u64 {
    DEFAULT_DEBOUNCE_MS
}

pub(crate) fn default_check_secs() -> u64 {
    DEFAULT_CHECK_TIMEOUT.as_secs()
}

pub(crate) fn default_upload_secs() -> u64 {
    DEFAULT_UPLOAD_TIMEOUT.as_secs()
}
