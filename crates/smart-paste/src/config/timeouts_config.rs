use crate::config::{default_check_secs, default_upload_secs};

use serde::{Deserialize, Serialize};

/// Request timeouts for the hosting server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeoutsConfig {
    /// Timeout for health probes and existence checks, in seconds.
    #[serde(default = "default_check_secs")]
    pub check_secs: u64,

    /// Timeout for uploads, in seconds.
    #[serde(default = "default_upload_secs")]
    pub upload_secs: u64,
}

impl Default for TimeoutsConfig {
    fn default() -> Self {
        Self {
            check_secs: default_check_secs(),
            upload_secs: default_upload_secs(),
        }
    }
}
