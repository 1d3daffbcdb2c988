//! Configuration management for smart-paste.
//!
//! Handles locating, loading, validating and saving TOML configuration files
//! with cross-platform paths and atomic write operations.

use crate::{
    AppError, AppResult,
    config::{
        BehaviourConfig, CONFIG_ENV_VAR, DEFAULT_CHECK_INTERVAL_SECS, LOCAL_CONFIG_FILE,
        TimeoutsConfig, default_check_interval, default_max_file_size, default_server_url,
        default_supported_formats,
    },
};

use std::{
    fs,
    io::Write,
    panic::Location,
    path::{Path, PathBuf},
    time::Duration,
};

use directories::ProjectDirs;
use error_location::ErrorLocation;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use smart_paste_core::SyncClientConfig;
use tracing::{debug, info, instrument, warn};

/// Main configuration struct.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the image hosting server.
    #[serde(default = "default_server_url")]
    pub server_url: String,
    /// Seconds between clipboard polls.
    #[serde(default = "default_check_interval")]
    pub check_interval: f64,
    /// Image extensions the server accepts. Informational only; clipboard
    /// images are always sent as PNG.
    #[serde(default = "default_supported_formats")]
    pub supported_formats: Vec<String>,
    /// Largest encoded image, in bytes, that will be uploaded.
    #[serde(default = "default_max_file_size")]
    pub max_file_size: usize,
    /// Shortcut behaviour.
    #[serde(default)]
    pub behaviour: BehaviourConfig,
    /// Request timeouts.
    #[serde(default)]
    pub timeouts: TimeoutsConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_url: default_server_url(),
            check_interval: default_check_interval(),
            supported_formats: default_supported_formats(),
            max_file_size: default_max_file_size(),
            behaviour: BehaviourConfig::default(),
            timeouts: TimeoutsConfig::default(),
        }
    }
}

impl Config {
    /// Locate and load configuration, creating a default if none is found.
    ///
    /// Candidates, first existing wins: `explicit` (must exist), the
    /// `SMART_PASTE_CONFIG` environment variable, `./smart-paste.toml`, and
    /// the platform config directory.
    #[track_caller]
    #[instrument]
    pub fn load(explicit: Option<&Path>) -> AppResult<Self> {
        if let Some(path) = explicit {
            if !path.exists() {
                return Err(AppError::ConfigError {
                    reason: format!("Config file not found: {:?}", path),
                    location: ErrorLocation::from(Location::caller()),
                });
            }
            return Self::load_from(path);
        }

        let mut candidates = Vec::new();
        if let Some(from_env) = std::env::var_os(CONFIG_ENV_VAR) {
            candidates.push(PathBuf::from(from_env));
        }
        candidates.push(PathBuf::from(LOCAL_CONFIG_FILE));
        if let Some(proj_dirs) = Self::project_dirs() {
            candidates.push(proj_dirs.config_dir().join("config.toml"));
        }

        match Self::first_existing(&candidates) {
            Some(path) => Self::load_from(&path),
            None => {
                info!(candidates = ?candidates, "No config found, creating default");
                Self::create_default()
            }
        }
    }

    /// Load and validate a specific configuration file.
    #[track_caller]
    #[instrument]
    pub fn load_from(path: &Path) -> AppResult<Self> {
        let contents = fs::read_to_string(path).map_err(|e| AppError::ConfigError {
            reason: format!("Failed to read config {:?}: {}", path, e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        let config: Config = toml::from_str(&contents).map_err(|e| AppError::ConfigError {
            reason: format!("Failed to parse config {:?}: {}", path, e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        config.validate()?;

        info!(config_path = ?path, "Configuration loaded");

        Ok(config)
    }

    /// First candidate path that exists on disk.
    pub fn first_existing(candidates: &[PathBuf]) -> Option<PathBuf> {
        candidates.iter().find(|p| p.is_file()).cloned()
    }

    /// Reject values the poll loop and sync client cannot run with.
    #[track_caller]
    pub fn validate(&self) -> AppResult<()> {
        let url = Url::parse(&self.server_url).map_err(|e| AppError::ConfigError {
            reason: format!("Invalid server_url {:?}: {}", self.server_url, e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(AppError::ConfigError {
                reason: format!("server_url must be http or https, got {:?}", url.scheme()),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        if poll_interval(self.check_interval).is_none() {
            return Err(AppError::ConfigError {
                reason: format!(
                    "check_interval must be a positive number of seconds that rounds to at \
                     least one nanosecond, got {}",
                    self.check_interval
                ),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        if self.max_file_size == 0 {
            return Err(AppError::ConfigError {
                reason: "max_file_size must be greater than zero".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        if self.timeouts.check_secs == 0 || self.timeouts.upload_secs == 0 {
            return Err(AppError::ConfigError {
                reason: "timeouts must be at least one second".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(())
    }

    /// Save configuration to `path` using atomic write pattern.
    ///
    /// Writes to a temporary file first, then renames to prevent corruption
    /// if the process crashes during the write.
    #[track_caller]
    #[instrument(skip(self))]
    pub fn save_to(&self, path: &Path) -> AppResult<()> {
        let contents = toml::to_string_pretty(self).map_err(|e| AppError::ConfigError {
            reason: format!("Failed to serialize config: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        let temp_path = path.with_extension("toml.tmp");

        let mut temp_file = fs::File::create(&temp_path).map_err(|e| AppError::ConfigError {
            reason: format!("Failed to create temp config file: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        temp_file
            .write_all(contents.as_bytes())
            .map_err(|e| AppError::ConfigError {
                reason: format!("Failed to write temp config file: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        temp_file.sync_all().map_err(|e| AppError::ConfigError {
            reason: format!("Failed to sync temp config file: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        fs::rename(&temp_path, path).map_err(|e| AppError::ConfigError {
            reason: format!("Failed to rename temp config to final: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        info!(config_path = ?path, "Configuration saved (atomic write)");

        Ok(())
    }

    /// Poll interval as a duration. Never zero.
    ///
    /// Loaded configs are validated, so the default only applies to a
    /// `Config` built by hand with an unusable interval.
    pub fn check_interval(&self) -> Duration {
        poll_interval(self.check_interval)
            .unwrap_or_else(|| Duration::from_secs_f64(DEFAULT_CHECK_INTERVAL_SECS))
    }

    /// Debounce window for the paste-URL shortcut.
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.behaviour.debounce_ms)
    }

    /// Connection settings for the sync client.
    pub fn sync_client_config(&self) -> SyncClientConfig {
        SyncClientConfig {
            base_url: self.server_url.clone(),
            check_timeout: Duration::from_secs(self.timeouts.check_secs),
            upload_timeout: Duration::from_secs(self.timeouts.upload_secs),
        }
    }

    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("com", "smart-paste", "Smart-Paste")
    }

    #[track_caller]
    fn default_config_path() -> AppResult<PathBuf> {
        let proj_dirs = Self::project_dirs().ok_or_else(|| AppError::ConfigError {
            reason: "Failed to get config directory".to_string(),
            location: ErrorLocation::from(Location::caller()),
        })?;

        let config_dir = proj_dirs.config_dir();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir)?;
            debug!(config_dir = ?config_dir, "Created config directory");
        }

        Ok(config_dir.join("config.toml"))
    }

    #[track_caller]
    fn create_default() -> AppResult<Self> {
        let config = Config::default();
        let config_path = Self::default_config_path()?;

        config.save_to(&config_path)?;

        warn!(
            config_path = ?config_path,
            server_url = %config.server_url,
            "Default config created. Edit server_url to point at your hosting server."
        );

        Ok(config)
    }
}

/// Seconds to a non-zero duration, or `None` for negative, NaN, overflowing
/// or sub-nanosecond values.
fn poll_interval(secs: f64) -> Option<Duration> {
    Duration::try_from_secs_f64(secs)
        .ok()
        .filter(|interval| !interval.is_zero())
}
