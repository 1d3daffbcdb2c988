use crate::config::{Config, OutputMode};

use std::{fs, time::Duration};

use tempfile::TempDir;

/// WHAT: Missing keys fall back to defaults
/// WHY: Users only write the settings they care about
#[test]
#[allow(clippy::unwrap_used)]
fn given_partial_file_when_loading_then_defaults_fill_gaps() {
    // Given: A config that only sets the server URL
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "server_url = \"http://images.local:8080\"\n").unwrap();

    // When: Loading it
    let config = Config::load_from(&path).unwrap();

    // Then: The URL is taken and everything else is default
    assert_eq!(config.server_url, "http://images.local:8080");
    assert_eq!(config.check_interval(), Duration::from_secs(1));
    assert_eq!(config.max_file_size, 10 * 1024 * 1024);
    assert_eq!(config.behaviour.output_mode, OutputMode::Type);
    assert_eq!(config.debounce(), Duration::from_millis(500));
    assert_eq!(config.timeouts.check_secs, 5);
    assert_eq!(config.timeouts.upload_secs, 30);
}

/// WHAT: Nested sections and fractional intervals are honored
/// WHY: Sub-second polling and clipboard mode are valid setups
#[test]
#[allow(clippy::unwrap_used)]
fn given_full_file_when_loading_then_values_applied() {
    // Given: A config touching every section
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(
        &path,
        r#"
server_url = "https://img.example.com"
check_interval = 0.25
max_file_size = 2048

[behaviour]
output_mode = "clipboard"
debounce_ms = 100

[timeouts]
check_secs = 2
upload_secs = 60
"#,
    )
    .unwrap();

    // When: Loading it
    let config = Config::load_from(&path).unwrap();

    // Then: Each value flows through to its accessor
    assert_eq!(config.check_interval(), Duration::from_millis(250));
    assert_eq!(config.behaviour.output_mode, OutputMode::Clipboard);
    assert_eq!(config.debounce(), Duration::from_millis(100));

    let sync = config.sync_client_config();
    assert_eq!(sync.base_url, "https://img.example.com");
    assert_eq!(sync.check_timeout, Duration::from_secs(2));
    assert_eq!(sync.upload_timeout, Duration::from_secs(60));
}

/// WHAT: Malformed TOML is rejected
/// WHY: A broken config must stop startup rather than run on guesses
#[test]
#[allow(clippy::unwrap_used)]
fn given_malformed_file_when_loading_then_error() {
    // Given: Garbage content
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "server_url = [unterminated").unwrap();

    // When/Then: Loading fails
    assert!(Config::load_from(&path).is_err());
}

/// WHAT: Non-positive poll intervals are rejected
/// WHY: A zero interval would spin the poll loop
#[test]
#[allow(clippy::unwrap_used)]
fn given_zero_interval_when_loading_then_error() {
    // Given: check_interval = 0
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "check_interval = 0.0\n").unwrap();

    // When/Then: Validation fails
    assert!(Config::load_from(&path).is_err());
}

/// WHAT: Intervals that do not convert to a non-zero duration are rejected
/// WHY: A sub-nanosecond interval rounds to zero and stalls the poll timer;
/// an overflowing one cannot be represented at all
#[test]
#[allow(clippy::unwrap_used)]
fn given_unrepresentable_interval_when_loading_then_error() {
    // Given: One interval too small to survive rounding and one too large
    let dir = TempDir::new().unwrap();
    let tiny = dir.path().join("tiny.toml");
    let huge = dir.path().join("huge.toml");
    fs::write(&tiny, "check_interval = 1e-10\n").unwrap();
    fs::write(&huge, "check_interval = 1e300\n").unwrap();

    // When/Then: Both are refused at load time
    assert!(Config::load_from(&tiny).is_err());
    assert!(Config::load_from(&huge).is_err());
}

/// WHAT: The poll interval accessor never returns zero
/// WHY: The poll loop builds its timer straight from this value
#[test]
fn given_unvalidated_tiny_interval_when_reading_duration_then_default_used() {
    // Given: A config built in code, bypassing validation
    let config = Config {
        check_interval: 1e-10,
        ..Config::default()
    };

    // When: Reading the interval
    let interval = config.check_interval();

    // Then: The default one-second interval is used
    assert!(!interval.is_zero());
    assert_eq!(interval, Duration::from_secs(1));
}

/// WHAT: Server URLs must be http(s)
/// WHY: Every request is built from this base
#[test]
fn given_non_http_url_when_validating_then_error() {
    // Given: An ftp URL and an unparseable one
    let ftp = Config {
        server_url: "ftp://images.local".to_string(),
        ..Config::default()
    };
    let junk = Config {
        server_url: "not a url".to_string(),
        ..Config::default()
    };

    // When/Then: Both fail validation, the default passes
    assert!(ftp.validate().is_err());
    assert!(junk.validate().is_err());
    assert!(Config::default().validate().is_ok());
}

/// WHAT: An explicit path that does not exist is an error
/// WHY: A mistyped --config must not silently fall back to defaults
#[test]
#[allow(clippy::unwrap_used)]
fn given_missing_explicit_path_when_loading_then_error() {
    // Given: A path inside an empty directory
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("absent.toml");

    // When/Then: Loading fails
    assert!(Config::load(Some(&path)).is_err());
}

/// WHAT: Saved configs load back with the same values
/// WHY: The default config written on first run must be readable
#[test]
#[allow(clippy::unwrap_used)]
fn given_saved_config_when_loading_then_values_match() {
    // Given: A non-default config saved to disk
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    let mut config = Config::default();
    config.max_file_size = 4096;
    config.behaviour.output_mode = OutputMode::Clipboard;
    config.save_to(&path).unwrap();

    // When: Loading it back
    let loaded = Config::load_from(&path).unwrap();

    // Then: Values survive and no temp file is left behind
    assert_eq!(loaded.max_file_size, 4096);
    assert_eq!(loaded.behaviour.output_mode, OutputMode::Clipboard);
    assert!(!path.with_extension("toml.tmp").exists());
}

/// WHAT: Candidate search returns the first file that exists
/// WHY: Earlier locations override later ones
#[test]
#[allow(clippy::unwrap_used)]
fn given_candidates_when_searching_then_first_existing_wins() {
    // Given: One missing and two present candidates
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("missing.toml");
    let second = dir.path().join("second.toml");
    let third = dir.path().join("third.toml");
    fs::write(&second, "").unwrap();
    fs::write(&third, "").unwrap();

    // When: Searching
    let found = Config::first_existing(&[missing.clone(), second.clone(), third]);

    // Then: The second candidate is chosen; none found when all are missing
    assert_eq!(found, Some(second));
    assert_eq!(Config::first_existing(&[missing]), None);
}
