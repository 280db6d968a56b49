//! Tests for the Lumen configuration system.

use std::path::PathBuf;
use std::sync::Mutex;

use lumen_core::config::{CliOverrides, HorizontalAnchor, LumenConfig, VerticalAnchor};
use lumen_core::errors::ConfigError;

/// Global mutex to serialize tests that modify environment variables.
static ENV_MUTEX: Mutex<()> = Mutex::new(());

fn tempdir() -> tempfile::TempDir {
    tempfile::TempDir::new().unwrap()
}

/// Clear all LUMEN_ env vars and point HOME at an empty directory so a
/// developer's own `~/.lumen/config.toml` cannot leak in.
fn isolate_env(home: &std::path::Path) {
    for key in [
        "LUMEN_API_BASE_URL",
        "LUMEN_API_TIMEOUT_SECS",
        "LUMEN_POLL_INTERVAL_MS",
        "LUMEN_SPLASH_DELAY_MS",
        "LUMEN_DOWNLOAD_DIR",
    ] {
        std::env::remove_var(key);
    }
    std::env::set_var("HOME", home);
    std::env::remove_var("USERPROFILE");
}

#[test]
fn defaults_match_documented_values() {
    let config = LumenConfig::default();
    assert_eq!(config.polling.interval_ms, 5_000);
    assert_eq!(config.cache.retention_secs, 900);
    assert_eq!(config.cache.stale_after_secs, 0);
    assert!(!config.cache.retry_on_failure);
    assert_eq!(config.notifications.max_visible, 3);
    assert_eq!(config.notifications.vertical, VerticalAnchor::Bottom);
    assert_eq!(config.notifications.horizontal, HorizontalAnchor::Center);
    assert_eq!(config.shell.splash_delay_ms, 2_000);
    LumenConfig::validate(&config).unwrap();
}

#[test]
fn layered_resolution_cli_over_env_over_project_over_user() {
    let _lock = ENV_MUTEX.lock().unwrap();
    let home = tempdir();
    isolate_env(home.path());

    std::fs::create_dir_all(home.path().join(".lumen")).unwrap();
    std::fs::write(
        home.path().join(".lumen/config.toml"),
        r#"
[api]
base_url = "http://user-host:1"
timeout_secs = 7

[notifications]
max_visible = 5
"#,
    )
    .unwrap();

    let project = tempdir();
    std::fs::write(
        project.path().join("lumen.toml"),
        r#"
[api]
base_url = "http://project-host:2"

[polling]
interval_ms = 1000
"#,
    )
    .unwrap();

    std::env::set_var("LUMEN_POLL_INTERVAL_MS", "2500");

    let cli = CliOverrides {
        base_url: Some("http://cli-host:3".into()),
        ..Default::default()
    };
    let config = LumenConfig::load(project.path(), Some(&cli)).unwrap();

    assert_eq!(config.api.base_url, "http://cli-host:3");
    assert_eq!(config.polling.interval_ms, 2500);
    // User-layer keys survive when the project layer does not mention them.
    assert_eq!(config.api.timeout_secs, 7);
    assert_eq!(config.notifications.max_visible, 5);

    isolate_env(home.path());
}

#[test]
fn missing_files_fall_back_to_defaults() {
    let _lock = ENV_MUTEX.lock().unwrap();
    let home = tempdir();
    isolate_env(home.path());

    let project = tempdir();
    let config = LumenConfig::load(project.path(), None).unwrap();
    assert_eq!(config, LumenConfig::default());
}

#[test]
fn invalid_env_value_is_ignored() {
    let _lock = ENV_MUTEX.lock().unwrap();
    let home = tempdir();
    isolate_env(home.path());

    std::env::set_var("LUMEN_POLL_INTERVAL_MS", "soon");
    let project = tempdir();
    let config = LumenConfig::load(project.path(), None).unwrap();
    assert_eq!(config.polling.interval_ms, 5_000);

    isolate_env(home.path());
}

#[test]
fn env_download_dir_applies() {
    let _lock = ENV_MUTEX.lock().unwrap();
    let home = tempdir();
    isolate_env(home.path());

    std::env::set_var("LUMEN_DOWNLOAD_DIR", "/tmp/lumen-downloads");
    let project = tempdir();
    let config = LumenConfig::load(project.path(), None).unwrap();
    assert_eq!(
        config.shell.download_dir,
        PathBuf::from("/tmp/lumen-downloads")
    );

    isolate_env(home.path());
}

#[test]
fn malformed_project_file_is_a_parse_error() {
    let _lock = ENV_MUTEX.lock().unwrap();
    let home = tempdir();
    isolate_env(home.path());

    let project = tempdir();
    std::fs::write(project.path().join("lumen.toml"), "[api\nbase_url = ").unwrap();
    let err = LumenConfig::load(project.path(), None).unwrap_err();
    assert!(matches!(err, ConfigError::ParseError { .. }));
}

#[test]
fn explicit_config_file_replaces_project_file() {
    let _lock = ENV_MUTEX.lock().unwrap();
    let home = tempdir();
    isolate_env(home.path());

    let dir = tempdir();
    let path = dir.path().join("custom.toml");
    std::fs::write(&path, "[polling]\ninterval_ms = 1500\n").unwrap();
    let config = LumenConfig::load_file(&path, None).unwrap();
    assert_eq!(config.polling.interval_ms, 1500);

    let missing = dir.path().join("absent.toml");
    let err = LumenConfig::load_file(&missing, None).unwrap_err();
    assert!(matches!(err, ConfigError::ReadFailed { .. }));
}

#[test]
fn zero_poll_interval_fails_validation() {
    let err = LumenConfig::from_toml("[polling]\ninterval_ms = 0\n").unwrap_err();
    match err {
        ConfigError::ValidationFailed { field, .. } => assert_eq!(field, "polling.interval_ms"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn retention_beyond_cache_limit_fails_validation() {
    let err = LumenConfig::from_toml("[cache]\nretention_secs = 40000000000\n").unwrap_err();
    match err {
        ConfigError::ValidationFailed { field, .. } => assert_eq!(field, "cache.retention_secs"),
        other => panic!("unexpected error: {other:?}"),
    }

    let limit = format!(
        "[cache]\nretention_secs = {}\n",
        lumen_core::config::defaults::MAX_CACHE_RETENTION_SECS
    );
    assert!(LumenConfig::from_toml(&limit).is_ok());
}

#[test]
fn non_http_base_url_fails_validation() {
    for url in ["", "localhost:5000", "ftp://host", "http://"] {
        let toml = format!("[api]\nbase_url = \"{url}\"\n");
        assert!(
            matches!(
                LumenConfig::from_toml(&toml),
                Err(ConfigError::ValidationFailed { .. })
            ),
            "{url:?} should be rejected"
        );
    }
}

#[test]
fn unknown_placement_is_a_parse_error() {
    let err = LumenConfig::from_toml("[notifications]\nvertical = \"middle\"\n").unwrap_err();
    assert!(matches!(err, ConfigError::ParseError { .. }));
}

#[test]
fn toml_round_trip_preserves_values() {
    let mut config = LumenConfig::default();
    config.api.base_url = "https://lumen.example".into();
    config
        .api
        .default_headers
        .insert("x-client".into(), "lumen".into());
    config.notifications.horizontal = HorizontalAnchor::Right;

    let text = config.to_toml().unwrap();
    let parsed = LumenConfig::from_toml(&text).unwrap();
    assert_eq!(parsed, config);
}
