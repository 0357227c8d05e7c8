//! Integration tests for logging system

use bridge_traits::log::LogLevel;
use core_runtime::logging::{display_locator, init_logging, strip_path, LogFormat, LoggingConfig};

#[test]
fn test_logging_config_builder() {
    let config = LoggingConfig::default()
        .with_format(LogFormat::Json)
        .with_level(LogLevel::Debug)
        .with_locator_redaction(true)
        .with_spans(true);

    assert_eq!(config.format, LogFormat::Json);
    assert_eq!(config.level, LogLevel::Debug);
    assert!(config.redact_locators);
    assert!(config.enable_spans);
}

#[test]
fn test_path_stripping() {
    // Unix paths
    assert_eq!(strip_path("/home/user/music/ding.wav"), "ding.wav");
    assert_eq!(strip_path("/data/app/files/alert.ogg"), "alert.ogg");

    // Windows paths
    assert_eq!(strip_path("C:\\Users\\John\\Sounds\\chime.wav"), "chime.wav");

    // Already basename
    assert_eq!(strip_path("tick.mp3"), "tick.mp3");

    // Edge cases
    assert_eq!(strip_path("/var/log/"), "");
    assert_eq!(strip_path(""), "");
}

#[test]
fn test_format_selection() {
    #[cfg(debug_assertions)]
    {
        let config = LoggingConfig::default();
        assert_eq!(config.format, LogFormat::Pretty);
    }

    #[cfg(not(debug_assertions))]
    {
        let config = LoggingConfig::default();
        assert_eq!(config.format, LogFormat::Json);
    }
}

#[test]
fn test_filter_configuration() {
    let config = LoggingConfig::default().with_filter("core_playback=debug,core_service=trace");

    assert_eq!(
        config.filter,
        Some("core_playback=debug,core_service=trace".to_string())
    );
}

// The global subscriber can only be installed once per process, so this is
// the only test in this binary that calls `init_logging`.
#[test]
fn test_init_logging_once() {
    let config = LoggingConfig::default()
        .with_format(LogFormat::Compact)
        .with_level(LogLevel::Warn)
        .with_locator_redaction(false);

    init_logging(config.clone()).expect("first initialization succeeds");
    assert_eq!(display_locator("/sdcard/sounds/ding.wav"), "/sdcard/sounds/ding.wav");

    let second = init_logging(config);
    assert!(second.is_err());
}
