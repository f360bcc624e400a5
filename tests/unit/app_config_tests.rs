/*!
 * Tests for application configuration functionality
 */

use gesture_planner::app_config::{Config, LogLevel};

/// Test default configuration values
#[test]
fn test_default_config_withNoParameters_shouldHaveCorrectDefaults() {
    let config = Config::default();

    assert_eq!(config.timeline.max_phrase_len, 3);
    assert_eq!(config.timeline.min_gesture_duration_secs, 0.25);
    assert_eq!(config.timeline.min_segment_width_secs, 0.001);
    assert_eq!(config.timeline.merge_tolerance_secs, 1e-6);
    assert_eq!(config.timeline.fallback_gesture, "neutral");

    assert!(!config.playback.realtime);

    assert_eq!(config.training.test_size, 0.5);
    assert_eq!(config.training.random_state, 42);
    assert_eq!(config.training.min_rows, 10);
    assert_eq!(config.training.min_classes, 2);

    assert_eq!(config.log_level, LogLevel::Info);
}

/// Test configuration validation
#[test]
fn test_config_validation_withVariousConfigs_shouldValidateCorrectly() {
    let mut config = Config::default();
    assert!(config.validate().is_ok());

    config.timeline.fallback_gesture = "   ".to_string();
    assert!(config.validate().is_err());

    config = Config::default();
    config.timeline.min_segment_width_secs = 0.0;
    assert!(config.validate().is_err());

    config = Config::default();
    config.timeline.min_gesture_duration_secs = f64::NAN;
    assert!(config.validate().is_err());

    config = Config::default();
    config.training.test_size = 1.0;
    assert!(config.validate().is_err());

    config = Config::default();
    config.training.smoothing = 0.0;
    assert!(config.validate().is_err());
}

/// Test that a sparse config file is completed with defaults
#[test]
fn test_config_deserialize_withPartialJson_shouldFillDefaults() {
    let json = r#"{"playback": {"realtime": true}, "log_level": "debug"}"#;
    let config: Config = serde_json::from_str(json).unwrap();

    assert!(config.playback.realtime);
    assert_eq!(config.log_level, LogLevel::Debug);
    assert_eq!(config.timeline.max_phrase_len, 3);
    assert_eq!(config.training.random_state, 42);
    assert!(config.validate().is_ok());
}

/// Test that the default config survives a JSON round trip
#[test]
fn test_config_serialize_withDefaults_shouldRoundTrip() {
    let config = Config::default();
    let json = serde_json::to_string_pretty(&config).unwrap();
    let reloaded: Config = serde_json::from_str(&json).unwrap();

    assert_eq!(reloaded.timeline.fallback_gesture, config.timeline.fallback_gesture);
    assert_eq!(reloaded.training.test_size, config.training.test_size);
    assert_eq!(reloaded.log_level, config.log_level);
}

#[test]
fn test_log_level_to_level_filter_shouldMapEachLevel() {
    assert_eq!(LogLevel::Error.to_level_filter(), log::LevelFilter::Error);
    assert_eq!(LogLevel::Warn.to_level_filter(), log::LevelFilter::Warn);
    assert_eq!(LogLevel::Info.to_level_filter(), log::LevelFilter::Info);
    assert_eq!(LogLevel::Debug.to_level_filter(), log::LevelFilter::Debug);
    assert_eq!(LogLevel::Trace.to_level_filter(), log::LevelFilter::Trace);
}
