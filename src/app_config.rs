use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Config {
    /// Timeline construction settings
    #[serde(default)]
    pub timeline: TimelineConfig,

    /// Playback settings
    #[serde(default)]
    pub playback: PlaybackConfig,

    /// Classifier training settings
    #[serde(default)]
    pub training: TrainingConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Timeline construction settings
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct TimelineConfig {
    /// Longest vocabulary phrase, in words, tried by the lexicon matcher
    #[serde(default = "default_max_phrase_len")]
    pub max_phrase_len: usize,

    /// Minimum dwell time of a single gesture in seconds
    #[serde(default = "default_min_gesture_duration_secs")]
    pub min_gesture_duration_secs: f64,

    /// Floor applied to a segment's width before splitting it between tokens
    #[serde(default = "default_min_segment_width_secs")]
    pub min_segment_width_secs: f64,

    /// Maximum gap between two same-gesture events that still counts as touching
    #[serde(default = "default_merge_tolerance_secs")]
    pub merge_tolerance_secs: f64,

    /// Label assigned to unresolved tokens when no classifier is available
    #[serde(default = "default_fallback_gesture")]
    pub fallback_gesture: String,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            max_phrase_len: default_max_phrase_len(),
            min_gesture_duration_secs: default_min_gesture_duration_secs(),
            min_segment_width_secs: default_min_segment_width_secs(),
            merge_tolerance_secs: default_merge_tolerance_secs(),
            fallback_gesture: default_fallback_gesture(),
        }
    }
}

/// Playback settings
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct PlaybackConfig {
    /// Pace playback to wall clock
    #[serde(default)]
    pub realtime: bool,
}

/// Classifier training settings
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct TrainingConfig {
    /// Share of each gesture's rows held out for evaluation (0.0 to 1.0)
    #[serde(default = "default_test_size")]
    pub test_size: f64,

    /// Seed for the train/test shuffle
    #[serde(default = "default_random_state")]
    pub random_state: u64,

    /// Minimum number of rows needed to train at all
    #[serde(default = "default_min_rows")]
    pub min_rows: usize,

    /// Minimum number of distinct gestures needed to train at all
    #[serde(default = "default_min_classes")]
    pub min_classes: usize,

    /// Additive smoothing applied to feature counts
    #[serde(default = "default_smoothing")]
    pub smoothing: f64,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            test_size: default_test_size(),
            random_state: default_random_state(),
            min_rows: default_min_rows(),
            min_classes: default_min_classes(),
            smoothing: default_smoothing(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    // @returns: Matching log crate filter
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_max_phrase_len() -> usize {
    3
}

fn default_min_gesture_duration_secs() -> f64 {
    0.25
}

fn default_min_segment_width_secs() -> f64 {
    0.001 // keeps the per-token step non-zero
}

fn default_merge_tolerance_secs() -> f64 {
    1e-6
}

fn default_fallback_gesture() -> String {
    "neutral".to_string()
}

fn default_test_size() -> f64 {
    0.5
}

fn default_random_state() -> u64 {
    42
}

fn default_min_rows() -> usize {
    10
}

fn default_min_classes() -> usize {
    2
}

fn default_smoothing() -> f64 {
    1.0
}

impl Config {
    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        let timeline = &self.timeline;
        if timeline.max_phrase_len == 0 {
            return Err(anyhow!("timeline.max_phrase_len must be at least 1"));
        }
        if !(timeline.min_gesture_duration_secs >= 0.0) {
            return Err(anyhow!(
                "timeline.min_gesture_duration_secs must be non-negative, got {}",
                timeline.min_gesture_duration_secs
            ));
        }
        if !(timeline.min_segment_width_secs > 0.0) {
            return Err(anyhow!(
                "timeline.min_segment_width_secs must be positive, got {}",
                timeline.min_segment_width_secs
            ));
        }
        if !(timeline.merge_tolerance_secs >= 0.0) {
            return Err(anyhow!(
                "timeline.merge_tolerance_secs must be non-negative, got {}",
                timeline.merge_tolerance_secs
            ));
        }
        if timeline.fallback_gesture.trim().is_empty() {
            return Err(anyhow!("timeline.fallback_gesture must not be empty"));
        }

        let training = &self.training;
        if !(training.test_size > 0.0 && training.test_size < 1.0) {
            return Err(anyhow!(
                "training.test_size must be between 0 and 1, got {}",
                training.test_size
            ));
        }
        if !(training.smoothing > 0.0) {
            return Err(anyhow!(
                "training.smoothing must be positive, got {}",
                training.smoothing
            ));
        }

        Ok(())
    }
}
