/*!
 * Error types for the gesture-planner application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Errors that can occur while loading and normalizing a gesture dataset
#[derive(Error, Debug)]
pub enum DatasetError {
    /// The dataset file is not valid JSON
    #[error("Failed to parse dataset: {0}")]
    ParseError(String),

    /// The dataset root is not a JSON array
    #[error("Dataset must be a JSON array of rows")]
    NotAnArray,

    /// A row could not be normalized into a token/gesture pair
    #[error("Invalid dataset row {index} (needs token & gesture): {row}")]
    InvalidRow {
        /// Position of the row in the dataset
        index: usize,
        /// Raw JSON of the row
        row: String,
    },

    /// A row carries a weight that is not a number
    #[error("Invalid weight in dataset row {index}: {row}")]
    InvalidWeight {
        /// Position of the row in the dataset
        index: usize,
        /// Raw JSON of the row
        row: String,
    },
}

/// Errors that can occur while loading a transcript
#[derive(Error, Debug)]
pub enum TranscriptError {
    /// The transcript file is not valid JSON
    #[error("Failed to parse transcript: {0}")]
    ParseError(String),

    /// The transcript root is not a JSON array
    #[error("Transcript must be a JSON array of segments")]
    NotAnArray,

    /// A segment lacks one of the required keys
    #[error("Transcript segment {index} is missing '{field}': {segment}")]
    MissingField {
        /// Position of the segment in the transcript
        index: usize,
        /// Name of the missing key
        field: &'static str,
        /// Raw JSON of the segment
        segment: String,
    },

    /// A segment key holds a value of the wrong type
    #[error("Transcript segment {index} has an invalid '{field}' (expected {expected}): {segment}")]
    InvalidField {
        /// Position of the segment in the transcript
        index: usize,
        /// Name of the offending key
        field: &'static str,
        /// Expected JSON type
        expected: &'static str,
        /// Raw JSON of the segment
        segment: String,
    },

    /// An SRT transcript contained no usable cue
    #[error("No valid subtitle cues were found in the SRT content")]
    EmptySrt,
}

/// Errors that can occur when loading or querying a gesture classifier
#[derive(Error, Debug)]
pub enum ClassifierError {
    /// The persisted model could not be read or decoded
    #[error("Failed to load model: {0}")]
    LoadFailed(String),

    /// The persisted model is internally inconsistent
    #[error("Corrupt model: {0}")]
    Corrupt(String),

    /// The classifier returned a label list of the wrong length
    #[error("Classifier returned {actual} labels for {expected} tokens")]
    LengthMismatch {
        /// Number of tokens sent to the classifier
        expected: usize,
        /// Number of labels received
        actual: usize,
    },

    /// The classifier failed to produce predictions
    #[error("Prediction failed: {0}")]
    PredictionFailed(String),
}

/// Errors that can occur while training a classifier
#[derive(Error, Debug)]
pub enum TrainingError {
    /// A stratified split needs at least two rows per gesture
    #[error("Gesture '{gesture}' has only {count} row(s); at least 2 are needed for a stratified split")]
    ClassTooSmall {
        /// Gesture label
        gesture: String,
        /// Number of rows carrying it
        count: usize,
    },

    /// The configured test share is unusable
    #[error("Invalid test size {0}: must be between 0 and 1")]
    InvalidTestSize(f64),
}

/// Errors that can occur while building a timeline
#[derive(Error, Debug)]
pub enum TimelineError {
    /// Error from the classifier
    #[error("Classifier error: {0}")]
    Classifier(#[from] ClassifierError),
}

/// Errors reported by an actuator while performing a gesture
#[derive(Error, Debug)]
pub enum ActuatorError {
    /// The gesture could not be dispatched
    #[error("Failed to perform gesture '{gesture}': {message}")]
    DispatchFailed {
        /// Gesture label
        gesture: String,
        /// Reason reported by the actuator
        message: String,
    },
}

/// Errors that can occur during playback
#[derive(Error, Debug)]
pub enum PlaybackError {
    /// Error from the actuator; playback stops at the failing event
    #[error("Actuator error at event {index}: {source}")]
    Actuator {
        /// Position of the failing event in the plan
        index: usize,
        /// Underlying actuator error
        #[source]
        source: ActuatorError,
    },

    /// The executor has already played a plan
    #[error("Playback already started")]
    AlreadyStarted,

    /// An event time cannot be turned into a wall-clock offset
    #[error("Invalid timing at event {index}: {seconds}s")]
    InvalidTiming {
        /// Position of the event in the plan
        index: usize,
        /// Offending offset in seconds
        seconds: f64,
    },
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from dataset loading
    #[error("Dataset error: {0}")]
    Dataset(#[from] DatasetError),

    /// Error from transcript loading
    #[error("Transcript error: {0}")]
    Transcript(#[from] TranscriptError),

    /// Error from the classifier
    #[error("Classifier error: {0}")]
    Classifier(#[from] ClassifierError),

    /// Error from training
    #[error("Training error: {0}")]
    Training(#[from] TrainingError),

    /// Error from timeline construction
    #[error("Timeline error: {0}")]
    Timeline(#[from] TimelineError),

    /// Error from playback
    #[error("Playback error: {0}")]
    Playback(#[from] PlaybackError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
