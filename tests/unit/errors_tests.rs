/*!
 * Tests for error types and conversions
 */

use std::error::Error;

use gesture_planner::errors::{
    ActuatorError, AppError, ClassifierError, DatasetError, PlaybackError, TimelineError, TrainingError,
    TranscriptError,
};

#[test]
fn test_datasetError_invalidRow_shouldNameTheRow() {
    let error = DatasetError::InvalidRow {
        index: 3,
        row: r#"{"token":"hi"}"#.to_string(),
    };
    let display = format!("{}", error);
    assert!(display.contains("row 3"));
    assert!(display.contains(r#"{"token":"hi"}"#));
}

#[test]
fn test_transcriptError_missingField_shouldNameFieldAndSegment() {
    let error = TranscriptError::MissingField {
        index: 1,
        field: "end",
        segment: r#"{"start":0}"#.to_string(),
    };
    let display = format!("{}", error);
    assert!(display.contains("segment 1"));
    assert!(display.contains("'end'"));
    assert!(display.contains(r#"{"start":0}"#));
}

#[test]
fn test_classifierError_lengthMismatch_shouldDisplayCounts() {
    let error = ClassifierError::LengthMismatch { expected: 3, actual: 2 };
    assert_eq!(format!("{}", error), "Classifier returned 2 labels for 3 tokens");
}

#[test]
fn test_trainingError_classTooSmall_shouldDisplayGesture() {
    let error = TrainingError::ClassTooSmall {
        gesture: "wave".to_string(),
        count: 1,
    };
    let display = format!("{}", error);
    assert!(display.contains("'wave'"));
    assert!(display.contains("only 1 row"));
}

#[test]
fn test_timelineError_fromClassifierError_shouldWrap() {
    let error: TimelineError = ClassifierError::PredictionFailed("offline".to_string()).into();
    assert!(matches!(error, TimelineError::Classifier(ClassifierError::PredictionFailed(_))));
    assert!(format!("{}", error).contains("offline"));
}

#[test]
fn test_playbackError_actuator_shouldExposeSource() {
    let error = PlaybackError::Actuator {
        index: 4,
        source: ActuatorError::DispatchFailed {
            gesture: "nod".to_string(),
            message: "servo stalled".to_string(),
        },
    };
    let display = format!("{}", error);
    assert!(display.contains("event 4"));
    assert!(display.contains("servo stalled"));

    let source = error.source().expect("actuator error should be the source");
    assert!(source.to_string().contains("'nod'"));
}

#[test]
fn test_appError_fromDomainErrors_shouldPickMatchingVariant() {
    assert!(matches!(AppError::from(DatasetError::NotAnArray), AppError::Dataset(_)));
    assert!(matches!(AppError::from(TranscriptError::EmptySrt), AppError::Transcript(_)));
    assert!(matches!(AppError::from(PlaybackError::AlreadyStarted), AppError::Playback(_)));
    assert!(matches!(
        AppError::from(TrainingError::InvalidTestSize(2.0)),
        AppError::Training(_)
    ));
}

#[test]
fn test_appError_fromAnyhowAndIo_shouldConvert() {
    let from_anyhow = AppError::from(anyhow::anyhow!("boom"));
    assert!(matches!(from_anyhow, AppError::Unknown(ref msg) if msg == "boom"));

    let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.json");
    let from_io = AppError::from(io);
    assert!(matches!(from_io, AppError::File(ref msg) if msg.contains("missing.json")));
}
