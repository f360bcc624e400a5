/*!
 * Integration tests for application lifecycle
 */

use anyhow::Result;
use gesture_planner::app_config::Config;
use gesture_planner::app_controller::Controller;
use gesture_planner::playback::RecordingActuator;
use gesture_planner::timeline::{AnimationPlan, GestureEvent};
use crate::common;

/// Test the controller initialization with default config
#[test]
fn test_controller_initialization_withDefaultConfig_shouldSucceed() -> Result<()> {
    let controller = Controller::new_for_test()?;
    assert_eq!(controller.config().timeline.fallback_gesture, "neutral");
    Ok(())
}

/// Test that an invalid configuration is refused
#[test]
fn test_controller_withInvalidConfig_shouldFail() {
    let mut config = Config::default();
    config.timeline.max_phrase_len = 0;
    assert!(Controller::with_config(config).is_err());
}

/// Test the timeline command against an SRT transcript
#[test]
fn test_run_timeline_withSrtTranscript_shouldWritePlan() -> Result<()> {
    let controller = Controller::new_for_test()?;
    common::init_test_logging();
    let temp_dir = common::create_temp_dir()?;
    let data = common::create_test_dataset(temp_dir.path(), "gestures.json")?;
    let talk = common::create_test_subtitle(temp_dir.path(), "talk.srt")?;
    let out = temp_dir.path().join("plan.json");

    let plan = controller.run_timeline(&talk, &data, None, &out)?;

    assert!(out.exists());
    let gestures: Vec<&str> = plan.iter().map(|e| e.gesture.as_str()).collect();
    assert_eq!(gestures, vec!["wave", "neutral", "thumbs_up", "neutral"]);
    assert_eq!(plan.events()[0].start, 1.0);
    Ok(())
}

/// Test that a missing model path does not stop the timeline command
#[test]
fn test_run_timeline_withMissingModel_shouldStillWritePlan() -> Result<()> {
    let controller = Controller::new_for_test()?;
    common::init_test_logging();
    let temp_dir = common::create_temp_dir()?;
    let data = common::create_test_dataset(temp_dir.path(), "gestures.json")?;
    let talk = common::create_test_transcript(temp_dir.path(), "talk.json")?;
    let out = temp_dir.path().join("plan.json");
    let missing_model = temp_dir.path().join("nope.json");

    let plan = controller.run_timeline(&talk, &data, Some(&missing_model), &out)?;

    assert_eq!(plan.len(), 4);
    assert_eq!(AnimationPlan::load(&out)?, plan);
    Ok(())
}

/// Test that a malformed transcript fails the command
#[test]
fn test_run_timeline_withMalformedTranscript_shouldFail() -> Result<()> {
    let controller = Controller::new_for_test()?;
    common::init_test_logging();
    let temp_dir = common::create_temp_dir()?;
    let data = common::create_test_dataset(temp_dir.path(), "gestures.json")?;
    let talk = common::create_test_file(temp_dir.path(), "talk.json", r#"[{"start": 0, "text": "hi"}]"#)?;
    let out = temp_dir.path().join("plan.json");

    let result = controller.run_timeline(&talk, &data, None, &out);

    assert!(result.is_err());
    assert!(!out.exists());
    Ok(())
}

/// Test simulating a saved plan
#[tokio::test]
async fn test_run_simulate_withSavedPlan_shouldDispatchAll() -> Result<()> {
    let controller = Controller::new_for_test()?;
    common::init_test_logging();
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("plan.json");
    let plan: AnimationPlan = vec![GestureEvent::new(0.0, 0.5, "wave"), GestureEvent::new(0.5, 1.0, "nod")].into();
    plan.save(&path)?;

    let summary = controller.run_simulate(&path, false).await?;

    assert_eq!(summary.dispatched, 2);
    Ok(())
}

#[tokio::test]
async fn test_run_simulate_withEmptyPlan_shouldDispatchNothing() -> Result<()> {
    let controller = Controller::new_for_test()?;
    common::init_test_logging();
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "plan.json", r#"{"animation_plan": []}"#)?;

    let summary = controller.run_simulate(&path, true).await?;

    assert_eq!(summary.dispatched, 0);
    Ok(())
}

/// Test that a failing actuator surfaces through the controller
#[tokio::test]
async fn test_play_withFailingActuator_shouldReturnError() -> Result<()> {
    let controller = Controller::new_for_test()?;
    let actuator = RecordingActuator::failing_at(0);
    let plan: AnimationPlan = vec![GestureEvent::new(0.0, 0.5, "wave")].into();

    let result = controller.play(&plan, actuator.clone(), false).await;

    assert!(result.is_err());
    assert_eq!(actuator.count(), 0);
    Ok(())
}

/// Test realtime playback through the controller on a paused clock
#[tokio::test(start_paused = true)]
async fn test_play_realtime_shouldPaceDispatches() -> Result<()> {
    let controller = Controller::new_for_test()?;
    let actuator = RecordingActuator::new();
    let plan: AnimationPlan = vec![GestureEvent::new(0.0, 1.0, "wave"), GestureEvent::new(1.0, 2.0, "nod")].into();

    let summary = controller.play(&plan, actuator.clone(), true).await?;

    let dispatches = actuator.dispatches();
    assert_eq!(summary.dispatched, 2);
    assert!(dispatches[1].at - dispatches[0].at >= std::time::Duration::from_secs(1));
    Ok(())
}
