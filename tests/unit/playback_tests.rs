/*!
 * Tests for the playback executor and actuators
 */

use std::time::Duration;

use gesture_planner::errors::{ActuatorError, PlaybackError};
use gesture_planner::playback::{
    PlaybackExecutor, PlaybackMode, PlaybackState, RecordingActuator, VirtualRobot,
};
use gesture_planner::timeline::{AnimationPlan, GestureEvent};

fn plan(events: &[(f64, f64, &str)]) -> AnimationPlan {
    events
        .iter()
        .map(|&(start, end, gesture)| GestureEvent::new(start, end, gesture))
        .collect::<Vec<_>>()
        .into()
}

// Paused-clock timers fire on millisecond ticks, never before their deadline
fn assert_at(actual: Duration, expected: Duration) {
    assert!(
        actual >= expected && actual - expected < Duration::from_millis(5),
        "expected about {:?}, got {:?}",
        expected,
        actual
    );
}

#[tokio::test]
async fn test_run_asFastAsPossible_shouldDispatchEveryEventInOrder() {
    let actuator = RecordingActuator::new();
    let mut executor = PlaybackExecutor::new(actuator.clone(), PlaybackMode::AsFastAsPossible);

    let summary = executor
        .run(&plan(&[(0.0, 1.0, "wave"), (1.0, 2.5, "nod"), (2.5, 2.5, "shrug")]))
        .await
        .unwrap();

    assert_eq!(summary.dispatched, 3);
    assert_eq!(actuator.gestures(), vec!["wave", "nod", "shrug"]);
    let durations: Vec<f64> = actuator.dispatches().iter().map(|d| d.duration).collect();
    assert_eq!(durations, vec![1.0, 1.5, 0.0]);
    assert_eq!(executor.state(), PlaybackState::Finished);
}

#[tokio::test(start_paused = true)]
async fn test_run_asFastAsPossible_shouldNotWaitForPlanTime() {
    let actuator = RecordingActuator::new();
    let mut executor = PlaybackExecutor::new(actuator.clone(), PlaybackMode::AsFastAsPossible);

    executor.run(&plan(&[(0.0, 5.0, "wave"), (60.0, 65.0, "nod")])).await.unwrap();

    let dispatches = actuator.dispatches();
    assert_eq!(dispatches[1].at - dispatches[0].at, Duration::ZERO);
}

#[tokio::test(start_paused = true)]
async fn test_run_realTime_shouldNeverDispatchEarly() {
    let actuator = RecordingActuator::new();
    let mut executor = PlaybackExecutor::new(actuator.clone(), PlaybackMode::RealTime);

    executor.run(&plan(&[(0.0, 1.0, "wave"), (1.0, 2.0, "nod")])).await.unwrap();

    let dispatches = actuator.dispatches();
    assert_eq!(dispatches.len(), 2);
    assert!(dispatches[1].at - dispatches[0].at >= Duration::from_secs(1));
}

#[tokio::test(start_paused = true)]
async fn test_run_realTime_shouldAnchorToFirstEventStart() {
    let actuator = RecordingActuator::new();
    let mut executor = PlaybackExecutor::new(actuator.clone(), PlaybackMode::RealTime);
    let started = tokio::time::Instant::now();

    let summary = executor
        .run(&plan(&[(10.0, 10.5, "wave"), (12.0, 12.0, "nod"), (13.0, 14.0, "shrug")]))
        .await
        .unwrap();

    let offsets: Vec<Duration> = actuator.dispatches().iter().map(|d| d.at - started).collect();
    assert_at(offsets[0], Duration::ZERO);
    assert_at(offsets[1], Duration::from_secs(2));
    assert_at(offsets[2], Duration::from_secs(3));
    // The last event still holds for its duration
    assert_at(summary.elapsed, Duration::from_secs(4));
}

#[tokio::test(start_paused = true)]
async fn test_run_realTime_withOverlappingEvents_shouldDispatchLateNotEarly() {
    let actuator = RecordingActuator::new();
    let mut executor = PlaybackExecutor::new(actuator.clone(), PlaybackMode::RealTime);
    let started = tokio::time::Instant::now();

    // The first hold runs past the second event's start
    executor.run(&plan(&[(0.0, 2.0, "wave"), (1.0, 1.5, "nod")])).await.unwrap();

    let dispatches = actuator.dispatches();
    assert_at(dispatches[1].at - started, Duration::from_secs(2));
}

#[tokio::test]
async fn test_run_withFailingActuator_shouldStopAtFailure() {
    let actuator = RecordingActuator::failing_at(1);
    let mut executor = PlaybackExecutor::new(actuator.clone(), PlaybackMode::AsFastAsPossible);

    let result = executor
        .run(&plan(&[(0.0, 1.0, "wave"), (1.0, 2.0, "nod"), (2.0, 3.0, "shrug")]))
        .await;

    match result {
        Err(PlaybackError::Actuator {
            index,
            source: ActuatorError::DispatchFailed { gesture, .. },
        }) => {
            assert_eq!(index, 1);
            assert_eq!(gesture, "nod");
        }
        other => panic!("expected an actuator error, got {:?}", other),
    }
    assert_eq!(actuator.gestures(), vec!["wave"]);
    assert_eq!(executor.state(), PlaybackState::Finished);
}

#[tokio::test(start_paused = true)]
async fn test_run_realTime_withUnrepresentableOffset_shouldFailWithInvalidTiming() {
    let actuator = RecordingActuator::new();
    let mut executor = PlaybackExecutor::new(actuator.clone(), PlaybackMode::RealTime);

    let result = executor.run(&plan(&[(0.0, 0.0, "wave"), (1e300, 1e300, "nod")])).await;

    match result {
        Err(PlaybackError::InvalidTiming { index, seconds }) => {
            assert_eq!(index, 1);
            assert_eq!(seconds, 1e300);
        }
        other => panic!("expected an invalid timing error, got {:?}", other),
    }
    assert_eq!(actuator.gestures(), vec!["wave"]);
    assert_eq!(executor.state(), PlaybackState::Finished);
}

#[tokio::test(start_paused = true)]
async fn test_run_realTime_withUnrepresentableHold_shouldFailAfterDispatch() {
    let actuator = RecordingActuator::new();
    let mut executor = PlaybackExecutor::new(actuator.clone(), PlaybackMode::RealTime);

    let result = executor
        .run(&plan(&[(0.0, f64::MAX, "wave"), (1.0, 2.0, "nod")]))
        .await;

    assert!(matches!(result, Err(PlaybackError::InvalidTiming { index: 0, .. })));
    assert_eq!(actuator.count(), 1);
    assert_eq!(executor.state(), PlaybackState::Finished);
}

#[tokio::test]
async fn test_run_asFastAsPossible_withHugeTimes_shouldIgnoreThem() {
    let actuator = RecordingActuator::new();
    let mut executor = PlaybackExecutor::new(actuator.clone(), PlaybackMode::AsFastAsPossible);

    let summary = executor
        .run(&plan(&[(0.0, f64::MAX, "wave"), (1e300, 1e300, "nod")]))
        .await
        .unwrap();

    assert_eq!(summary.dispatched, 2);
}

#[tokio::test]
async fn test_run_withEmptyPlan_shouldFinishWithoutDispatching() {
    let actuator = RecordingActuator::new();
    let mut executor = PlaybackExecutor::new(actuator.clone(), PlaybackMode::RealTime);
    assert_eq!(executor.state(), PlaybackState::NotStarted);

    let summary = executor.run(&AnimationPlan::new()).await.unwrap();

    assert_eq!(summary.dispatched, 0);
    assert_eq!(actuator.count(), 0);
    assert_eq!(executor.state(), PlaybackState::Finished);
}

#[tokio::test]
async fn test_run_calledTwice_shouldRejectSecondRun() {
    let mut executor = PlaybackExecutor::new(RecordingActuator::new(), PlaybackMode::AsFastAsPossible);
    let plan = plan(&[(0.0, 1.0, "wave")]);

    executor.run(&plan).await.unwrap();
    let second = executor.run(&plan).await;

    assert!(matches!(second, Err(PlaybackError::AlreadyStarted)));
    assert_eq!(executor.actuator().count(), 1);
}

#[tokio::test]
async fn test_virtualRobot_run_shouldSucceed() {
    let mut executor = PlaybackExecutor::new(VirtualRobot::new(), PlaybackMode::AsFastAsPossible);
    let summary = executor.run(&plan(&[(0.0, 0.5, "wave")])).await.unwrap();
    assert_eq!(summary.dispatched, 1);
}

#[test]
fn test_playbackMode_fromRealtimeFlag_shouldMapFlag() {
    assert_eq!(PlaybackMode::from_realtime_flag(true), PlaybackMode::RealTime);
    assert_eq!(PlaybackMode::from_realtime_flag(false), PlaybackMode::AsFastAsPossible);
    assert_eq!(PlaybackMode::default(), PlaybackMode::AsFastAsPossible);
}

#[test]
fn test_virtualRobot_formatGesture_shouldMatchConsoleLayout() {
    assert_eq!(
        VirtualRobot::format_gesture("thumbs_up", 1.5),
        "[Robot] thumbs_up        for 1.50s"
    );
}
