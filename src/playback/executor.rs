/*!
 * Timed playback of an animation plan.
 *
 * The executor walks the plan in order and hands every event to an actuator.
 * In real-time mode the wall clock is anchored once, at the first event, and
 * each event waits for `anchor + (event.start - first.start)` before it is
 * dispatched, then holds for the event's duration. Drift is never corrected
 * and a late dispatch is never pulled earlier.
 */

use std::time::Duration;

use log::{debug, info};
use tokio::time::{sleep, sleep_until, Instant};

use crate::errors::PlaybackError;
use crate::playback::actuator::Actuator;
use crate::timeline::plan::AnimationPlan;

/// Pacing of a playback run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackMode {
    /// Dispatch everything back to back
    #[default]
    AsFastAsPossible,
    /// Align dispatches with the plan's timestamps
    RealTime,
}

impl PlaybackMode {
    pub fn from_realtime_flag(realtime: bool) -> Self {
        if realtime {
            Self::RealTime
        } else {
            Self::AsFastAsPossible
        }
    }
}

/// Lifecycle of an executor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    NotStarted,
    Running,
    Finished,
}

/// What a completed run did
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackSummary {
    /// Number of events handed to the actuator
    pub dispatched: usize,
    /// Wall-clock time spent in the run
    pub elapsed: Duration,
}

/// Plays one plan against one actuator
#[derive(Debug)]
pub struct PlaybackExecutor<A: Actuator> {
    actuator: A,
    mode: PlaybackMode,
    state: PlaybackState,
}

impl<A: Actuator> PlaybackExecutor<A> {
    pub fn new(actuator: A, mode: PlaybackMode) -> Self {
        Self {
            actuator,
            mode,
            state: PlaybackState::NotStarted,
        }
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn mode(&self) -> PlaybackMode {
        self.mode
    }

    pub fn actuator(&self) -> &A {
        &self.actuator
    }

    /// Play `plan` once. Any actuator error stops the run and is returned.
    pub async fn run(&mut self, plan: &AnimationPlan) -> Result<PlaybackSummary, PlaybackError> {
        if self.state != PlaybackState::NotStarted {
            return Err(PlaybackError::AlreadyStarted);
        }

        let anchor = Instant::now();
        let Some(first) = plan.events().first() else {
            info!("Empty plan, nothing to play");
            self.state = PlaybackState::Finished;
            return Ok(PlaybackSummary {
                dispatched: 0,
                elapsed: Duration::ZERO,
            });
        };

        self.state = PlaybackState::Running;
        let result = self.play(plan, first.start, anchor).await;
        self.state = PlaybackState::Finished;

        let dispatched = result?;
        let elapsed = anchor.elapsed();
        debug!("Played {} event(s) in {:.2}s", dispatched, elapsed.as_secs_f64());

        Ok(PlaybackSummary { dispatched, elapsed })
    }

    async fn play(&self, plan: &AnimationPlan, origin: f64, anchor: Instant) -> Result<usize, PlaybackError> {
        let mut dispatched = 0;

        for (index, event) in plan.iter().enumerate() {
            let duration = event.duration();

            if self.mode == PlaybackMode::RealTime {
                let seconds = (event.start - origin).max(0.0);
                let target = anchor
                    .checked_add(seconds_to_duration(index, seconds)?)
                    .ok_or(PlaybackError::InvalidTiming { index, seconds })?;
                // sleep_until returns at once for instants already past
                sleep_until(target).await;
            }

            self.actuator
                .perform(&event.gesture, duration)
                .await
                .map_err(|source| PlaybackError::Actuator { index, source })?;
            dispatched += 1;

            if self.mode == PlaybackMode::RealTime && duration > 0.0 {
                sleep(seconds_to_duration(index, duration)?).await;
            }
        }

        Ok(dispatched)
    }
}

fn seconds_to_duration(index: usize, seconds: f64) -> Result<Duration, PlaybackError> {
    Duration::try_from_secs_f64(seconds).map_err(|_| PlaybackError::InvalidTiming { index, seconds })
}
