/*!
 * Recording actuator for testing playback.
 *
 * - `RecordingActuator::new()` - Records every dispatch and always succeeds
 * - `RecordingActuator::failing_at(n)` - Fails on the n-th dispatch (0-based)
 */

use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::time::Instant;

use crate::errors::ActuatorError;
use crate::playback::actuator::Actuator;

/// One recorded actuator call
#[derive(Debug, Clone)]
pub struct Dispatch {
    /// Gesture label
    pub gesture: String,
    /// Requested duration in seconds
    pub duration: f64,
    /// Runtime clock reading when the call arrived
    pub at: Instant,
}

/// Actuator that remembers what it was asked to do
#[derive(Debug, Clone, Default)]
pub struct RecordingActuator {
    /// Shared record, visible through clones
    dispatches: Arc<Mutex<Vec<Dispatch>>>,
    /// Dispatch index that fails, if any
    fail_at: Option<usize>,
}

impl RecordingActuator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an actuator whose `index`-th dispatch fails
    pub fn failing_at(index: usize) -> Self {
        Self {
            fail_at: Some(index),
            ..Self::default()
        }
    }

    /// Snapshot of the recorded dispatches
    pub fn dispatches(&self) -> Vec<Dispatch> {
        self.dispatches.lock().clone()
    }

    /// Recorded gesture labels, in dispatch order
    pub fn gestures(&self) -> Vec<String> {
        self.dispatches.lock().iter().map(|d| d.gesture.clone()).collect()
    }

    pub fn count(&self) -> usize {
        self.dispatches.lock().len()
    }
}

#[async_trait]
impl Actuator for RecordingActuator {
    async fn perform(&self, gesture: &str, duration: f64) -> Result<(), ActuatorError> {
        let mut dispatches = self.dispatches.lock();
        if self.fail_at == Some(dispatches.len()) {
            return Err(ActuatorError::DispatchFailed {
                gesture: gesture.to_string(),
                message: "simulated actuator fault".to_string(),
            });
        }
        dispatches.push(Dispatch {
            gesture: gesture.to_string(),
            duration,
            at: Instant::now(),
        });
        Ok(())
    }
}
