use async_trait::async_trait;
use std::fmt::Debug;
use std::io::Write;

use crate::errors::ActuatorError;

/// Something that can perform a gesture: a simulated robot, a hardware bridge
#[async_trait]
pub trait Actuator: Send + Sync + Debug {
    /// Perform `gesture` for `duration` seconds
    ///
    /// # Returns
    /// * `Result<(), ActuatorError>` - Ok once the command is handed off, or an error
    async fn perform(&self, gesture: &str, duration: f64) -> Result<(), ActuatorError>;
}

/// Robot stand-in that prints each gesture to stdout
#[derive(Debug, Default)]
pub struct VirtualRobot;

impl VirtualRobot {
    pub fn new() -> Self {
        Self
    }

    /// Line printed for one gesture
    pub fn format_gesture(gesture: &str, duration: f64) -> String {
        format!("[Robot] {:<16} for {:.2}s", gesture, duration)
    }
}

#[async_trait]
impl Actuator for VirtualRobot {
    async fn perform(&self, gesture: &str, duration: f64) -> Result<(), ActuatorError> {
        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "{}", Self::format_gesture(gesture, duration))
            .and_then(|_| stdout.flush())
            .map_err(|e| ActuatorError::DispatchFailed {
                gesture: gesture.to_string(),
                message: e.to_string(),
            })
    }
}
