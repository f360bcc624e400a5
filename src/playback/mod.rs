/*!
 * Playback of animation plans on an actuator.
 *
 * - `actuator`: the `Actuator` trait and the printing `VirtualRobot`
 * - `executor`: as-fast-as-possible and real-time playback
 * - `mock`: a recording actuator for tests
 */

pub mod actuator;
pub mod executor;
pub mod mock;

// Re-export main types
pub use actuator::{Actuator, VirtualRobot};
pub use executor::{PlaybackExecutor, PlaybackMode, PlaybackState, PlaybackSummary};
pub use mock::RecordingActuator;
