/*!
 * # gesture-planner - Speech-synchronized robot gestures
 *
 * A Rust library that turns a timed speech transcript into a timeline of
 * gesture commands and plays that timeline on a robot.
 *
 * ## Features
 *
 * - Gesture vocabulary built from loosely-keyed JSON datasets
 * - Greedy longest-phrase matching of spoken words against the vocabulary
 * - Optional trained classifier for words the vocabulary does not cover
 * - Even time allocation per word with a minimum gesture duration
 * - Playback as fast as possible or paced to the wall clock
 * - JSON and SRT transcripts
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `dataset`: Dataset normalization and vocabulary construction
 * - `transcript`: Transcript loading
 * - `timeline`: Timeline construction:
 *   - `timeline::tokenizer`: Word tokens
 *   - `timeline::lexicon`: Phrase matching
 *   - `timeline::resolver`: Classifier fallback for unmatched words
 *   - `timeline::allocator`: Time slots, minimum duration and merging
 *   - `timeline::builder`: Per-segment orchestration
 *   - `timeline::plan`: Gesture events and plan persistence
 * - `classifier`: Classifier capability, naive Bayes model and training
 * - `playback`: Actuators and the playback executor
 * - `file_utils`: File system operations
 * - `app_controller`: Main application controller
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod file_utils;
pub mod dataset;
pub mod transcript;
pub mod timeline;
pub mod classifier;
pub mod playback;
pub mod app_controller;
pub mod errors;

// Re-export main types for easier usage
pub use app_config::Config;
pub use dataset::{DatasetRow, Vocabulary};
pub use transcript::TranscriptSegment;
pub use timeline::{build_timeline, AnimationPlan, GestureEvent, TimelineBuilder};
pub use classifier::{ClassifierAvailability, GestureClassifier, GestureModel};
pub use playback::{Actuator, PlaybackExecutor, PlaybackMode, VirtualRobot};
pub use errors::{AppError, ClassifierError, DatasetError, PlaybackError, TimelineError, TranscriptError};
