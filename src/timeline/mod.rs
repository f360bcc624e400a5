/*!
 * Timeline construction: transcript segments in, animation plan out.
 *
 * Each segment flows through:
 * - `tokenizer`: lower-cased word tokens
 * - `lexicon`: greedy longest-phrase vocabulary matches
 * - `resolver`: classifier (or fallback) labels for unmatched tokens
 * - `allocator`: per-token time slots, minimum duration, merging, clamping
 *
 * `builder` runs the steps per segment and concatenates the results; `plan`
 * holds the resulting events and their JSON persistence.
 */

pub mod tokenizer;
pub mod lexicon;
pub mod resolver;
pub mod allocator;
pub mod builder;
pub mod plan;

// Re-export main types
pub use builder::{build_timeline, TimelineBuilder};
pub use plan::{AnimationPlan, GestureEvent};
pub use lexicon::PhraseSpan;
