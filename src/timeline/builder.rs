use log::debug;

use crate::app_config::TimelineConfig;
use crate::classifier::GestureClassifier;
use crate::dataset::Vocabulary;
use crate::errors::TimelineError;
use crate::timeline::allocator::{self, AllocatorSettings};
use crate::timeline::lexicon::{self, MAX_PHRASE_LEN};
use crate::timeline::plan::{AnimationPlan, GestureEvent};
use crate::timeline::resolver::{self, FALLBACK_GESTURE};
use crate::timeline::tokenizer;
use crate::transcript::TranscriptSegment;

/// Turns transcript segments into an animation plan.
///
/// Borrows the vocabulary and the optional classifier for the duration of a
/// build; holds no state between builds.
#[derive(Debug, Clone)]
pub struct TimelineBuilder<'a> {
    vocabulary: &'a Vocabulary,
    classifier: Option<&'a dyn GestureClassifier>,
    max_phrase_len: usize,
    fallback_gesture: String,
    allocator: AllocatorSettings,
}

impl<'a> TimelineBuilder<'a> {
    pub fn new(vocabulary: &'a Vocabulary) -> Self {
        Self {
            vocabulary,
            classifier: None,
            max_phrase_len: MAX_PHRASE_LEN,
            fallback_gesture: FALLBACK_GESTURE.to_string(),
            allocator: AllocatorSettings::default(),
        }
    }

    pub fn with_classifier(mut self, classifier: Option<&'a dyn GestureClassifier>) -> Self {
        self.classifier = classifier;
        self
    }

    pub fn with_config(mut self, config: &TimelineConfig) -> Self {
        self.max_phrase_len = config.max_phrase_len;
        self.fallback_gesture = config.fallback_gesture.clone();
        self.allocator = AllocatorSettings {
            min_gesture_duration: config.min_gesture_duration_secs,
            min_segment_width: config.min_segment_width_secs,
            merge_tolerance: config.merge_tolerance_secs,
        };
        self
    }

    /// Build the plan; segments are processed independently and concatenated
    pub fn build(&self, segments: &[TranscriptSegment]) -> Result<AnimationPlan, TimelineError> {
        let mut plan = AnimationPlan::new();

        for (index, segment) in segments.iter().enumerate() {
            let events = self.build_segment(segment)?;
            if events.is_empty() {
                debug!("Segment {} has no tokens, skipping", index);
                continue;
            }
            debug!("Segment {} -> {} event(s)", index, events.len());
            plan.extend(events);
        }

        Ok(plan)
    }

    /// Events for a single segment; empty when the text has no tokens
    pub fn build_segment(&self, segment: &TranscriptSegment) -> Result<Vec<GestureEvent>, TimelineError> {
        let tokens: Vec<String> = tokenizer::tokenize(&segment.text).collect();
        if tokens.is_empty() {
            return Ok(Vec::new());
        }

        let spans = lexicon::match_phrases_with_limit(&tokens, self.vocabulary, self.max_phrase_len);
        let assigned = lexicon::per_token_gestures(&spans, tokens.len());
        let gestures = resolver::resolve_gestures(&tokens, assigned, self.classifier, &self.fallback_gesture)?;

        Ok(allocator::allocate(segment.start, segment.end, &gestures, &self.allocator))
    }
}

/// Build a plan with default settings
pub fn build_timeline(
    segments: &[TranscriptSegment],
    vocabulary: &Vocabulary,
    classifier: Option<&dyn GestureClassifier>,
) -> Result<AnimationPlan, TimelineError> {
    TimelineBuilder::new(vocabulary)
        .with_classifier(classifier)
        .build(segments)
}
