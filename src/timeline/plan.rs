/*!
 * Gesture events and the animation plan they form.
 *
 * The persisted form is a single JSON object:
 * `{"animation_plan": [{"start": 0.0, "end": 0.5, "gesture": "wave"}, ...]}`.
 */

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::file_utils::FileManager;

/// One timed gesture command
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GestureEvent {
    /// Start time in seconds
    pub start: f64,
    /// End time in seconds
    pub end: f64,
    /// Gesture label
    pub gesture: String,
}

impl GestureEvent {
    pub fn new(start: f64, end: f64, gesture: &str) -> Self {
        Self {
            start,
            end,
            gesture: gesture.to_string(),
        }
    }

    /// Length in seconds, never negative
    pub fn duration(&self) -> f64 {
        (self.end - self.start).max(0.0)
    }

    /// Enforce `start >= 0` and `end >= start` without failing
    pub fn clamp(&mut self) {
        if self.end < self.start {
            self.end = self.start;
        }
        self.start = self.start.max(0.0);
        self.end = self.end.max(self.start);
    }
}

/// Ordered list of gesture events covering a transcript
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnimationPlan {
    #[serde(rename = "animation_plan")]
    events: Vec<GestureEvent>,
}

impl AnimationPlan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: GestureEvent) {
        self.events.push(event);
    }

    pub fn extend<I: IntoIterator<Item = GestureEvent>>(&mut self, events: I) {
        self.events.extend(events);
    }

    pub fn events(&self) -> &[GestureEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, GestureEvent> {
        self.events.iter()
    }

    /// Seconds between the first start and the last end
    pub fn total_duration(&self) -> f64 {
        let Some(first) = self.events.first() else {
            return 0.0;
        };
        let last_end = self.events.iter().map(|e| e.end).fold(first.end, f64::max);
        (last_end - first.start).max(0.0)
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize animation plan")
    }

    pub fn from_json(content: &str) -> Result<Self> {
        serde_json::from_str(content).context("Failed to parse animation plan")
    }

    /// Persist the plan as pretty JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        FileManager::write_to_file(&path, &self.to_json()?)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = FileManager::read_to_string(path)?;
        Self::from_json(&content).with_context(|| format!("Invalid animation plan file: {:?}", path))
    }
}

impl From<Vec<GestureEvent>> for AnimationPlan {
    fn from(events: Vec<GestureEvent>) -> Self {
        Self { events }
    }
}

impl IntoIterator for AnimationPlan {
    type Item = GestureEvent;
    type IntoIter = std::vec::IntoIter<GestureEvent>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.into_iter()
    }
}

impl<'a> IntoIterator for &'a AnimationPlan {
    type Item = &'a GestureEvent;
    type IntoIter = std::slice::Iter<'a, GestureEvent>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}
