/*!
 * Time allocation for one transcript segment.
 *
 * The segment interval is cut into equal per-token slots. Each slot is then
 * stretched to the minimum gesture duration on its own, even when that makes
 * it overlap the next slot or run past the segment end. Touching slots with
 * the same gesture are merged in a single forward pass, and every event is
 * clamped to `start >= 0`, `end >= start`.
 */

use crate::timeline::plan::GestureEvent;

/// Minimum dwell time of a gesture in seconds
pub const MIN_GESTURE_DURATION: f64 = 0.25;

/// Floor for a segment's width, keeps the per-token step non-zero
pub const MIN_SEGMENT_WIDTH: f64 = 0.001;

/// Maximum gap between two events that still counts as touching
pub const MERGE_TOLERANCE: f64 = 1e-6;

/// Tunables of the allocator
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AllocatorSettings {
    pub min_gesture_duration: f64,
    pub min_segment_width: f64,
    pub merge_tolerance: f64,
}

impl Default for AllocatorSettings {
    fn default() -> Self {
        Self {
            min_gesture_duration: MIN_GESTURE_DURATION,
            min_segment_width: MIN_SEGMENT_WIDTH,
            merge_tolerance: MERGE_TOLERANCE,
        }
    }
}

/// Split `[start, end)` into `max(1, token_count)` equal consecutive slots
pub fn distribute_times(start: f64, end: f64, token_count: usize, min_width: f64) -> Vec<(f64, f64)> {
    let n = token_count.max(1);
    let total = (end - start).max(min_width);
    let step = total / n as f64;

    (0..n)
        .map(|i| (start + i as f64 * step, start + (i + 1) as f64 * step))
        .collect()
}

/// Pair slots with gestures, stretching short slots to `min_duration`
pub fn raw_events(slots: &[(f64, f64)], gestures: &[String], min_duration: f64) -> Vec<GestureEvent> {
    slots
        .iter()
        .zip(gestures)
        .map(|(&(start, end), gesture)| {
            let end = if end - start < min_duration {
                start + min_duration
            } else {
                end
            };
            GestureEvent::new(start, end, gesture)
        })
        .collect()
}

/// Merge directly adjacent same-gesture events whose boundaries touch
pub fn merge_adjacent(events: Vec<GestureEvent>, tolerance: f64) -> Vec<GestureEvent> {
    let mut merged: Vec<GestureEvent> = Vec::with_capacity(events.len());

    for event in events {
        match merged.last_mut() {
            Some(last) if last.gesture == event.gesture && (event.start - last.end).abs() < tolerance => {
                last.end = event.end;
            }
            _ => merged.push(event),
        }
    }

    merged
}

/// Apply the time invariants to every event
pub fn clamp_events(events: &mut [GestureEvent]) {
    for event in events {
        event.clamp();
    }
}

/// Full allocation for one segment: slots, stretch, merge, clamp
pub fn allocate(start: f64, end: f64, gestures: &[String], settings: &AllocatorSettings) -> Vec<GestureEvent> {
    if gestures.is_empty() {
        return Vec::new();
    }

    let slots = distribute_times(start, end, gestures.len(), settings.min_segment_width);
    let raw = raw_events(&slots, gestures, settings.min_gesture_duration);
    let mut merged = merge_adjacent(raw, settings.merge_tolerance);
    clamp_events(&mut merged);
    merged
}
