use std::path::Path;

use anyhow::{Context, Result};
use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::TranscriptError;
use crate::file_utils::{FileManager, FileType};

// @module: Transcript loading (JSON segment lists and SRT files)

// @const: SRT timestamp regex
static TIMESTAMP_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d{2}):(\d{2}):(\d{2})[,.](\d{3})\s*-->\s*(\d{2}):(\d{2}):(\d{2})[,.](\d{3})").unwrap()
});

// @struct: Timed piece of transcript text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptSegment {
    // @field: Start time in seconds
    pub start: f64,

    // @field: End time in seconds
    pub end: f64,

    // @field: Spoken text
    pub text: String,
}

impl TranscriptSegment {
    pub fn new(start: f64, end: f64, text: &str) -> Self {
        Self {
            start,
            end,
            text: text.to_string(),
        }
    }

    /// Segment length in seconds, never negative
    pub fn duration(&self) -> f64 {
        (self.end - self.start).max(0.0)
    }
}

/// Load a transcript, choosing the parser from the file type
pub fn load_transcript<P: AsRef<Path>>(path: P) -> Result<Vec<TranscriptSegment>> {
    let path = path.as_ref();
    let file_type = FileManager::detect_file_type(path)?;
    let content = FileManager::read_to_string(path)?;

    let segments = match file_type {
        FileType::Subtitle => parse_srt(&content),
        FileType::Json | FileType::Unknown => parse_transcript_json(&content),
    }
    .with_context(|| format!("Failed to load transcript: {:?}", path))?;

    debug!("Loaded {} transcript segments from {:?}", segments.len(), path);
    Ok(segments)
}

/// Parse a JSON array of `{start, end, text}` objects.
///
/// Every entry is checked; the first malformed one fails the whole load.
pub fn parse_transcript_json(content: &str) -> Result<Vec<TranscriptSegment>, TranscriptError> {
    let value: Value = serde_json::from_str(content)
        .map_err(|e| TranscriptError::ParseError(e.to_string()))?;

    let Value::Array(entries) = value else {
        return Err(TranscriptError::NotAnArray);
    };

    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| parse_segment(index, entry))
        .collect()
}

fn parse_segment(index: usize, entry: &Value) -> Result<TranscriptSegment, TranscriptError> {
    let field = |name: &'static str| {
        entry.get(name).ok_or_else(|| TranscriptError::MissingField {
            index,
            field: name,
            segment: entry.to_string(),
        })
    };
    let invalid = |name: &'static str, expected: &'static str| TranscriptError::InvalidField {
        index,
        field: name,
        expected,
        segment: entry.to_string(),
    };

    let start = field("start")?.as_f64().ok_or_else(|| invalid("start", "number"))?;
    let end = field("end")?.as_f64().ok_or_else(|| invalid("end", "number"))?;
    let text = field("text")?.as_str().ok_or_else(|| invalid("text", "string"))?;

    Ok(TranscriptSegment::new(start, end, text))
}

/// Parse SubRip content into transcript segments, sorted by start time
pub fn parse_srt(content: &str) -> Result<Vec<TranscriptSegment>, TranscriptError> {
    let mut segments = Vec::new();

    // State for the cue being read
    let mut current_seq_num: Option<usize> = None;
    let mut current_times: Option<(f64, f64)> = None;
    let mut current_text = String::new();

    let mut flush = |seq_num: Option<usize>, times: Option<(f64, f64)>, text: &mut String| {
        if let (Some(seq_num), Some((start, end))) = (seq_num, times) {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                warn!("Skipping empty subtitle cue {}", seq_num);
            } else {
                segments.push(TranscriptSegment::new(start, end, &trimmed.replace('\n', " ")));
            }
        }
        text.clear();
    };

    for (line_number, line) in content.lines().enumerate() {
        let trimmed = line.trim().trim_start_matches('\u{feff}');

        if trimmed.is_empty() {
            if current_times.is_some() && !current_text.is_empty() {
                flush(current_seq_num.take(), current_times.take(), &mut current_text);
            }
            continue;
        }

        // Sequence number, only when starting a new cue
        if current_seq_num.is_none() && current_text.is_empty() {
            if let Ok(num) = trimmed.parse::<usize>() {
                current_seq_num = Some(num);
                continue;
            }
        }

        if current_seq_num.is_some() && current_times.is_none() {
            if let Some(caps) = TIMESTAMP_REGEX.captures(trimmed) {
                current_times = Some((timestamp_to_secs(&caps, 1), timestamp_to_secs(&caps, 5)));
                continue;
            }
        }

        if current_times.is_some() {
            if !current_text.is_empty() {
                current_text.push('\n');
            }
            current_text.push_str(trimmed);
        } else {
            warn!("Unexpected text at line {} before sequence number or timestamp: {}", line_number + 1, trimmed);
        }
    }

    flush(current_seq_num, current_times, &mut current_text);

    if segments.is_empty() {
        return Err(TranscriptError::EmptySrt);
    }

    segments.sort_by(|a, b| a.start.total_cmp(&b.start));

    let overlap_count = segments
        .windows(2)
        .filter(|pair| pair[0].end > pair[1].start)
        .count();
    if overlap_count > 0 {
        warn!("Found {} overlapping subtitle cues", overlap_count);
    }

    Ok(segments)
}

fn timestamp_to_secs(caps: &regex::Captures, start_idx: usize) -> f64 {
    let part = |offset: usize| -> u64 {
        caps.get(start_idx + offset)
            .map_or(0, |m| m.as_str().parse().unwrap_or(0))
    };
    let millis = (part(0) * 3600 + part(1) * 60 + part(2)) * 1000 + part(3);
    millis as f64 / 1000.0
}
