/*!
 * Greedy longest-phrase matching of tokens against the vocabulary.
 *
 * At each position the matcher tries the longest phrase first (up to
 * `max_phrase_len` words) and takes the first hit. It never backtracks, so a
 * long match may prevent a better split later on.
 */

use std::ops::Range;

use crate::dataset::Vocabulary;

/// Default longest phrase tried by the matcher, in words
pub const MAX_PHRASE_LEN: usize = 3;

/// A run of tokens and the gesture the vocabulary assigned to it
#[derive(Debug, Clone, PartialEq)]
pub struct PhraseSpan {
    /// Gesture label, `None` for a single unmatched token
    pub gesture: Option<String>,
    /// Token indices covered, end exclusive
    pub range: Range<usize>,
}

impl PhraseSpan {
    pub fn matched(gesture: &str, range: Range<usize>) -> Self {
        Self {
            gesture: Some(gesture.to_string()),
            range,
        }
    }

    pub fn unmatched(index: usize) -> Self {
        Self {
            gesture: None,
            range: index..index + 1,
        }
    }

    pub fn is_matched(&self) -> bool {
        self.gesture.is_some()
    }
}

/// Match with the default phrase length
pub fn match_phrases(tokens: &[String], vocabulary: &Vocabulary) -> Vec<PhraseSpan> {
    match_phrases_with_limit(tokens, vocabulary, MAX_PHRASE_LEN)
}

/// Partition `tokens` into matched and unmatched spans, left to right
pub fn match_phrases_with_limit(
    tokens: &[String],
    vocabulary: &Vocabulary,
    max_phrase_len: usize,
) -> Vec<PhraseSpan> {
    let max_phrase_len = max_phrase_len.max(1);
    let mut spans = Vec::new();
    let mut i = 0;

    while i < tokens.len() {
        let longest = max_phrase_len.min(tokens.len() - i);
        let hit = (1..=longest).rev().find_map(|len| {
            let phrase = tokens[i..i + len].join(" ");
            vocabulary.get(&phrase).map(|gesture| (gesture, len))
        });

        match hit {
            Some((gesture, len)) => {
                spans.push(PhraseSpan::matched(gesture, i..i + len));
                i += len;
            }
            None => {
                spans.push(PhraseSpan::unmatched(i));
                i += 1;
            }
        }
    }

    spans
}

/// Spread span gestures onto individual token slots
pub fn per_token_gestures(spans: &[PhraseSpan], token_count: usize) -> Vec<Option<String>> {
    let mut gestures = vec![None; token_count];
    for span in spans {
        if let Some(gesture) = &span.gesture {
            for slot in &mut gestures[span.range.clone()] {
                *slot = Some(gesture.clone());
            }
        }
    }
    gestures
}
