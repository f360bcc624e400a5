/*!
 * Gesture dataset loading and vocabulary construction.
 *
 * A dataset is a JSON array of loosely-keyed rows. Each row is normalized into a
 * `DatasetRow` (token, gesture, weight); the vocabulary keeps, for every
 * lower-cased token, the gesture of its highest-weighted row.
 */

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use log::debug;
use serde_json::{Map, Value};

use crate::errors::DatasetError;
use crate::file_utils::FileManager;

/// Accepted key spellings for the token column
const TOKEN_KEYS: &[&str] = &["token", "word", "phrase", "text"];

/// Accepted key spellings for the gesture column
const GESTURE_KEYS: &[&str] = &["gesture", "label", "class", "action"];

/// Accepted key spellings for the weight column
const WEIGHT_KEYS: &[&str] = &["weight", "score", "prior"];

/// Weight given to rows that carry none
const DEFAULT_WEIGHT: f64 = 1.0;

/// One normalized dataset row
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetRow {
    /// Word or phrase, trimmed but with its original casing
    pub token: String,
    /// Gesture label, trimmed
    pub gesture: String,
    /// Priority of this row when several rows share a token
    pub weight: f64,
}

impl DatasetRow {
    pub fn new(token: &str, gesture: &str, weight: f64) -> Self {
        Self {
            token: token.to_string(),
            gesture: gesture.to_string(),
            weight,
        }
    }
}

/// Load and normalize a dataset file
pub fn load_dataset<P: AsRef<Path>>(path: P) -> Result<Vec<DatasetRow>> {
    let path = path.as_ref();
    let content = FileManager::read_to_string(path)?;
    let rows = parse_dataset(&content)
        .with_context(|| format!("Failed to load dataset: {:?}", path))?;
    debug!("Loaded {} dataset rows from {:?}", rows.len(), path);
    Ok(rows)
}

/// Parse and normalize dataset JSON; any invalid row fails the whole load
pub fn parse_dataset(content: &str) -> Result<Vec<DatasetRow>, DatasetError> {
    let value: Value = serde_json::from_str(content)
        .map_err(|e| DatasetError::ParseError(e.to_string()))?;

    let Value::Array(entries) = value else {
        return Err(DatasetError::NotAnArray);
    };

    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| normalize_entry(index, entry))
        .collect()
}

/// Normalize one raw row into a `DatasetRow`
pub fn normalize_entry(index: usize, entry: &Value) -> Result<DatasetRow, DatasetError> {
    let invalid = || DatasetError::InvalidRow {
        index,
        row: entry.to_string(),
    };

    let Value::Object(map) = entry else {
        return Err(invalid());
    };

    let token = find_alias(map, TOKEN_KEYS)
        .and_then(stringify)
        .ok_or_else(invalid)?;
    let gesture = find_alias(map, GESTURE_KEYS)
        .and_then(stringify)
        .ok_or_else(invalid)?;

    if token.is_empty() || gesture.is_empty() {
        return Err(invalid());
    }

    let weight = match find_alias(map, WEIGHT_KEYS) {
        None | Some(Value::Null) => DEFAULT_WEIGHT,
        Some(Value::Number(n)) => n.as_f64().ok_or_else(|| DatasetError::InvalidWeight {
            index,
            row: entry.to_string(),
        })?,
        Some(Value::String(s)) => s.trim().parse::<f64>().map_err(|_| DatasetError::InvalidWeight {
            index,
            row: entry.to_string(),
        })?,
        Some(_) => {
            return Err(DatasetError::InvalidWeight {
                index,
                row: entry.to_string(),
            })
        }
    };

    Ok(DatasetRow {
        token,
        gesture,
        weight,
    })
}

// First key (in document order) whose lower-cased name is one of the aliases
fn find_alias<'a>(map: &'a Map<String, Value>, aliases: &[&str]) -> Option<&'a Value> {
    map.iter()
        .find(|(key, _)| aliases.contains(&key.to_lowercase().as_str()))
        .map(|(_, value)| value)
}

fn stringify(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.trim().to_string()),
        other => Some(other.to_string().trim().to_string()),
    }
}

/// Immutable phrase → gesture lookup used by the lexicon matcher
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Vocabulary {
    entries: HashMap<String, String>,
}

impl Vocabulary {
    /// Reduce dataset rows to one gesture per lower-cased token.
    ///
    /// The highest weight wins; on equal weights the first row seen is kept.
    pub fn from_rows(rows: &[DatasetRow]) -> Self {
        let mut best: HashMap<String, (f64, &str)> = HashMap::new();

        for row in rows {
            let key = row.token.to_lowercase();
            let replace = best
                .get(&key)
                .is_none_or(|(weight, _)| row.weight > *weight);
            if replace {
                best.insert(key, (row.weight, row.gesture.as_str()));
            }
        }

        let entries = best
            .into_iter()
            .map(|(token, (_, gesture))| (token, gesture.to_string()))
            .collect();

        Self { entries }
    }

    /// Gesture for an exact (already lower-cased) phrase
    pub fn get(&self, phrase: &str) -> Option<&str> {
        self.entries.get(phrase).map(String::as_str)
    }

    pub fn contains(&self, phrase: &str) -> bool {
        self.entries.contains_key(phrase)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Vocabulary {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into().to_lowercase(), v.into()))
                .collect(),
        }
    }
}

/// Convenience wrapper matching the loader's naming
pub fn build_vocab(rows: &[DatasetRow]) -> Vocabulary {
    Vocabulary::from_rows(rows)
}
