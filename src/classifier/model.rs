/*!
 * Multinomial naive Bayes gesture model.
 *
 * Features are the word unigrams and bigrams of a phrase. Counts are smoothed
 * additively; scores are summed log-probabilities, so only features seen in
 * training contribute. A phrase with no known feature gets the label with the
 * highest prior.
 */

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::classifier::GestureClassifier;
use crate::errors::ClassifierError;
use crate::file_utils::FileManager;
use crate::timeline::tokenizer;

/// Version written into persisted models
const MODEL_FORMAT_VERSION: u32 = 1;

/// Trained gesture model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GestureModel {
    format_version: u32,
    /// Labels in lexicographic order
    labels: Vec<String>,
    /// Log prior per label
    log_priors: Vec<f64>,
    /// Feature → column index
    features: BTreeMap<String, usize>,
    /// Log likelihood per label, per feature column
    log_likelihoods: Vec<Vec<f64>>,
}

impl GestureModel {
    /// Fit on `(phrase, gesture)` samples with additive smoothing `alpha`
    pub fn fit(samples: &[(String, String)], alpha: f64) -> Self {
        let labels: Vec<String> = samples
            .iter()
            .map(|(_, label)| label.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let label_index: BTreeMap<&str, usize> = labels
            .iter()
            .enumerate()
            .map(|(i, label)| (label.as_str(), i))
            .collect();

        let sample_features: Vec<Vec<String>> = samples
            .iter()
            .map(|(phrase, _)| extract_features(phrase))
            .collect();

        let mut features = BTreeMap::new();
        for name in sample_features.iter().flatten() {
            let next = features.len();
            features.entry(name.clone()).or_insert(next);
        }

        let mut label_counts = vec![0usize; labels.len()];
        let mut feature_counts = vec![vec![0.0f64; features.len()]; labels.len()];
        for ((_, label), names) in samples.iter().zip(&sample_features) {
            let class = label_index[label.as_str()];
            label_counts[class] += 1;
            for name in names {
                feature_counts[class][features[name]] += 1.0;
            }
        }

        let total = samples.len().max(1) as f64;
        let log_priors = label_counts
            .iter()
            .map(|&count| (count as f64 / total).ln())
            .collect();

        let vocabulary_size = features.len() as f64;
        let log_likelihoods = feature_counts
            .iter()
            .map(|counts| {
                let class_total: f64 = counts.iter().sum();
                let denominator = class_total + alpha * vocabulary_size;
                counts
                    .iter()
                    .map(|count| ((count + alpha) / denominator).ln())
                    .collect()
            })
            .collect();

        Self {
            format_version: MODEL_FORMAT_VERSION,
            labels,
            log_priors,
            features,
            log_likelihoods,
        }
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn feature_count(&self) -> usize {
        self.features.len()
    }

    /// Most likely gesture for one phrase
    pub fn predict_one(&self, phrase: &str) -> &str {
        let columns: Vec<usize> = extract_features(phrase)
            .iter()
            .filter_map(|name| self.features.get(name).copied())
            .collect();

        let mut best: Option<(usize, f64)> = None;
        for (class, prior) in self.log_priors.iter().enumerate() {
            let score = prior
                + columns
                    .iter()
                    .map(|&column| self.log_likelihoods[class][column])
                    .sum::<f64>();
            // strict comparison keeps the first label on ties
            if best.is_none_or(|(_, best_score)| score > best_score) {
                best = Some((class, score));
            }
        }

        best.map_or("", |(class, _)| self.labels[class].as_str())
    }

    /// Check the internal dimensions of a deserialized model
    pub fn validate(&self) -> Result<(), ClassifierError> {
        if self.format_version != MODEL_FORMAT_VERSION {
            return Err(ClassifierError::Corrupt(format!(
                "unsupported format version {}",
                self.format_version
            )));
        }
        if self.labels.is_empty() {
            return Err(ClassifierError::Corrupt("model has no labels".to_string()));
        }
        if self.log_priors.len() != self.labels.len() || self.log_likelihoods.len() != self.labels.len() {
            return Err(ClassifierError::Corrupt(format!(
                "expected {} label rows, found {} priors and {} likelihood rows",
                self.labels.len(),
                self.log_priors.len(),
                self.log_likelihoods.len()
            )));
        }
        if let Some(row) = self.log_likelihoods.iter().find(|row| row.len() != self.features.len()) {
            return Err(ClassifierError::Corrupt(format!(
                "likelihood row has {} columns, expected {}",
                row.len(),
                self.features.len()
            )));
        }
        if self.features.values().any(|&column| column >= self.features.len()) {
            return Err(ClassifierError::Corrupt("feature column out of range".to_string()));
        }
        Ok(())
    }

    /// Persist the model as pretty JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("Failed to serialize gesture model")?;
        FileManager::write_to_file(path, &json)
    }

    /// Load and validate a persisted model
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ClassifierError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| ClassifierError::LoadFailed(format!("{:?}: {}", path, e)))?;
        let model: Self = serde_json::from_str(&content)
            .map_err(|e| ClassifierError::LoadFailed(format!("{:?}: {}", path, e)))?;
        model.validate()?;
        Ok(model)
    }
}

impl GestureClassifier for GestureModel {
    fn predict(&self, tokens: &[String]) -> Result<Vec<String>, ClassifierError> {
        Ok(tokens.iter().map(|token| self.predict_one(token).to_string()).collect())
    }
}

/// Word unigrams followed by word bigrams
fn extract_features(phrase: &str) -> Vec<String> {
    let words: Vec<String> = tokenizer::tokenize(phrase).collect();
    let bigrams = words.windows(2).map(|pair| format!("{} {}", pair[0], pair[1]));
    words.iter().cloned().chain(bigrams).collect()
}
