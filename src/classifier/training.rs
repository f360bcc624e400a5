use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use log::{debug, info};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::app_config::TrainingConfig;
use crate::classifier::model::GestureModel;
use crate::dataset::DatasetRow;
use crate::errors::TrainingError;

/// Message reported when the dataset cannot support a statistical model
pub const DATASET_TOO_SMALL: &str = "Dataset too small for ML; use rule-based only.";

/// Result of a training run
#[derive(Debug)]
pub enum TrainingOutcome {
    /// Not enough rows or gestures; nothing was trained
    TooSmall {
        message: String,
    },
    /// A model fitted on the training split and its held-out evaluation
    Trained {
        model: GestureModel,
        report: TrainingReport,
    },
}

/// Per-gesture evaluation figures
#[derive(Debug, Clone, PartialEq)]
pub struct ClassMetrics {
    pub gesture: String,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    pub support: usize,
}

/// Held-out evaluation of a trained model
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingReport {
    pub accuracy: f64,
    pub classes: Vec<ClassMetrics>,
    pub train_size: usize,
    pub test_size: usize,
}

impl TrainingReport {
    /// Compare predictions against the true labels
    pub fn evaluate(truth: &[String], predicted: &[String], train_size: usize) -> Self {
        let gestures: BTreeSet<&String> = truth.iter().chain(predicted).collect();
        let pairs: Vec<(&String, &String)> = truth.iter().zip(predicted).collect();

        let classes = gestures
            .into_iter()
            .map(|gesture| {
                let tp = pairs.iter().filter(|(t, p)| *t == gesture && *p == gesture).count();
                let predicted_count = pairs.iter().filter(|(_, p)| *p == gesture).count();
                let support = pairs.iter().filter(|(t, _)| *t == gesture).count();
                let precision = ratio(tp, predicted_count);
                let recall = ratio(tp, support);
                let f1 = if precision + recall > 0.0 {
                    2.0 * precision * recall / (precision + recall)
                } else {
                    0.0
                };
                ClassMetrics {
                    gesture: gesture.clone(),
                    precision,
                    recall,
                    f1,
                    support,
                }
            })
            .collect();

        let correct = pairs.iter().filter(|(t, p)| t == p).count();

        Self {
            accuracy: ratio(correct, pairs.len()),
            classes,
            train_size,
            test_size: pairs.len(),
        }
    }

    /// Unweighted mean of (precision, recall, f1) over gestures
    pub fn macro_average(&self) -> (f64, f64, f64) {
        if self.classes.is_empty() {
            return (0.0, 0.0, 0.0);
        }
        let n = self.classes.len() as f64;
        let sum = |f: fn(&ClassMetrics) -> f64| self.classes.iter().map(f).sum::<f64>() / n;
        (sum(|c| c.precision), sum(|c| c.recall), sum(|c| c.f1))
    }
}

impl fmt::Display for TrainingReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self
            .classes
            .iter()
            .map(|c| c.gesture.len())
            .chain(std::iter::once("macro avg".len()))
            .max()
            .unwrap_or(0);

        writeln!(f, "{:>width$}  {:>9} {:>9} {:>9} {:>9}", "", "precision", "recall", "f1-score", "support")?;
        writeln!(f)?;
        for class in &self.classes {
            writeln!(
                f,
                "{:>width$}  {:>9.2} {:>9.2} {:>9.2} {:>9}",
                class.gesture, class.precision, class.recall, class.f1, class.support
            )?;
        }
        writeln!(f)?;
        writeln!(f, "{:>width$}  {:>9} {:>9} {:>9.2} {:>9}", "accuracy", "", "", self.accuracy, self.test_size)?;
        let (precision, recall, f1) = self.macro_average();
        write!(
            f,
            "{:>width$}  {:>9.2} {:>9.2} {:>9.2} {:>9}",
            "macro avg", precision, recall, f1, self.test_size
        )
    }
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

/// Per-gesture seeded shuffle; returns (train, test) row indices, ascending
pub fn stratified_split(
    labels: &[String],
    test_size: f64,
    seed: u64,
) -> Result<(Vec<usize>, Vec<usize>), TrainingError> {
    if !(test_size > 0.0 && test_size < 1.0) {
        return Err(TrainingError::InvalidTestSize(test_size));
    }

    let mut groups: BTreeMap<&str, Vec<usize>> = BTreeMap::new();
    for (index, label) in labels.iter().enumerate() {
        groups.entry(label.as_str()).or_default().push(index);
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let mut train = Vec::new();
    let mut test = Vec::new();

    for (gesture, mut indices) in groups {
        let count = indices.len();
        if count < 2 {
            return Err(TrainingError::ClassTooSmall {
                gesture: gesture.to_string(),
                count,
            });
        }
        indices.shuffle(&mut rng);
        let n_test = ((count as f64 * test_size).round() as usize).clamp(1, count - 1);
        test.extend_from_slice(&indices[..n_test]);
        train.extend_from_slice(&indices[n_test..]);
    }

    train.sort_unstable();
    test.sort_unstable();
    Ok((train, test))
}

/// Train and evaluate a gesture model on dataset rows
pub fn train_model(rows: &[DatasetRow], settings: &TrainingConfig) -> Result<TrainingOutcome, TrainingError> {
    let labels: Vec<String> = rows.iter().map(|row| row.gesture.clone()).collect();
    let distinct = labels.iter().collect::<BTreeSet<_>>().len();

    if distinct < settings.min_classes || rows.len() < settings.min_rows {
        debug!(
            "Skipping training: {} row(s), {} gesture(s) (need {} and {})",
            rows.len(),
            distinct,
            settings.min_rows,
            settings.min_classes
        );
        return Ok(TrainingOutcome::TooSmall {
            message: DATASET_TOO_SMALL.to_string(),
        });
    }

    let (train_idx, test_idx) = stratified_split(&labels, settings.test_size, settings.random_state)?;
    let sample = |index: &usize| (rows[*index].token.clone(), rows[*index].gesture.clone());

    let train_samples: Vec<(String, String)> = train_idx.iter().map(sample).collect();
    let model = GestureModel::fit(&train_samples, settings.smoothing);

    let (test_phrases, truth): (Vec<String>, Vec<String>) = test_idx.iter().map(sample).unzip();
    let predicted: Vec<String> = test_phrases
        .iter()
        .map(|phrase| model.predict_one(phrase).to_string())
        .collect();

    let report = TrainingReport::evaluate(&truth, &predicted, train_samples.len());
    info!(
        "Trained on {} rows, evaluated on {} rows, accuracy {:.3}",
        report.train_size, report.test_size, report.accuracy
    );

    Ok(TrainingOutcome::Trained { model, report })
}
