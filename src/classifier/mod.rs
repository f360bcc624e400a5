/*!
 * Gesture classifiers for tokens the lexicon cannot place.
 *
 * This module contains:
 * - `GestureClassifier`: the single-method capability the timeline consumes
 * - `rule_based`: vocabulary lookup with a neutral fallback
 * - `model`: a trained naive Bayes model with JSON persistence
 * - `training`: stratified split, fitting and evaluation report
 */

use std::fmt::Debug;
use std::path::Path;

use log::{debug, warn};

use crate::errors::ClassifierError;

/// Assigns one gesture label per token.
///
/// Implementations receive the whole batch of a segment's unresolved tokens
/// at once and must answer with exactly one label per token, in order.
pub trait GestureClassifier: Send + Sync + Debug {
    /// Predict a gesture for each token
    ///
    /// # Arguments
    /// * `tokens` - Lower-cased tokens, in transcript order
    ///
    /// # Returns
    /// * `Result<Vec<String>, ClassifierError>` - One label per token, or an error
    fn predict(&self, tokens: &[String]) -> Result<Vec<String>, ClassifierError>;
}

/// Outcome of trying to obtain a classifier
#[derive(Debug)]
pub enum ClassifierAvailability {
    /// A usable classifier
    Ready(Box<dyn GestureClassifier>),
    /// No model was requested
    NotConfigured,
    /// A model was requested but could not be loaded
    Unavailable {
        /// Why loading failed
        reason: String,
    },
}

impl ClassifierAvailability {
    /// Borrow the classifier when one is ready
    pub fn as_classifier(&self) -> Option<&dyn GestureClassifier> {
        match self {
            Self::Ready(classifier) => Some(&**classifier),
            Self::NotConfigured | Self::Unavailable { .. } => None,
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }
}

/// Load a persisted model; failures degrade to `Unavailable` with a warning
pub fn load_classifier(path: Option<&Path>) -> ClassifierAvailability {
    let Some(path) = path else {
        return ClassifierAvailability::NotConfigured;
    };

    match model::GestureModel::load(path) {
        Ok(model) => {
            debug!("Loaded gesture model with {} labels from {:?}", model.labels().len(), path);
            ClassifierAvailability::Ready(Box::new(model))
        }
        Err(e) => {
            warn!("Could not load model at {:?}: {}", path, e);
            ClassifierAvailability::Unavailable {
                reason: e.to_string(),
            }
        }
    }
}

pub mod model;
pub mod rule_based;
pub mod training;

// Re-export main types
pub use model::GestureModel;
pub use rule_based::RuleBasedClassifier;
pub use training::{train_model, TrainingOutcome, TrainingReport};
