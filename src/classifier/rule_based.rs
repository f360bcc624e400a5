use crate::classifier::GestureClassifier;
use crate::dataset::Vocabulary;
use crate::errors::ClassifierError;
use crate::timeline::resolver::FALLBACK_GESTURE;

/// Classifier that looks every token up in the vocabulary
#[derive(Debug, Clone)]
pub struct RuleBasedClassifier {
    vocabulary: Vocabulary,
    fallback: String,
}

impl RuleBasedClassifier {
    pub fn new(vocabulary: Vocabulary) -> Self {
        Self {
            vocabulary,
            fallback: FALLBACK_GESTURE.to_string(),
        }
    }

    /// Gesture for tokens the vocabulary lacks; pass the configured
    /// `timeline.fallback_gesture` here
    pub fn with_fallback(mut self, fallback: &str) -> Self {
        self.fallback = fallback.to_string();
        self
    }
}

impl GestureClassifier for RuleBasedClassifier {
    fn predict(&self, tokens: &[String]) -> Result<Vec<String>, ClassifierError> {
        Ok(tokens
            .iter()
            .map(|token| {
                self.vocabulary
                    .get(&token.to_lowercase())
                    .unwrap_or(self.fallback.as_str())
                    .to_string()
            })
            .collect())
    }
}
