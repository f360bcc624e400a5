use log::debug;

use crate::classifier::GestureClassifier;
use crate::errors::ClassifierError;

/// Label given to unresolved tokens when no classifier is available
pub const FALLBACK_GESTURE: &str = "neutral";

/// Fill the gaps left by the lexicon.
///
/// With a classifier, all unresolved tokens go out in one batched `predict`
/// call and the answers are written back by position. Without one, every gap
/// gets `fallback`.
pub fn resolve_gestures(
    tokens: &[String],
    assigned: Vec<Option<String>>,
    classifier: Option<&dyn GestureClassifier>,
    fallback: &str,
) -> Result<Vec<String>, ClassifierError> {
    let unresolved: Vec<usize> = assigned
        .iter()
        .enumerate()
        .filter(|(_, gesture)| gesture.is_none())
        .map(|(index, _)| index)
        .collect();

    let mut predictions = match classifier {
        Some(classifier) if !unresolved.is_empty() => {
            let batch: Vec<String> = unresolved.iter().map(|&i| tokens[i].clone()).collect();
            let labels = classifier.predict(&batch)?;
            if labels.len() != batch.len() {
                return Err(ClassifierError::LengthMismatch {
                    expected: batch.len(),
                    actual: labels.len(),
                });
            }
            debug!("Classifier resolved {} token(s)", labels.len());
            labels.into_iter()
        }
        _ => Vec::new().into_iter(),
    };

    Ok(assigned
        .into_iter()
        .map(|gesture| {
            gesture
                .or_else(|| predictions.next())
                .unwrap_or_else(|| fallback.to_string())
        })
        .collect())
}
