use crate::core::models::{ClassificationRecord, RawMessage};
use crate::core::settings::Settings;
use crate::errors::TriageError;

use super::classify::Classifier;

/// Classifies `messages`, keeps the ones mentioning a pending emoji that are
/// not skipped bot posts, and orders them by priority. Records of equal
/// priority keep their history order.
///
/// # Errors
///
/// See [`Classifier::new`].
pub fn rank(
    settings: &Settings,
    messages: &[RawMessage],
) -> Result<Vec<ClassificationRecord>, TriageError> {
    let classifier = Classifier::new(settings)?;

    let mut records: Vec<ClassificationRecord> = messages
        .iter()
        .map(|m| classifier.classify(m))
        .filter(|r| r.emoji.is_some() && !r.bot)
        .collect();

    // `sort_by_key` is stable.
    records.sort_by_key(|r| r.priority);

    Ok(records)
}
