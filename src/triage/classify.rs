//! Per-message classification.
//!
//! The text decides eligibility and priority (first pending emoji mentioned),
//! reactions decide the bucket. `addressed` wins over `review`, which wins over
//! `pending`.

use std::collections::HashMap;

use regex::Regex;

use crate::core::models::{BOT_MESSAGE_SUBTYPE, ClassificationRecord, Priority, RawMessage};
use crate::core::settings::Settings;
use crate::errors::TriageError;

/// Emoji name to rank, in the order the pending emojis are configured.
#[derive(Debug, Clone, Default)]
pub struct PriorityOrder {
    ranks: HashMap<String, Priority>,
}

impl PriorityOrder {
    #[must_use]
    pub fn new(emojis: &[String]) -> Self {
        let mut ranks = HashMap::with_capacity(emojis.len());
        for (position, emoji) in emojis.iter().enumerate() {
            ranks
                .entry(emoji.clone())
                .or_insert_with(|| Priority::new(position));
        }
        Self { ranks }
    }

    #[must_use]
    pub fn rank_of(&self, emoji: &str) -> Option<Priority> {
        self.ranks.get(emoji).copied()
    }
}

pub struct Classifier<'a> {
    settings: &'a Settings,
    pattern: Option<Regex>,
    order: PriorityOrder,
}

impl<'a> Classifier<'a> {
    /// # Errors
    ///
    /// Returns `TriageError::SettingsError` if the pending emojis cannot be
    /// compiled into a pattern.
    pub fn new(settings: &'a Settings) -> Result<Self, TriageError> {
        let emojis: Vec<&String> = settings
            .pending
            .emojis
            .iter()
            .filter(|e| !e.is_empty())
            .collect();

        let pattern = if emojis.is_empty() {
            None
        } else {
            let alternation = emojis
                .iter()
                .map(|e| regex::escape(e))
                .collect::<Vec<_>>()
                .join("|");
            Some(Regex::new(&alternation).map_err(|e| {
                TriageError::SettingsError(format!("pending emojis do not form a pattern: {e}"))
            })?)
        };

        Ok(Self {
            settings,
            pattern,
            order: PriorityOrder::new(&settings.pending.emojis),
        })
    }

    /// First pending emoji found in `text`. At equal positions the emoji
    /// listed earlier in the settings wins.
    #[must_use]
    pub fn match_emoji(&self, text: &str) -> Option<String> {
        self.pattern
            .as_ref()
            .and_then(|p| p.find(text))
            .map(|m| m.as_str().to_string())
    }

    #[must_use]
    pub fn classify(&self, message: &RawMessage) -> ClassificationRecord {
        let emoji = self.match_emoji(&message.text);

        let reactions: Vec<&str> = message
            .reactions
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(|r| r.name.as_str())
            .collect();
        let reacted = |emojis: &[String]| emojis.iter().any(|e| reactions.contains(&e.as_str()));

        let addressed = reacted(self.settings.addressed.emojis.as_slice());
        let review = reacted(self.settings.review.emojis.as_slice()) && !addressed;
        let pending = emoji.is_some() && !review && !addressed;

        let bot = self.settings.skip_bots
            && message.subtype.as_deref() == Some(BOT_MESSAGE_SUBTYPE);
        let priority = emoji.as_deref().and_then(|e| self.order.rank_of(e));

        ClassificationRecord {
            bot,
            priority,
            emoji,
            addressed,
            pending,
            review,
            id: message.ts.replacen('.', "", 1),
            message: message.clone(),
        }
    }
}

/// Classifies a single message against `settings`.
///
/// # Errors
///
/// See [`Classifier::new`].
pub fn classify(
    settings: &Settings,
    message: &RawMessage,
) -> Result<ClassificationRecord, TriageError> {
    Ok(Classifier::new(settings)?.classify(message))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_listed_emoji_ranks_highest() {
        let order = PriorityOrder::new(&["a".into(), "b".into(), "a".into()]);
        assert_eq!(order.rank_of("a"), Some(Priority::new(0)));
        assert_eq!(order.rank_of("b"), Some(Priority::new(1)));
        assert_eq!(order.rank_of("c"), None);
    }
}
