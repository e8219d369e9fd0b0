//! Triage settings and the defaults they are resolved against.
//!
//! Overrides are merged onto the defaults one level deep: an override for
//! `pending` replaces the whole default `pending` object, so a caller that
//! only wants different emojis must also restate the title.

use std::sync::LazyLock;

use serde::Deserialize;
use serde_json::{Map, Value, json};

use crate::core::models::Bucket;
use crate::errors::TriageError;

static DEFAULTS: LazyLock<Map<String, Value>> = LazyLock::new(|| {
    let defaults = json!({
        "unfurl_links": true,
        "publish_text": "publish",
        "display": ["pending", "review"],
        "pending": {
            "title": "There are `{{count}}` request(s) pending in {{channel}}:",
            "emojis": ["red_circle", "large_blue_circle", "white_circle"]
        },
        "review": {
            "title": "There are `{{count}}` request(s) being looked :eyes: at in {{channel}}:",
            "emojis": ["eyes"]
        },
        "addressed": {
            "title": "There are `{{count}}` request(s) addressed in {{channel}}:",
            "emojis": ["white_check_mark"]
        },
        "help": [
            {
                "color": "#fff",
                "text": "\n"
            },
            {
                "mrkdwn_in": ["text", "pretext"],
                "pretext": "Here's how *Triage* works:",
                "text": "I look at messages posted in here since yesterday.\nI only care about messages that have :red_circle:, :large_blue_circle:, or :white_circle:.\nIf a messages has :eyes: reaction, it's in progress. \nIf it has a :white_check_mark:, it's done. Otherwise, it's still pending.\n"
            }
        ],
        "skip_bots": false
    });

    match defaults {
        Value::Object(map) => map,
        _ => Map::new(),
    }
});

/// Built-in defaults as a JSON object. Never mutated; `resolve` merges into a copy.
#[must_use]
pub fn defaults() -> &'static Map<String, Value> {
    &DEFAULTS
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Settings {
    pub unfurl_links: bool,
    /// Case-insensitive pattern; command text matching it publishes the report.
    pub publish_text: String,
    /// Bucket names rendered into the report, in order.
    pub display: Vec<String>,
    pub pending: BucketSettings,
    pub review: BucketSettings,
    pub addressed: BucketSettings,
    /// Attachments sent along with private reports.
    pub help: Value,
    pub skip_bots: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BucketSettings {
    #[serde(default)]
    pub title: String,
    /// For `pending`, order is priority: the first emoji ranks highest.
    pub emojis: Vec<String>,
}

impl Settings {
    #[must_use]
    pub fn bucket(&self, bucket: Bucket) -> &BucketSettings {
        match bucket {
            Bucket::Pending => &self.pending,
            Bucket::Review => &self.review,
            Bucket::Addressed => &self.addressed,
        }
    }
}

/// Merges `overrides` over the defaults, top-level keys only.
///
/// # Errors
///
/// Returns `TriageError::SettingsError` if the merged object does not have the
/// shape of `Settings` (for example an override that replaces `pending` with
/// an object lacking `emojis`).
pub fn resolve(overrides: &Map<String, Value>) -> Result<Settings, TriageError> {
    let mut merged = defaults().clone();
    for (key, value) in overrides {
        merged.insert(key.clone(), value.clone());
    }

    serde_json::from_value(Value::Object(merged))
        .map_err(|e| TriageError::SettingsError(format!("settings do not resolve: {e}")))
}
