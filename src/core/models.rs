use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::TriageError;
use crate::slack::command_parser::SlashCommand;

/// `channel_name` Slack sends when a command is issued in a direct message.
pub const DIRECT_MESSAGE_HANDLE: &str = "directmessage";

/// Message subtype Slack assigns to integration/bot posts.
pub const BOT_MESSAGE_SUBTYPE: &str = "bot_message";

/// A message as returned by `channels.history`. Only the fields triage looks at.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawMessage {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub ts: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reactions: Option<Vec<Reaction>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtype: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reaction {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub users: Vec<String>,
}

/// Rank of a message, taken from the position of its emoji in the configured
/// pending list. Position 0 is the highest priority and sorts first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Priority(usize);

impl Priority {
    #[must_use]
    pub fn new(rank: usize) -> Self {
        Self(rank)
    }
}

/// Triage category a record can fall into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bucket {
    Pending,
    Review,
    Addressed,
}

impl Bucket {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Bucket::Pending => "pending",
            Bucket::Review => "review",
            Bucket::Addressed => "addressed",
        }
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Bucket {
    type Err = TriageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Bucket::Pending),
            "review" => Ok(Bucket::Review),
            "addressed" => Ok(Bucket::Addressed),
            other => Err(TriageError::SettingsError(format!(
                "unknown bucket '{other}'"
            ))),
        }
    }
}

/// Everything triage derives from one `RawMessage`.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassificationRecord {
    pub bot: bool,
    /// `None` when no pending emoji appears in the text.
    pub priority: Option<Priority>,
    pub emoji: Option<String>,
    pub addressed: bool,
    pub pending: bool,
    pub review: bool,
    /// Message `ts` with its separator removed, as used in archive links.
    pub id: String,
    pub message: RawMessage,
}

impl ClassificationRecord {
    #[must_use]
    pub fn in_bucket(&self, bucket: Bucket) -> bool {
        match bucket {
            Bucket::Pending => self.pending,
            Bucket::Review => self.review,
            Bucket::Addressed => self.addressed,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseType {
    InChannel,
    Ephemeral,
}

/// Body posted to the command's `response_url`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutgoingPayload {
    pub text: String,
    pub unfurl_links: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_type: Option<ResponseType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attachments: Option<Value>,
}

/// The parts of a slash command the report is rendered against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationContext {
    /// Channel whose history is being triaged.
    pub channel_id: String,
    pub channel_name: String,
    pub team_domain: String,
    pub text: String,
}

impl InvocationContext {
    /// Builds the context for `command`, targeting `channel_id`. For direct
    /// messages this is the channel resolved from the command text rather
    /// than the DM conversation itself.
    #[must_use]
    pub fn from_command(command: &SlashCommand, channel_id: &str) -> Self {
        Self {
            channel_id: channel_id.to_string(),
            channel_name: command.channel_name.clone(),
            team_domain: command.team_domain.clone(),
            text: command.text.clone(),
        }
    }

    #[must_use]
    pub fn is_direct_message(&self) -> bool {
        self.channel_name == DIRECT_MESSAGE_HANDLE
    }

    /// Channel name used in links and mentions. Direct messages carry it in the
    /// command text (`#alerts`).
    #[must_use]
    pub fn display_channel_name(&self) -> &str {
        if self.is_direct_message() {
            self.text.trim().trim_start_matches('#')
        } else {
            &self.channel_name
        }
    }
}
