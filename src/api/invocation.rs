//! One slash-command invocation, from validation to acknowledgement.
//!
//! `Received → Validating → [DirectMessageResolving] → Fetching → Processing →
//! Posting → Acknowledged`, with `Aborted` reachable from every step after
//! validation. Whatever happens, `Invocation::run` resolves to exactly one
//! `Acknowledgement` and never to an error.

use std::fmt;
use std::time::Duration;

use anyhow::Context;
use serde_json::{Map, Value};
use tracing::{Instrument, error, info, info_span};
use uuid::Uuid;

use crate::core::models::{DIRECT_MESSAGE_HANDLE, InvocationContext, ResponseType};
use crate::slack::channels::resolve_channel_id;
use crate::slack::client::ChatPlatform;
use crate::slack::command_parser::SlashCommand;
use crate::slack::response_builder::Acknowledgement;
use crate::triage;

/// Number of recent messages fetched from the channel.
pub const HISTORY_SIZE: u32 = 1000;

/// Reply to a direct-message invocation that does not name a channel.
pub const MISSING_CHANNEL_PROMPT: &str = "Missing second parameter, channel name i.e. #alerts";

/// Acknowledgement text once the report has been posted.
pub const POSTED_PLACEHOLDER: &str = " ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Received,
    Validating,
    DirectMessageResolving,
    Fetching,
    Processing,
    Posting,
    Acknowledged,
    Aborted,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Received => "received",
            Stage::Validating => "validating",
            Stage::DirectMessageResolving => "direct_message_resolving",
            Stage::Fetching => "fetching",
            Stage::Processing => "processing",
            Stage::Posting => "posting",
            Stage::Acknowledged => "acknowledged",
            Stage::Aborted => "aborted",
        };
        f.write_str(name)
    }
}

enum Outcome {
    Posted,
    NoChannel,
}

pub struct Invocation<'a> {
    platform: &'a dyn ChatPlatform,
    overrides: &'a Map<String, Value>,
    start_delay: Duration,
}

impl<'a> Invocation<'a> {
    #[must_use]
    pub fn new(
        platform: &'a dyn ChatPlatform,
        overrides: &'a Map<String, Value>,
        start_delay: Duration,
    ) -> Self {
        Self {
            platform,
            overrides,
            start_delay,
        }
    }

    pub async fn run(&self, command: &SlashCommand) -> Acknowledgement {
        let correlation_id = Uuid::new_v4().to_string();
        let direct_message = command.channel_name == DIRECT_MESSAGE_HANDLE;
        let span = info_span!(
            "invocation",
            correlation_id = %correlation_id,
            channel_id = %command.channel_id,
            direct_message
        );

        async move {
            info!(stage = %Stage::Received, "Slash command received");

            info!(stage = %Stage::Validating, "Validating command");
            if direct_message && !command.text.starts_with('#') {
                info!(stage = %Stage::Acknowledged, "Direct message without a channel name");
                return Acknowledgement::reply(MISSING_CHANNEL_PROMPT, ResponseType::InChannel);
            }

            if !self.start_delay.is_zero() {
                tokio::time::sleep(self.start_delay).await;
            }

            match self.process(command, direct_message).await {
                Ok(Outcome::Posted) => {
                    info!(stage = %Stage::Acknowledged, "Report posted");
                    Acknowledgement::reply(POSTED_PLACEHOLDER, ResponseType::InChannel)
                }
                Ok(Outcome::NoChannel) => {
                    info!(stage = %Stage::Aborted, "No single channel matches '{}'", command.text);
                    Acknowledgement::Empty
                }
                Err(e) => {
                    error!(stage = %Stage::Aborted, "Triage failed: {:?}", e);
                    Acknowledgement::Empty
                }
            }
        }
        .instrument(span)
        .await
    }

    async fn process(
        &self,
        command: &SlashCommand,
        direct_message: bool,
    ) -> anyhow::Result<Outcome> {
        let channel_id = if direct_message {
            info!(stage = %Stage::DirectMessageResolving, "Resolving {}", command.text);
            match resolve_channel_id(self.platform, &command.text)
                .await
                .context("resolving channel name")?
            {
                Some(id) => id,
                None => return Ok(Outcome::NoChannel),
            }
        } else {
            command.channel_id.clone()
        };

        info!(stage = %Stage::Fetching, "Fetching history of {}", channel_id);
        let messages = self
            .platform
            .channel_history(&channel_id, HISTORY_SIZE)
            .await
            .with_context(|| format!("fetching history of {channel_id}"))?;

        info!(stage = %Stage::Processing, "Triaging {} messages", messages.len());
        let context = InvocationContext::from_command(command, &channel_id);
        let payload = triage::create(&context, &messages, self.overrides)
            .context("building triage report")?;

        info!(stage = %Stage::Posting, "Posting report");
        self.platform
            .post_response(&command.response_url, &payload)
            .await
            .context("posting report to response_url")?;

        Ok(Outcome::Posted)
    }
}
