//! Slack Web API access
//!
//! Triage only needs three calls, all plain form/JSON POSTs. They sit behind
//! `ChatPlatform` so the invocation flow can run against a fake.

use std::sync::LazyLock;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;
use url::Url;

use crate::core::config::AppConfig;
use crate::core::models::{OutgoingPayload, RawMessage};
use crate::errors::TriageError;

static HTTP_CLIENT: LazyLock<Client> = LazyLock::new(|| {
    Client::builder()
        .timeout(Duration::from_secs(30))
        .build()
        .unwrap_or_else(|_| Client::new())
});

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Channel {
    pub id: String,
    pub name: String,
}

/// `channels.list` response. `ok: false` is reported here rather than as an
/// error so callers can decide how to treat it.
#[derive(Debug, Clone, Deserialize)]
pub struct ChannelsListResponse {
    pub ok: bool,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub channels: Vec<Channel>,
}

#[derive(Debug, Deserialize)]
struct HistoryResponse {
    ok: bool,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    messages: Vec<RawMessage>,
}

#[async_trait]
pub trait ChatPlatform: Send + Sync {
    /// # Errors
    ///
    /// Returns an error if the request fails or the body cannot be parsed.
    async fn list_channels(&self) -> Result<ChannelsListResponse, TriageError>;

    /// Most recent `count` messages of `channel_id`, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or Slack answers `ok: false`.
    async fn channel_history(
        &self,
        channel_id: &str,
        count: u32,
    ) -> Result<Vec<RawMessage>, TriageError>;

    /// # Errors
    ///
    /// Returns an error if `response_url` is invalid or the POST fails.
    async fn post_response(
        &self,
        response_url: &str,
        payload: &OutgoingPayload,
    ) -> Result<(), TriageError>;
}

pub struct SlackClient {
    token: String,
    base_url: String,
}

impl SlackClient {
    #[must_use]
    pub fn new(token: String, base_url: String) -> Self {
        Self {
            token,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            config.slack_token.clone(),
            config.slack_api_base_url.clone(),
        )
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/{method}", self.base_url)
    }
}

#[async_trait]
impl ChatPlatform for SlackClient {
    async fn list_channels(&self) -> Result<ChannelsListResponse, TriageError> {
        let resp = HTTP_CLIENT
            .post(self.method_url("channels.list"))
            .form(&[("token", self.token.as_str())])
            .send()
            .await?;

        Ok(resp.json::<ChannelsListResponse>().await?)
    }

    async fn channel_history(
        &self,
        channel_id: &str,
        count: u32,
    ) -> Result<Vec<RawMessage>, TriageError> {
        let count = count.to_string();
        let resp = HTTP_CLIENT
            .post(self.method_url("channels.history"))
            .form(&[
                ("count", count.as_str()),
                ("token", self.token.as_str()),
                ("channel", channel_id),
            ])
            .send()
            .await?;

        let history: HistoryResponse = resp.json().await?;
        if !history.ok {
            return Err(TriageError::ApiError(format!(
                "channels.history error: {}",
                history.error.as_deref().unwrap_or("unknown")
            )));
        }

        debug!(
            "Fetched {} messages from {}",
            history.messages.len(),
            channel_id
        );
        Ok(history.messages)
    }

    async fn post_response(
        &self,
        response_url: &str,
        payload: &OutgoingPayload,
    ) -> Result<(), TriageError> {
        let url = Url::parse(response_url)
            .map_err(|e| TriageError::ParseError(format!("response_url: {e}")))?;

        let resp = HTTP_CLIENT.post(url).json(payload).send().await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp
                .text()
                .await
                .unwrap_or_else(|_| "<failed to read body>".to_string());
            return Err(TriageError::HttpError(format!(
                "response_url POST failed: status={status} body={body}"
            )));
        }

        Ok(())
    }
}
