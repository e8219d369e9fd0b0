use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::Instant;
use serde_json::{Map, Value, json};
use triage::api::invocation::{Invocation, MISSING_CHANNEL_PROMPT, POSTED_PLACEHOLDER};
use triage::core::models::{OutgoingPayload, RawMessage, ResponseType};
use triage::errors::TriageError;
use triage::slack::client::{Channel, ChannelsListResponse, ChatPlatform};
use triage::slack::command_parser::SlashCommand;
use triage::slack::response_builder::Acknowledgement;

/// Records every call and answers from canned data.
#[derive(Default)]
struct FakePlatform {
    listing_ok: bool,
    channels: Vec<Channel>,
    history: Vec<RawMessage>,
    fail_history: bool,
    calls: Mutex<Vec<String>>,
    first_call_at: Mutex<Option<Instant>>,
    posts: Mutex<Vec<(String, OutgoingPayload)>>,
}

impl FakePlatform {
    fn with_history(history: Value) -> Self {
        Self {
            listing_ok: true,
            history: serde_json::from_value(history).unwrap(),
            ..Self::default()
        }
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn posts(&self) -> Vec<(String, OutgoingPayload)> {
        self.posts.lock().unwrap().clone()
    }

    fn first_call_at(&self) -> Option<Instant> {
        *self.first_call_at.lock().unwrap()
    }

    fn record(&self, call: String) {
        self.first_call_at
            .lock()
            .unwrap()
            .get_or_insert_with(Instant::now);
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl ChatPlatform for FakePlatform {
    async fn list_channels(&self) -> Result<ChannelsListResponse, TriageError> {
        self.record("channels.list".into());
        Ok(ChannelsListResponse {
            ok: self.listing_ok,
            error: (!self.listing_ok).then(|| "invalid_auth".to_string()),
            channels: self.channels.clone(),
        })
    }

    async fn channel_history(
        &self,
        channel_id: &str,
        count: u32,
    ) -> Result<Vec<RawMessage>, TriageError> {
        self.record(format!("channels.history {channel_id} {count}"));
        if self.fail_history {
            return Err(TriageError::HttpError("connection reset".into()));
        }
        Ok(self.history.clone())
    }

    async fn post_response(
        &self,
        response_url: &str,
        payload: &OutgoingPayload,
    ) -> Result<(), TriageError> {
        self.record("response_url".into());
        self.posts
            .lock()
            .unwrap()
            .push((response_url.to_string(), payload.clone()));
        Ok(())
    }
}

fn channel(id: &str, name: &str) -> Channel {
    Channel {
        id: id.into(),
        name: name.into(),
    }
}

fn command(channel_name: &str, text: &str) -> SlashCommand {
    SlashCommand {
        team_domain: "acme".into(),
        channel_id: "C1".into(),
        channel_name: channel_name.into(),
        text: text.into(),
        response_url: "https://hooks.slack.com/commands/1".into(),
        command: "/triage".into(),
        ..SlashCommand::default()
    }
}

async fn run(
    platform: &FakePlatform,
    overrides: &Map<String, Value>,
    cmd: &SlashCommand,
) -> Acknowledgement {
    Invocation::new(platform, overrides, Duration::ZERO)
        .run(cmd)
        .await
}

#[tokio::test]
async fn test_channel_invocation_posts_report() {
    let platform = FakePlatform::with_history(json!([
        { "text": "db down :red_circle:", "ts": "1500000000.000001" }
    ]));

    let ack = run(&platform, &Map::new(), &command("alerts", "")).await;

    assert_eq!(
        ack,
        Acknowledgement::reply(POSTED_PLACEHOLDER, ResponseType::InChannel)
    );
    assert_eq!(
        platform.calls(),
        vec!["channels.history C1 1000", "response_url"]
    );
    let posts = platform.posts();
    assert_eq!(posts[0].0, "https://hooks.slack.com/commands/1");
    assert!(posts[0].1.text.contains(
        ":red_circle: https://acme.slack.com/archives/alerts/p1500000000000001"
    ));
    assert!(posts[0].1.attachments.is_some());
}

#[tokio::test]
async fn test_direct_message_without_channel_prompts() {
    let platform = FakePlatform::with_history(json!([]));

    let ack = run(&platform, &Map::new(), &command("directmessage", "eng")).await;

    assert_eq!(
        ack,
        Acknowledgement::reply(MISSING_CHANNEL_PROMPT, ResponseType::InChannel)
    );
    assert!(platform.calls().is_empty());
}

#[tokio::test]
async fn test_direct_message_resolves_channel() {
    let platform = FakePlatform {
        channels: vec![channel("C9", "eng"), channel("C8", "ops")],
        ..FakePlatform::with_history(json!([{ "text": ":white_circle: x", "ts": "2.5" }]))
    };

    let ack = run(&platform, &Map::new(), &command("directmessage", "#Eng")).await;

    assert!(matches!(ack, Acknowledgement::Reply { .. }));
    assert_eq!(
        platform.calls(),
        vec!["channels.list", "channels.history C9 1000", "response_url"]
    );
    let text = platform.posts()[0].1.text.clone();
    assert!(text.contains("<#C9|Eng>"));
    assert!(text.contains("https://acme.slack.com/archives/Eng/p25"));
}

#[tokio::test]
async fn test_ambiguous_channel_is_a_silent_no_op() {
    let platform = FakePlatform {
        channels: vec![channel("C9", "eng"), channel("C7", "ENG")],
        ..FakePlatform::with_history(json!([]))
    };

    let ack = run(&platform, &Map::new(), &command("directmessage", "#eng")).await;

    assert_eq!(ack, Acknowledgement::Empty);
    assert_eq!(platform.calls(), vec!["channels.list"]);
    assert!(platform.posts().is_empty());
}

#[tokio::test]
async fn test_missing_channel_is_a_silent_no_op() {
    let platform = FakePlatform {
        channels: vec![channel("C9", "ops")],
        ..FakePlatform::with_history(json!([]))
    };

    let ack = run(&platform, &Map::new(), &command("directmessage", "#eng")).await;

    assert_eq!(ack, Acknowledgement::Empty);
    assert!(platform.posts().is_empty());
}

#[tokio::test]
async fn test_channel_listing_error_is_a_silent_no_op() {
    let platform = FakePlatform {
        listing_ok: false,
        channels: vec![channel("C9", "eng")],
        ..FakePlatform::default()
    };

    let ack = run(&platform, &Map::new(), &command("directmessage", "#eng")).await;

    assert_eq!(ack, Acknowledgement::Empty);
    assert!(platform.posts().is_empty());
}

#[tokio::test]
async fn test_history_failure_is_swallowed() {
    let platform = FakePlatform {
        fail_history: true,
        ..FakePlatform::with_history(json!([]))
    };

    let ack = run(&platform, &Map::new(), &command("alerts", "")).await;

    assert_eq!(ack, Acknowledgement::Empty);
    assert!(platform.posts().is_empty());
}

#[tokio::test]
async fn test_bad_overrides_are_swallowed() {
    let platform = FakePlatform::with_history(json!([{ "text": ":red_circle:", "ts": "1.1" }]));
    let mut overrides = Map::new();
    overrides.insert("display".into(), json!(["pending", "blocked"]));

    let ack = run(&platform, &overrides, &command("alerts", "")).await;

    assert_eq!(ack, Acknowledgement::Empty);
    assert!(platform.posts().is_empty());
}

#[tokio::test]
async fn test_publish_posts_in_channel() {
    let platform = FakePlatform::with_history(json!([{ "text": ":red_circle:", "ts": "1.1" }]));

    run(&platform, &Map::new(), &command("alerts", "Publish")).await;

    let (_, payload) = &platform.posts()[0];
    assert_eq!(payload.response_type, Some(ResponseType::InChannel));
    assert!(payload.attachments.is_none());
}

#[tokio::test(start_paused = true)]
async fn test_start_delay_precedes_first_platform_call() {
    let platform = FakePlatform::with_history(json!([{ "text": ":red_circle:", "ts": "1.1" }]));
    let delay = Duration::from_millis(1000);
    let started = Instant::now();

    let ack = Invocation::new(&platform, &Map::new(), delay)
        .run(&command("alerts", ""))
        .await;

    assert!(matches!(ack, Acknowledgement::Reply { .. }));
    let first_call = platform.first_call_at().expect("platform was called");
    assert!(first_call.duration_since(started) >= delay);
}

#[tokio::test(start_paused = true)]
async fn test_direct_message_prompt_skips_start_delay() {
    let platform = FakePlatform::with_history(json!([]));
    let started = Instant::now();

    let ack = Invocation::new(&platform, &Map::new(), Duration::from_millis(1000))
        .run(&command("directmessage", "eng"))
        .await;

    assert_eq!(
        ack,
        Acknowledgement::reply(MISSING_CHANNEL_PROMPT, ResponseType::InChannel)
    );
    assert_eq!(started.elapsed(), Duration::ZERO);
    assert!(platform.first_call_at().is_none());
}
