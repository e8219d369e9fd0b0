//! Triage - a Slack slash command that reports which requests in a channel
//! still need attention.
//!
//! Requests are messages mentioning one of the pending emojis (`:red_circle:`,
//! `:large_blue_circle:`, `:white_circle:`, most urgent first). Reactions move
//! them along: `:eyes:` means someone is looking, `:white_check_mark:` means
//! done. The command scans the channel's recent history, buckets every
//! request and posts a digest with links back to each message.
//!
//! # Architecture
//!
//! The system uses:
//! - AWS Lambda for serverless execution of the slash command endpoint
//! - SSM Parameter Store for the Slack token
//! - reqwest for the Slack Web API and `response_url` calls
//! - Tokio for async runtime
//!
//! # Example
//!
//! ```
//! use serde_json::{Map, json};
//! use triage::core::models::{InvocationContext, RawMessage};
//!
//! let messages: Vec<RawMessage> = serde_json::from_value(json!([
//!     { "text": "prod is down :red_circle:", "ts": "1700000000.000100" },
//!     { "text": "lunch?", "ts": "1700000001.000200" }
//! ]))
//! .unwrap();
//!
//! let context = InvocationContext {
//!     channel_id: "C1".into(),
//!     channel_name: "alerts".into(),
//!     team_domain: "acme".into(),
//!     text: String::new(),
//! };
//!
//! let payload = triage::triage::create(&context, &messages, &Map::new()).unwrap();
//! assert!(payload.text.contains("https://acme.slack.com/archives/alerts/p1700000000000100"));
//! ```

// Module declarations
pub mod api;
pub mod core;
pub mod errors;
pub mod slack;
pub mod triage;

pub use errors::TriageError;

/// Configure structured logging with JSON format for AWS Lambda environments.
///
/// Honors `RUST_LOG`, defaulting to `info`. Safe to call more than once; only
/// the first call installs the subscriber.
///
/// # Example
///
/// ```
/// triage::setup_logging();
/// ```
pub fn setup_logging() {
    use tracing_subscriber::EnvFilter;
    use tracing_subscriber::prelude::*;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = tracing_subscriber::fmt::layer().json().with_target(true);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}
