//! Lambda handler for the `/triage` slash command.
//!
//! This module handles:
//! - Request validation (body, optional signature)
//! - Parsing the form-encoded command
//! - Running the invocation and shaping its acknowledgement

use lambda_runtime::{Error, LambdaEvent};
use serde_json::Value;
use tracing::{error, info};

use super::invocation::Invocation;
use super::{helpers, parsing, signature};
use crate::core::config::AppConfig;
use crate::slack::SlackClient;

pub use self::function_handler as handler;

/// Lambda handler for the API entrypoint.
///
/// # Errors
///
/// Fails the invocation only when configuration cannot be loaded (for
/// example no Slack token). Everything else is answered with a response.
#[tracing::instrument(level = "info", skip(event))]
pub async fn function_handler(event: LambdaEvent<Value>) -> Result<Value, Error> {
    let config = AppConfig::load().await.map_err(|e| {
        error!("Config error: {}", e);
        Error::from(e.to_string())
    })?;

    Ok(handle_request(&config, &event.payload).await)
}

/// Handles one API Gateway event with an already loaded configuration.
pub async fn handle_request(config: &AppConfig, payload: &Value) -> Value {
    let body = match parsing::extract_body(payload) {
        Ok(b) => b,
        Err(e) => {
            error!("Rejecting request: {}", e);
            return helpers::err_response(400, &e.to_string());
        }
    };

    if let Some(secret) = config.slack_signing_secret.as_deref()
        && let Err(response) = verify_signature(&body, payload, secret)
    {
        return response;
    }

    let command = match parsing::parse_slash_command(&body) {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to parse slash command: {}", e);
            return helpers::err_response(400, &format!("Parse Error: {e}"));
        }
    };
    info!(
        command = %command.command,
        channel_name = %command.channel_name,
        "Slash command parsed"
    );

    let client = SlackClient::from_config(config);
    let ack = Invocation::new(&client, &config.settings_overrides, config.start_delay)
        .run(&command)
        .await;

    helpers::ack_response(&ack)
}

fn verify_signature(body: &str, payload: &Value, secret: &str) -> Result<(), Value> {
    let headers = payload.get("headers").unwrap_or(&Value::Null);

    let Some(sig) = parsing::get_header_value(headers, "X-Slack-Signature") else {
        error!("Missing X-Slack-Signature header");
        return Err(helpers::err_response(401, "Missing X-Slack-Signature header"));
    };

    let Some(timestamp) = parsing::get_header_value(headers, "X-Slack-Request-Timestamp") else {
        error!("Missing X-Slack-Request-Timestamp header");
        return Err(helpers::err_response(
            401,
            "Missing X-Slack-Request-Timestamp header",
        ));
    };

    if !signature::verify_slack_signature(body, timestamp, sig, secret) {
        return Err(helpers::err_response(401, "Invalid Slack signature"));
    }

    Ok(())
}
