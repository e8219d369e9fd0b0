//! Lambda proxy response builders.

use serde_json::{Value, json};

use crate::slack::response_builder::Acknowledgement;

/// Returns a 200 OK response with an empty body.
#[must_use]
pub fn ok_empty() -> Value {
    json!({ "statusCode": 200, "body": "" })
}

/// Returns a 200 OK response carrying `body` as JSON.
#[must_use]
pub fn ok_json(body: &Value) -> Value {
    json!({
        "statusCode": 200,
        "headers": { "Content-Type": "application/json" },
        "body": body.to_string()
    })
}

/// Returns the response Slack sees for `ack`.
#[must_use]
pub fn ack_response(ack: &Acknowledgement) -> Value {
    match ack.body() {
        Some(body) => ok_json(&body),
        None => ok_empty(),
    }
}

/// Returns an error response with the given status code and message.
#[must_use]
pub fn err_response(status_code: u16, message: &str) -> Value {
    json!({
        "statusCode": status_code,
        "body": json!({ "error": message }).to_string()
    })
}
