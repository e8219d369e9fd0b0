//! Synchronous replies to a slash command.

use serde_json::{Value, json};

use crate::core::models::ResponseType;

/// How an invocation is answered. Every invocation produces exactly one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Acknowledgement {
    Reply {
        text: String,
        response_type: ResponseType,
    },
    /// Plain success with nothing to show.
    Empty,
}

impl Acknowledgement {
    #[must_use]
    pub fn reply(text: &str, response_type: ResponseType) -> Self {
        Acknowledgement::Reply {
            text: text.to_string(),
            response_type,
        }
    }

    /// JSON body for Slack, `None` for `Empty`.
    #[must_use]
    pub fn body(&self) -> Option<Value> {
        match self {
            Acknowledgement::Reply {
                text,
                response_type,
            } => Some(json!({ "text": text, "response_type": response_type })),
            Acknowledgement::Empty => None,
        }
    }
}
