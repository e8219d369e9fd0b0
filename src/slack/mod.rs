//! All Slack-specific functionality

pub mod channels;
pub mod client;
pub mod command_parser;
pub mod response_builder;

// Re-export main types for convenience
pub use client::{ChatPlatform, SlackClient};
pub use response_builder::Acknowledgement;
