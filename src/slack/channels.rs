use tracing::warn;

use super::client::{Channel, ChatPlatform};
use crate::errors::TriageError;

fn normalize(name: &str) -> String {
    name.trim().trim_start_matches('#').to_lowercase()
}

/// Picks the id of the single channel named `name` (case-insensitive, leading
/// `#` ignored). `None` when nothing or more than one channel matches.
#[must_use]
pub fn find_channel_id(channels: &[Channel], name: &str) -> Option<String> {
    let wanted = normalize(name);
    let mut matches = channels.iter().filter(|c| normalize(&c.name) == wanted);

    match (matches.next(), matches.next()) {
        (Some(channel), None) => Some(channel.id.clone()),
        _ => None,
    }
}

/// Looks `name` up in the workspace's channel list.
///
/// Slack answering `ok: false` is logged and treated as no match.
///
/// # Errors
///
/// Returns an error only when the request itself fails.
pub async fn resolve_channel_id(
    platform: &dyn ChatPlatform,
    name: &str,
) -> Result<Option<String>, TriageError> {
    let listing = platform.list_channels().await?;

    if !listing.ok {
        warn!(
            "channels.list error: {}",
            listing.error.as_deref().unwrap_or("unknown")
        );
        return Ok(None);
    }

    Ok(find_channel_id(&listing.channels, name))
}
