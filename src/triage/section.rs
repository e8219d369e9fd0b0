use crate::core::models::{Bucket, ClassificationRecord, InvocationContext};
use crate::core::settings::Settings;
use crate::errors::TriageError;

/// Archive link prefix; a message id appended to it opens that message.
#[must_use]
pub fn archive_base_url(team_domain: &str, channel_name: &str) -> String {
    format!("https://{team_domain}.slack.com/archives/{channel_name}/p")
}

/// `<#C123|alerts>`
#[must_use]
pub fn channel_mention(channel_id: &str, channel_name: &str) -> String {
    format!("<#{channel_id}|{channel_name}>")
}

/// Renders the `bucket_name` section: its title followed by one link per
/// record in that bucket. Empty buckets still render their title.
///
/// # Errors
///
/// Returns `TriageError::SettingsError` if `bucket_name` is not a known bucket.
pub fn render_section(
    settings: &Settings,
    records: &[ClassificationRecord],
    context: &InvocationContext,
    bucket_name: &str,
) -> Result<String, TriageError> {
    let bucket: Bucket = bucket_name.parse()?;
    let channel_name = context.display_channel_name();
    let base_url = archive_base_url(&context.team_domain, channel_name);

    let filtered: Vec<&ClassificationRecord> =
        records.iter().filter(|r| r.in_bucket(bucket)).collect();

    let title = settings
        .bucket(bucket)
        .title
        .replacen("{{count}}", &filtered.len().to_string(), 1)
        .replacen(
            "{{channel}}",
            &channel_mention(&context.channel_id, channel_name),
            1,
        );

    let mut lines = Vec::with_capacity(filtered.len() + 1);
    lines.push(title);
    lines.extend(filtered.iter().map(|r| {
        format!(
            ":{}: {}{}",
            r.emoji.as_deref().unwrap_or_default(),
            base_url,
            r.id
        )
    }));

    Ok(lines.join("\n"))
}
