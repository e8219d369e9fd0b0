use regex::RegexBuilder;
use serde_json::{Map, Value};

use crate::core::models::{
    ClassificationRecord, InvocationContext, OutgoingPayload, RawMessage, ResponseType,
};
use crate::core::settings::{self, Settings};
use crate::errors::TriageError;

use super::rank::rank;
use super::section::render_section;

/// Two blank lines between sections.
pub const SECTION_SEPARATOR: &str = "\n\n\n";

/// Whether the command text asks for the report to be posted publicly.
///
/// # Errors
///
/// Returns `TriageError::SettingsError` if `publish_text` is not a valid pattern.
pub fn is_publish(settings: &Settings, text: &str) -> Result<bool, TriageError> {
    let pattern = RegexBuilder::new(&settings.publish_text)
        .case_insensitive(true)
        .build()
        .map_err(|e| TriageError::SettingsError(format!("publish_text: {e}")))?;
    Ok(pattern.is_match(text))
}

/// Renders every displayed bucket into the payload posted back to Slack.
/// Published reports go `in_channel`; private ones carry the help attachments.
///
/// # Errors
///
/// Returns `TriageError::SettingsError` if `display` names an unknown bucket or
/// `publish_text` is not a valid pattern.
pub fn assemble(
    context: &InvocationContext,
    records: &[ClassificationRecord],
    settings: &Settings,
) -> Result<OutgoingPayload, TriageError> {
    let sections = settings
        .display
        .iter()
        .map(|name| render_section(settings, records, context, name))
        .collect::<Result<Vec<_>, _>>()?;

    let mut payload = OutgoingPayload {
        text: sections.join(SECTION_SEPARATOR),
        unfurl_links: settings.unfurl_links,
        response_type: None,
        attachments: None,
    };

    if is_publish(settings, &context.text)? {
        payload.response_type = Some(ResponseType::InChannel);
    } else {
        payload.attachments = Some(settings.help.clone());
    }

    Ok(payload)
}

/// Builds the triage report for `messages`: resolve settings, rank, assemble.
///
/// # Errors
///
/// Returns `TriageError::SettingsError` if the overrides do not resolve or the
/// resolved settings cannot be rendered.
pub fn create(
    context: &InvocationContext,
    messages: &[RawMessage],
    overrides: &Map<String, Value>,
) -> Result<OutgoingPayload, TriageError> {
    let settings = settings::resolve(overrides)?;
    let records = rank(&settings, messages)?;
    assemble(context, &records, &settings)
}
