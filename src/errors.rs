use thiserror::Error;

#[derive(Debug, Error)]
pub enum TriageError {
    #[error("Failed to parse Slack request: {0}")]
    ParseError(String),

    #[error("Failed to access Slack API: {0}")]
    ApiError(String),

    #[error("Failed to send HTTP request: {0}")]
    HttpError(String),

    #[error("Failed to interact with AWS services: {0}")]
    AwsError(String),

    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    #[error("Invalid triage settings: {0}")]
    SettingsError(String),
}

impl From<reqwest::Error> for TriageError {
    fn from(error: reqwest::Error) -> Self {
        TriageError::HttpError(error.to_string())
    }
}

impl From<serde_json::Error> for TriageError {
    fn from(error: serde_json::Error) -> Self {
        TriageError::ParseError(error.to_string())
    }
}

impl From<anyhow::Error> for TriageError {
    fn from(error: anyhow::Error) -> Self {
        TriageError::ApiError(format!("{error:#}"))
    }
}
