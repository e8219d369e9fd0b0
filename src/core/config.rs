use std::env;
use std::time::Duration;

use serde_json::{Map, Value};

use super::secrets;
use crate::errors::TriageError;

pub const DEFAULT_API_BASE_URL: &str = "https://slack.com/api";
pub const DEFAULT_START_DELAY_MS: u64 = 1000;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub slack_token: String,
    pub slack_signing_secret: Option<String>,
    pub slack_api_base_url: String,
    /// Caller overrides merged over the default triage settings.
    pub settings_overrides: Map<String, Value>,
    pub start_delay: Duration,
}

impl AppConfig {
    /// Loads configuration from the environment. The token comes from
    /// `SLACK_TOKEN`, or from the SSM parameter named by `SLACK_TOKEN_PARAM`.
    ///
    /// # Errors
    ///
    /// Returns an error if no token is configured, the SSM lookup fails, or a
    /// variable cannot be parsed.
    pub async fn load() -> Result<Self, TriageError> {
        let lookup = |key: &str| env::var(key).ok().filter(|v| !v.is_empty());

        let slack_token = match lookup("SLACK_TOKEN") {
            Some(token) => Some(token),
            None => match lookup("SLACK_TOKEN_PARAM") {
                Some(name) => secrets::get_secret(&name).await?,
                None => None,
            },
        };

        Self::from_lookup(lookup, slack_token)
    }

    /// Builds the configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns `TriageError::ConfigError` if `slack_token` is missing,
    /// `TRIAGE_SETTINGS` is not a JSON object, or `TRIAGE_START_DELAY_MS` is
    /// not a number.
    pub fn from_lookup<F>(lookup: F, slack_token: Option<String>) -> Result<Self, TriageError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let slack_token = slack_token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| TriageError::ConfigError("SLACK_TOKEN not set.".to_string()))?;

        let settings_overrides = match lookup("TRIAGE_SETTINGS") {
            Some(raw) => match serde_json::from_str::<Value>(&raw) {
                Ok(Value::Object(map)) => map,
                Ok(_) => {
                    return Err(TriageError::ConfigError(
                        "TRIAGE_SETTINGS must be a JSON object".to_string(),
                    ));
                }
                Err(e) => return Err(TriageError::ConfigError(format!("TRIAGE_SETTINGS: {e}"))),
            },
            None => Map::new(),
        };

        let start_delay_ms = match lookup("TRIAGE_START_DELAY_MS") {
            Some(raw) => raw
                .parse::<u64>()
                .map_err(|e| TriageError::ConfigError(format!("TRIAGE_START_DELAY_MS: {e}")))?,
            None => DEFAULT_START_DELAY_MS,
        };

        Ok(Self {
            slack_token,
            slack_signing_secret: lookup("SLACK_SIGNING_SECRET"),
            slack_api_base_url: lookup("SLACK_API_BASE_URL")
                .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string()),
            settings_overrides,
            start_delay: Duration::from_millis(start_delay_ms),
        })
    }
}
