use aws_sdk_ssm::Client as SsmClient;

use crate::errors::TriageError;

/// Reads a (possibly `SecureString`) parameter from SSM Parameter Store.
/// Returns `Ok(None)` when the parameter does not exist or has no value.
///
/// # Errors
///
/// Returns an error for any SSM failure other than a missing parameter.
pub async fn get_secret(name: &str) -> Result<Option<String>, TriageError> {
    let shared = aws_config::from_env().load().await;
    let client = SsmClient::new(&shared);

    match client
        .get_parameter()
        .name(name)
        .with_decryption(true)
        .send()
        .await
    {
        Ok(resp) => Ok(resp
            .parameter
            .and_then(|param| param.value().map(str::to_string))
            .filter(|value| !value.is_empty())),
        Err(e) => {
            let msg = format!("{e}");
            if msg.contains("ParameterNotFound") {
                Ok(None)
            } else {
                Err(TriageError::AwsError(format!("ssm get_parameter: {e}")))
            }
        }
    }
}
