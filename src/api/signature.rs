use std::time::{SystemTime, UNIX_EPOCH};

use hmac::{Hmac, Mac};
use sha2::Sha256;
use tracing::error;

/// Requests older than this many seconds are rejected as replays.
const MAX_REQUEST_AGE_SECS: u64 = 300;

fn signing_mac(timestamp: &str, request_body: &str, signing_secret: &str) -> Option<Hmac<Sha256>> {
    let mut mac = match Hmac::<Sha256>::new_from_slice(signing_secret.as_bytes()) {
        Ok(mac) => mac,
        Err(e) => {
            error!("Failed to create HMAC: {}", e);
            return None;
        }
    };
    mac.update(format!("v0:{timestamp}:{request_body}").as_bytes());
    Some(mac)
}

/// Checks `X-Slack-Signature` against the signing secret.
#[must_use]
pub fn verify_slack_signature(
    request_body: &str,
    timestamp: &str,
    signature: &str,
    signing_secret: &str,
) -> bool {
    let Ok(ts) = timestamp.parse::<u64>() else {
        error!("Invalid X-Slack-Request-Timestamp '{}'", timestamp);
        return false;
    };

    if let Ok(now) = SystemTime::now().duration_since(UNIX_EPOCH) {
        let now_secs = now.as_secs();
        if now_secs.saturating_sub(ts) > MAX_REQUEST_AGE_SECS || ts > now_secs + 60 {
            error!("Timestamp out of range, potential replay attack");
            return false;
        }
    }

    let Some(mac) = signing_mac(timestamp, request_body, signing_secret) else {
        return false;
    };

    let received = signature
        .strip_prefix("v0=")
        .and_then(|hex_sig| hex::decode(hex_sig).ok());

    match received {
        Some(bytes) if mac.verify_slice(&bytes).is_ok() => true,
        _ => {
            error!("Signature verification failed. Received: '{}'", signature);
            false
        }
    }
}

/// `v0=<hex hmac>` over `v0:{timestamp}:{body}`, as Slack computes it.
#[must_use]
pub fn compute_signature(timestamp: &str, request_body: &str, signing_secret: &str) -> String {
    signing_mac(timestamp, request_body, signing_secret)
        .map(|mac| format!("v0={}", hex::encode(mac.finalize().into_bytes())))
        .unwrap_or_default()
}
