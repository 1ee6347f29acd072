//! HTTP client construction and error mapping.

use std::time::Duration;

use crate::error::{AssistantError, Result};

/// Build a reqwest client whose every request is bounded by `timeout`.
pub fn build_client(timeout: Duration) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .pool_max_idle_per_host(2)
        .build()
        .map_err(|e| AssistantError::Configuration(format!("failed to build HTTP client: {e}")))
}

/// Map a non-success HTTP status to an error.
pub fn status_to_error(status: u16, body: &str) -> AssistantError {
    let message = extract_error_message(body).unwrap_or_else(|| body.to_string());
    match status {
        401 | 403 => AssistantError::Authentication(message),
        429 => AssistantError::RateLimited {
            retry_after_ms: extract_retry_after(body),
        },
        _ => AssistantError::api(status, message),
    }
}

fn extract_error_message(body: &str) -> Option<String> {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()?
        .get("error")?
        .get("message")?
        .as_str()
        .map(str::to_string)
}

// Google reports throttling hints as a RetryInfo detail, e.g. "retryDelay": "17s".
fn extract_retry_after(body: &str) -> Option<u64> {
    let value = serde_json::from_str::<serde_json::Value>(body).ok()?;
    value
        .get("error")?
        .get("details")?
        .as_array()?
        .iter()
        .filter_map(|detail| detail.get("retryDelay")?.as_str())
        .find_map(|delay| delay.strip_suffix('s')?.parse::<f64>().ok())
        .map(|secs| (secs * 1000.0) as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_statuses_map_to_authentication() {
        let body = r#"{"error":{"code":403,"message":"API key not valid"}}"#;
        match status_to_error(403, body) {
            AssistantError::Authentication(msg) => assert_eq!(msg, "API key not valid"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn throttling_reads_retry_delay() {
        let body = r#"{"error":{"code":429,"message":"quota","details":[
            {"@type":"type.googleapis.com/google.rpc.QuotaFailure"},
            {"@type":"type.googleapis.com/google.rpc.RetryInfo","retryDelay":"17s"}
        ]}}"#;
        assert!(matches!(
            status_to_error(429, body),
            AssistantError::RateLimited {
                retry_after_ms: Some(17_000)
            }
        ));
    }

    #[test]
    fn plain_text_body_is_kept_as_message() {
        match status_to_error(502, "bad gateway") {
            AssistantError::Api { status, message } => {
                assert_eq!(status, 502);
                assert_eq!(message, "bad gateway");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
