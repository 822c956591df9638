//! Shared HTTP plumbing: one agent configuration, bounded retry.

use anyhow::{bail, Context, Result};
use std::thread;
use std::time::Duration;

use crate::config::RetryPolicy;

/// Per-request timeout. Downloads larger than this window are not
/// worth blocking a scan for.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Builds the shared agent. Non-2xx statuses come back as responses,
/// not errors, so retry classification can see the status code.
#[must_use]
pub fn agent() -> ureq::Agent {
    ureq::config::Config::builder()
        .http_status_as_error(false)
        .timeout_global(Some(REQUEST_TIMEOUT))
        .build()
        .new_agent()
}

/// Whether a status code indicates a transient condition worth
/// retrying: throttling or a server-side failure.
fn is_transient(status: u16) -> bool {
    status == 429 || (500..600).contains(&status)
}

/// GETs a URL, retrying transient failures with exponential backoff.
///
/// Transport errors and transient statuses are retried up to the
/// policy's attempt cap; any other non-success status fails
/// immediately.
pub fn get_with_retry(agent: &ureq::Agent, url: &str, retry: RetryPolicy) -> Result<Vec<u8>> {
    let mut attempt = 0;
    loop {
        let reason: String = match agent.get(url).call() {
            Ok(response) => {
                let status = response.status().as_u16();
                if (200..300).contains(&status) {
                    return response
                        .into_body()
                        .read_to_vec()
                        .with_context(|| format!("failed reading response body from {url}"));
                }
                if !is_transient(status) {
                    bail!("request to {url} failed with status {status}");
                }
                format!("transient status {status}")
            }
            Err(err) => err.to_string(),
        };

        match retry.delay_for(attempt) {
            Some(delay) => {
                thread::sleep(delay);
                attempt += 1;
            }
            None => bail!(
                "request to {url} failed after {} attempts: {reason}",
                attempt + 1
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_status_classification() {
        assert!(is_transient(429));
        assert!(is_transient(500));
        assert!(is_transient(503));
        assert!(!is_transient(404));
        assert!(!is_transient(200));
    }

    #[test]
    fn test_backoff_doubles_then_stops() {
        let retry = RetryPolicy {
            attempts: 3,
            backoff: Duration::from_millis(100),
        };
        assert_eq!(retry.delay_for(0), Some(Duration::from_millis(100)));
        assert_eq!(retry.delay_for(1), Some(Duration::from_millis(200)));
        assert_eq!(retry.delay_for(2), None);
    }
}
