// SPDX-FileCopyrightText: 2026 Toolport Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Bounded retries with exponential backoff.
//!
//! Only failures that can plausibly succeed on a second attempt are retried:
//! timeouts, connection failures, and HTTP 429/500/502/503/504. Everything
//! else is returned to the caller after the first attempt.

use std::time::Duration;

use reqwest::{RequestBuilder, Response, StatusCode};
use toolport_config::model::UpstreamConfig;
use toolport_core::ToolportError;
use tracing::{debug, warn};

/// How many times, and how patiently, to retry an upstream call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first attempt.
    pub max_retries: u32,
    /// Delay before the first retry; doubled for each subsequent one.
    pub base_delay: Duration,
}

impl RetryPolicy {
    /// A policy that makes exactly one attempt.
    pub const fn none() -> Self {
        Self {
            max_retries: 0,
            base_delay: Duration::ZERO,
        }
    }

    /// Builds the policy from the `[upstream]` config section.
    pub fn from_config(config: &UpstreamConfig) -> Self {
        Self {
            max_retries: config.max_retries,
            base_delay: Duration::from_millis(config.retry_delay_ms),
        }
    }

    /// Backoff before retry number `retry` (1-based).
    pub fn delay_for(&self, retry: u32) -> Duration {
        let factor = 1u32.checked_shl(retry.saturating_sub(1)).unwrap_or(u32::MAX);
        self.base_delay.saturating_mul(factor)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from_config(&UpstreamConfig::default())
    }
}

/// Returns true for status codes worth retrying.
pub fn is_transient_status(status: StatusCode) -> bool {
    matches!(status.as_u16(), 429 | 500 | 502 | 503 | 504)
}

/// Returns true for transport errors worth retrying.
pub fn is_transient_error(err: &reqwest::Error) -> bool {
    err.is_timeout() || err.is_connect()
}

/// Sends the request built by `build`, retrying transient failures.
///
/// `build` is called once per attempt because a `RequestBuilder` is consumed
/// by `send`. The returned response is the last one received and may carry a
/// non-success status; callers decide how to report it. Transport errors
/// that survive all attempts become [`ToolportError::UpstreamUnavailable`].
pub async fn send_with_retry<F>(
    policy: &RetryPolicy,
    upstream: &str,
    build: F,
) -> Result<Response, ToolportError>
where
    F: Fn() -> RequestBuilder,
{
    let mut attempt = 0;
    loop {
        if attempt > 0 {
            let delay = policy.delay_for(attempt);
            warn!(upstream, attempt, delay_ms = delay.as_millis() as u64, "retrying upstream request");
            tokio::time::sleep(delay).await;
        }
        let retries_left = attempt < policy.max_retries;

        match build().send().await {
            Ok(response) => {
                let status = response.status();
                debug!(upstream, %status, attempt, "upstream response received");
                if is_transient_status(status) && retries_left {
                    warn!(upstream, %status, "transient upstream status");
                    attempt += 1;
                    continue;
                }
                return Ok(response);
            }
            Err(e) if is_transient_error(&e) && retries_left => {
                warn!(upstream, error = %e, "transient upstream transport error");
                attempt += 1;
            }
            Err(e) => {
                let message = if e.is_timeout() {
                    format!("request timed out: {e}")
                } else {
                    format!("request failed: {e}")
                };
                return Err(ToolportError::UpstreamUnavailable {
                    upstream: upstream.to_string(),
                    message,
                    source: Some(Box::new(e)),
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn fast_policy(max_retries: u32) -> RetryPolicy {
        RetryPolicy {
            max_retries,
            base_delay: Duration::ZERO,
        }
    }

    #[test]
    fn delay_doubles_per_retry() {
        let policy = RetryPolicy {
            max_retries: 3,
            base_delay: Duration::from_millis(100),
        };
        assert_eq!(policy.delay_for(1), Duration::from_millis(100));
        assert_eq!(policy.delay_for(2), Duration::from_millis(200));
        assert_eq!(policy.delay_for(3), Duration::from_millis(400));
    }

    #[test]
    fn huge_retry_numbers_saturate() {
        let policy = RetryPolicy {
            max_retries: u32::MAX,
            base_delay: Duration::from_secs(1),
        };
        assert!(policy.delay_for(64) >= policy.delay_for(31));
    }

    #[test]
    fn default_policy_follows_config_defaults() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_retries, 1);
        assert_eq!(policy.base_delay, Duration::from_millis(1000));
        assert_eq!(RetryPolicy::none().max_retries, 0);
    }

    #[test]
    fn transient_statuses() {
        for code in [429, 500, 502, 503, 504] {
            assert!(is_transient_status(StatusCode::from_u16(code).unwrap()), "{code}");
        }
        for code in [200, 400, 401, 403, 404, 422] {
            assert!(!is_transient_status(StatusCode::from_u16(code).unwrap()), "{code}");
        }
    }

    #[tokio::test]
    async fn retries_transient_status_then_succeeds() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/flaky"))
            .respond_with(ResponseTemplate::new(503))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/flaky"))
            .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
            .mount(&server)
            .await;

        let client = reqwest::Client::new();
        let url = format!("{}/flaky", server.uri());
        let response = send_with_retry(&fast_policy(1), "test", || client.get(&url))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn exhausted_retries_return_last_response() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .expect(3)
            .mount(&server)
            .await;

        let client = reqwest::Client::new();
        let url = server.uri();
        let response = send_with_retry(&fast_policy(2), "test", || client.get(&url))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn client_errors_are_not_retried() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(400))
            .expect(1)
            .mount(&server)
            .await;

        let client = reqwest::Client::new();
        let url = server.uri();
        let response = send_with_retry(&fast_policy(3), "test", || client.get(&url))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn timeouts_become_upstream_unavailable() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
            .expect(2)
            .mount(&server)
            .await;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(100))
            .build()
            .unwrap();
        let url = server.uri();
        let err = send_with_retry(&fast_policy(1), "slow-api", || client.get(&url))
            .await
            .unwrap_err();
        assert!(matches!(err, ToolportError::UpstreamUnavailable { .. }));
        assert!(err.to_string().contains("slow-api"), "got: {err}");
        assert!(err.to_string().contains("timed out"), "got: {err}");
    }

    #[tokio::test]
    async fn connection_refused_is_upstream_unavailable() {
        // Bind then drop a server so the port is closed.
        let uri = {
            let server = MockServer::start().await;
            server.uri()
        };
        let client = reqwest::Client::new();
        let err = send_with_retry(&fast_policy(0), "gone", || client.get(&uri))
            .await
            .unwrap_err();
        assert!(matches!(err, ToolportError::UpstreamUnavailable { .. }));
    }
}
