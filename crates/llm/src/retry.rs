use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::warn;
use wayfarer_common::Result;

use crate::client::{LlmClient, LlmRequest, LlmResponse};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    pub max_retries: u32,
    pub initial_delay_ms: u64,
    pub max_delay_ms: u64,
    pub backoff_multiplier: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_delay_ms: 500,
            max_delay_ms: 30_000,
            backoff_multiplier: 2.0,
        }
    }
}

/// Retries transient completion failures with exponential backoff.
///
/// Only rate-limit and server-side errors are retried; client errors
/// surface immediately.
pub struct RetryingClient<T: LlmClient> {
    inner: T,
    config: RetryConfig,
}

impl<T: LlmClient> RetryingClient<T> {
    pub fn new(inner: T, config: RetryConfig) -> Self {
        Self { inner, config }
    }

    fn is_retryable(error_msg: &str) -> bool {
        let lower = error_msg.to_lowercase();
        lower.contains("429")
            || lower.contains("rate limit")
            || lower.contains("500")
            || lower.contains("502")
            || lower.contains("503")
            || lower.contains("504")
            || lower.contains("server error")
            || lower.contains("bad gateway")
            || lower.contains("service unavailable")
            || lower.contains("gateway timeout")
    }

    fn compute_delay(&self, attempt: u32) -> u64 {
        let base = self.config.initial_delay_ms as f64
            * self.config.backoff_multiplier.powi(attempt as i32);
        (base as u64).min(self.config.max_delay_ms)
    }
}

#[async_trait]
impl<T: LlmClient> LlmClient for RetryingClient<T> {
    async fn complete(&self, request: LlmRequest) -> Result<LlmResponse> {
        let mut last_error = None;

        for attempt in 0..=self.config.max_retries {
            match self.inner.complete(request.clone()).await {
                Ok(response) => return Ok(response),
                Err(e) => {
                    let error_msg = e.to_string();

                    if attempt == self.config.max_retries || !Self::is_retryable(&error_msg) {
                        return Err(e);
                    }

                    let delay = self.compute_delay(attempt);
                    warn!(
                        attempt = attempt + 1,
                        max_retries = self.config.max_retries,
                        delay_ms = delay,
                        error = %error_msg,
                        "Retrying LLM request"
                    );

                    tokio::time::sleep(tokio::time::Duration::from_millis(delay)).await;
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap())
    }

    fn model_name(&self) -> &str {
        self.inner.model_name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedClient;
    use wayfarer_common::WayfarerError;

    #[test]
    fn default_retry_config() {
        let config = RetryConfig::default();
        assert_eq!(config.max_retries, 3);
        assert_eq!(config.initial_delay_ms, 500);
        assert_eq!(config.max_delay_ms, 30_000);
    }

    #[test]
    fn retryable_error_detection() {
        type R = RetryingClient<ScriptedClient>;
        assert!(R::is_retryable("chat completion API error 429: rate limit"));
        assert!(R::is_retryable("chat completion API error 500 Internal Server Error"));
        assert!(R::is_retryable("502 bad gateway"));
        assert!(R::is_retryable("503 Service Unavailable"));
        assert!(!R::is_retryable("chat completion API error 401: bad key"));
        assert!(!R::is_retryable("no choices in completion response"));
    }

    #[test]
    fn compute_delay_respects_max() {
        let client = RetryingClient {
            inner: ScriptedClient::new(&[]),
            config: RetryConfig {
                max_retries: 5,
                initial_delay_ms: 500,
                max_delay_ms: 2000,
                backoff_multiplier: 10.0,
            },
        };
        assert!(client.compute_delay(5) <= 2000);
    }

    #[tokio::test]
    async fn retries_until_success() {
        let inner = ScriptedClient::new(&["SELECT 1"]).failing_first(
            2,
            || WayfarerError::Llm("chat completion API error 503".into()),
        );
        let client = RetryingClient::new(
            inner,
            RetryConfig {
                max_retries: 3,
                initial_delay_ms: 1,
                max_delay_ms: 2,
                backoff_multiplier: 1.0,
            },
        );

        let response = client.complete(LlmRequest::user("q")).await.unwrap();
        assert_eq!(response.content, "SELECT 1");
    }

    #[tokio::test]
    async fn non_retryable_error_surfaces_immediately() {
        let inner = ScriptedClient::new(&["unreached"])
            .failing_first(1, || WayfarerError::Llm("API error 401: bad key".into()));
        let client = RetryingClient::new(inner, RetryConfig::default());

        let err = client.complete(LlmRequest::user("q")).await.unwrap_err();
        assert!(err.to_string().contains("401"));
    }
}
