//! Scripted [`LlmClient`] double for tests.
//!
//! Several crates exercise their prompt/parse pipelines against canned
//! model output, so the double lives here rather than in each crate's
//! test module.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use wayfarer_common::{Result, WayfarerError};

use crate::client::{LlmClient, LlmRequest, LlmResponse};

type ErrorFactory = Box<dyn Fn() -> WayfarerError + Send + Sync>;

/// Returns a fixed sequence of completions, optionally failing the first
/// N calls. Records every request it sees.
pub struct ScriptedClient {
    responses: Mutex<VecDeque<String>>,
    failures_remaining: Mutex<u32>,
    error_factory: ErrorFactory,
    requests: Mutex<Vec<LlmRequest>>,
}

impl ScriptedClient {
    pub fn new(responses: &[&str]) -> Self {
        Self {
            responses: Mutex::new(responses.iter().map(|r| r.to_string()).collect()),
            failures_remaining: Mutex::new(0),
            error_factory: Box::new(|| WayfarerError::Llm("scripted failure".into())),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Fail the first `count` calls with errors from `factory`.
    pub fn failing_first(
        mut self,
        count: u32,
        factory: impl Fn() -> WayfarerError + Send + Sync + 'static,
    ) -> Self {
        self.failures_remaining = Mutex::new(count);
        self.error_factory = Box::new(factory);
        self
    }

    /// Every request seen so far.
    pub fn requests(&self) -> Vec<LlmRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmClient for ScriptedClient {
    async fn complete(&self, request: LlmRequest) -> Result<LlmResponse> {
        self.requests.lock().unwrap().push(request);

        {
            let mut failures = self.failures_remaining.lock().unwrap();
            if *failures > 0 {
                *failures -= 1;
                return Err((self.error_factory)());
            }
        }

        let content = self
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| WayfarerError::Llm("scripted responses exhausted".into()))?;

        Ok(LlmResponse {
            content,
            model: "scripted".to_string(),
            usage: None,
            finish_reason: Some("stop".to_string()),
        })
    }

    fn model_name(&self) -> &str {
        "scripted"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn responses_come_back_in_order() {
        let client = ScriptedClient::new(&["first", "second"]);
        assert_eq!(client.complete(LlmRequest::user("a")).await.unwrap().content, "first");
        assert_eq!(client.complete(LlmRequest::user("b")).await.unwrap().content, "second");
        assert!(client.complete(LlmRequest::user("c")).await.is_err());
        assert_eq!(client.requests().len(), 3);
    }
}
