use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use wayfarer_common::{Result, WayfarerError};

use crate::client::{LlmClient, LlmRequest, LlmResponse};
use crate::openai::OpenAiClient;
use crate::retry::{RetryConfig, RetryingClient};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Provider type; only "openai" (OpenAI-compatible endpoints) today.
    #[serde(default = "default_provider")]
    pub provider: String,
    #[serde(default = "default_model")]
    pub model: String,
    /// API key. Falls back to the provider env var when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default)]
    pub api_url: Option<String>,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default)]
    pub max_tokens: Option<u32>,
    #[serde(default = "default_max_concurrent")]
    pub max_concurrent_requests: usize,
    #[serde(default)]
    pub retry: RetryConfig,
}

fn default_provider() -> String {
    "openai".into()
}

fn default_model() -> String {
    "qwen-plus".into()
}

fn default_temperature() -> f32 {
    0.1
}

fn default_max_concurrent() -> usize {
    2
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            model: default_model(),
            api_key: None,
            api_url: None,
            temperature: default_temperature(),
            max_tokens: None,
            max_concurrent_requests: default_max_concurrent(),
            retry: RetryConfig::default(),
        }
    }
}

impl LlmConfig {
    /// Defaults overridden from the environment: `WAYFARER_LLM_MODEL`
    /// and `WAYFARER_LLM_URL`. Used by the server binaries, which have
    /// no config file of their own.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(model) = std::env::var("WAYFARER_LLM_MODEL") {
            if !model.is_empty() {
                config.model = model;
            }
        }
        if let Ok(url) = std::env::var("WAYFARER_LLM_URL") {
            if !url.is_empty() {
                config.api_url = Some(url);
            }
        }
        config
    }

    /// Resolve the API key from config or environment.
    ///
    /// Priority: explicit `api_key`, then `DASHSCOPE_API_KEY`, then
    /// `OPENAI_API_KEY`.
    pub fn resolve_api_key(&self) -> Option<String> {
        if let Some(ref key) = self.api_key {
            if !key.is_empty() {
                return Some(key.clone());
            }
        }
        std::env::var("DASHSCOPE_API_KEY")
            .or_else(|_| std::env::var("OPENAI_API_KEY"))
            .ok()
    }
}

/// Caps concurrent completion calls with a semaphore.
pub struct SemaphoredClient {
    inner: Arc<dyn LlmClient>,
    semaphore: Arc<tokio::sync::Semaphore>,
}

impl SemaphoredClient {
    pub fn new(inner: Arc<dyn LlmClient>, max_concurrent: usize) -> Self {
        Self {
            inner,
            semaphore: Arc::new(tokio::sync::Semaphore::new(max_concurrent)),
        }
    }
}

#[async_trait]
impl LlmClient for SemaphoredClient {
    async fn complete(&self, request: LlmRequest) -> Result<LlmResponse> {
        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|e| WayfarerError::Llm(format!("semaphore acquire failed: {e}")))?;
        self.inner.complete(request).await
    }

    fn model_name(&self) -> &str {
        self.inner.model_name()
    }
}

/// Assemble the production client stack: provider, then retry, then a
/// concurrency cap.
pub fn build_llm_client(config: &LlmConfig) -> Result<Arc<dyn LlmClient>> {
    let base_client: Box<dyn LlmClient> = match config.provider.as_str() {
        "openai" => Box::new(
            OpenAiClient::new(
                config.api_url.clone(),
                config.model.clone(),
                config.resolve_api_key(),
            )
            .with_defaults(Some(config.temperature), config.max_tokens),
        ),
        other => {
            return Err(WayfarerError::Config(format!(
                "Unknown LLM provider: {other}"
            )));
        }
    };

    let retrying: Box<dyn LlmClient> =
        Box::new(RetryingClient::new(base_client, config.retry.clone()));

    let semaphored = SemaphoredClient::new(Arc::from(retrying), config.max_concurrent_requests);

    Ok(Arc::new(semaphored))
}
