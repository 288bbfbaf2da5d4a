//! HTTP client for tool servers.

use serde_json::Value;
use tracing::debug;
use wayfarer_common::{Result, WayfarerError};

use crate::server::{ToolCallRequest, ToolCallResponse, ToolListing};

/// Client for one tool server.
#[derive(Clone)]
pub struct ToolClient {
    base_url: String,
    http_client: reqwest::Client,
}

impl ToolClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http_client: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch the server's tool descriptors.
    pub async fn list_tools(&self) -> Result<ToolListing> {
        let url = format!("{}/tools", self.base_url);
        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(|e| WayfarerError::Tool(format!("tool listing failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(WayfarerError::Tool(format!(
                "tool listing error {status} from {url}"
            )));
        }

        response
            .json()
            .await
            .map_err(|e| WayfarerError::Tool(format!("invalid tool listing: {e}")))
    }

    /// Invoke a named tool and return its content value.
    pub async fn call_tool(&self, tool: &str, arguments: Value) -> Result<Value> {
        let url = format!("{}/tools/call", self.base_url);
        debug!(tool, url = %url, "Calling tool");

        let response = self
            .http_client
            .post(&url)
            .json(&ToolCallRequest {
                tool: tool.to_string(),
                arguments,
            })
            .send()
            .await
            .map_err(|e| WayfarerError::Tool(format!("tool call failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(WayfarerError::Tool(format!(
                "tool call error {status}: {body}"
            )));
        }

        let call_response: ToolCallResponse = response
            .json()
            .await
            .map_err(|e| WayfarerError::Tool(format!("invalid tool response: {e}")))?;

        Ok(call_response.content)
    }
}
