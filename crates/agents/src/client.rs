//! HTTP client for agent servers.

use tracing::debug;
use wayfarer_common::{AgentCard, Result, Task, WayfarerError};

/// Client for one agent server.
#[derive(Clone)]
pub struct AgentClient {
    base_url: String,
    http_client: reqwest::Client,
}

impl AgentClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http_client: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch the agent's card.
    pub async fn get_card(&self) -> Result<AgentCard> {
        let url = format!("{}/agent", self.base_url);
        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(|e| WayfarerError::Agent(format!("card fetch failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(WayfarerError::Agent(format!(
                "card fetch error {status} from {url}"
            )));
        }

        response
            .json()
            .await
            .map_err(|e| WayfarerError::Agent(format!("invalid agent card: {e}")))
    }

    /// Send a task and return it with the agent's status and artifacts.
    pub async fn send_task(&self, task: &Task) -> Result<Task> {
        let url = format!("{}/tasks", self.base_url);
        debug!(task_id = %task.id, url = %url, "Sending task");

        let response = self
            .http_client
            .post(&url)
            .json(task)
            .send()
            .await
            .map_err(|e| WayfarerError::Agent(format!("task dispatch failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(WayfarerError::Agent(format!(
                "task dispatch error {status}: {body}"
            )));
        }

        response
            .json()
            .await
            .map_err(|e| WayfarerError::Agent(format!("invalid task response: {e}")))
    }

    /// Convenience wrapper: wrap `text` in a fresh task and send it.
    pub async fn send_text(&self, text: impl Into<String>) -> Result<Task> {
        self.send_task(&Task::from_user_text(text)).await
    }
}
