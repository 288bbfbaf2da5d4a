//! Configuration for the coordinator.

use serde::{Deserialize, Serialize};
use wayfarer_llm::LlmConfig;

/// Agent server endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentEndpoints {
    #[serde(default = "default_weather_url")]
    pub weather: String,
    #[serde(default = "default_ticket_url")]
    pub ticket: String,
    #[serde(default = "default_order_url")]
    pub order: String,
}

fn default_weather_url() -> String {
    "http://localhost:5005".into()
}

fn default_ticket_url() -> String {
    "http://localhost:5006".into()
}

fn default_order_url() -> String {
    "http://localhost:5007".into()
}

impl Default for AgentEndpoints {
    fn default() -> Self {
        Self {
            weather: default_weather_url(),
            ticket: default_ticket_url(),
            order: default_order_url(),
        }
    }
}

/// Main coordinator configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CoordinatorConfig {
    /// LLM provider configuration
    #[serde(default)]
    pub llm: LlmConfig,

    /// Registered agent servers
    #[serde(default)]
    pub agents: AgentEndpoints,
}

impl CoordinatorConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: impl AsRef<std::path::Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config '{}': {e}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("invalid config '{}': {e}", path.display()))?;
        Ok(config)
    }
}
