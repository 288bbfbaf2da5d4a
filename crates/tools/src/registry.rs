//! The tool trait and the name → tool dispatch table.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use wayfarer_common::Result;

/// A named tool invocable over the tool server.
#[async_trait]
pub trait Tool: Send + Sync {
    fn name(&self) -> &str;
    fn description(&self) -> &str;

    /// Invoke the tool. `arguments` is the JSON object from the call
    /// request; the return value is tool-specific JSON.
    async fn call(&self, arguments: Value) -> Result<Value>;
}

/// What a tool server advertises about each tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDescriptor {
    pub name: String,
    pub description: String,
}

/// Registered tools, looked up by name.
#[derive(Default)]
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        self.tools.insert(tool.name().to_string(), tool);
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.get(name).cloned()
    }

    pub fn descriptors(&self) -> Vec<ToolDescriptor> {
        let mut descriptors: Vec<ToolDescriptor> = self
            .tools
            .values()
            .map(|t| ToolDescriptor {
                name: t.name().to_string(),
                description: t.description().to_string(),
            })
            .collect();
        descriptors.sort_by(|a, b| a.name.cmp(&b.name));
        descriptors
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct UpperTool;

    #[async_trait]
    impl Tool for UpperTool {
        fn name(&self) -> &str {
            "upper"
        }
        fn description(&self) -> &str {
            "uppercases the input"
        }
        async fn call(&self, arguments: Value) -> Result<Value> {
            let text = arguments["text"].as_str().unwrap_or_default();
            Ok(json!(text.to_uppercase()))
        }
    }

    #[tokio::test]
    async fn registry_dispatches_by_name() {
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(UpperTool));

        let tool = registry.get("upper").unwrap();
        let result = tool.call(json!({"text": "beijing"})).await.unwrap();
        assert_eq!(result, json!("BEIJING"));

        assert!(registry.get("lower").is_none());
        assert_eq!(registry.descriptors()[0].name, "upper");
    }
}
