//! Tool system for the agent.
//!
//! Tools are deterministic functions the LLM can invoke during a generation.
//! Each tool declares a JSON schema for its parameters and returns structured
//! JSON, which flows into the `ToolResults` artifact of the task response.

pub mod budget;

pub use budget::AnalyzeBudget;

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::llm::{FunctionDefinition, ToolDefinition};

/// Information about a tool for display purposes.
#[derive(Debug, Clone)]
pub struct ToolInfo {
    pub name: String,
    pub description: String,
}

/// Trait for implementing tools.
#[async_trait]
pub trait Tool: Send + Sync {
    /// The unique name of this tool.
    fn name(&self) -> &str;

    /// A description of what this tool does.
    fn description(&self) -> &str;

    /// JSON schema for the tool's parameters.
    fn parameters_schema(&self) -> Value;

    /// Execute the tool with the given arguments.
    ///
    /// Argument validation happens here, before any domain logic runs.
    async fn execute(&self, args: Value) -> anyhow::Result<Value>;
}

/// Registry of available tools.
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    /// Create a new registry with the default tool set.
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register(Arc::new(budget::AnalyzeBudget));
        registry
    }

    /// Create an empty registry (no built-in tools).
    pub fn empty() -> Self {
        Self {
            tools: HashMap::new(),
        }
    }

    /// Register a tool under its own name.
    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        self.tools.insert(tool.name().to_string(), tool);
    }

    /// Look up a tool by name.
    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.get(name).cloned()
    }

    /// Execute a tool by name.
    pub async fn execute(&self, name: &str, args: Value) -> anyhow::Result<Value> {
        let tool = self
            .get(name)
            .ok_or_else(|| anyhow::anyhow!("Unknown tool: {}", name))?;
        tool.execute(args).await
    }

    /// Get schemas for all tools, for sending to the LLM.
    pub fn get_tool_schemas(&self) -> Vec<ToolDefinition> {
        let mut schemas: Vec<_> = self
            .tools
            .values()
            .map(|tool| ToolDefinition {
                tool_type: "function".to_string(),
                function: FunctionDefinition {
                    name: tool.name().to_string(),
                    description: tool.description().to_string(),
                    parameters: tool.parameters_schema(),
                },
            })
            .collect();
        schemas.sort_by(|a, b| a.function.name.cmp(&b.function.name));
        schemas
    }

    /// List all registered tools.
    pub fn list_tools(&self) -> Vec<ToolInfo> {
        let mut tools: Vec<_> = self
            .tools
            .values()
            .map(|t| ToolInfo {
                name: t.name().to_string(),
                description: t.description().to_string(),
            })
            .collect();
        tools.sort_by(|a, b| a.name.cmp(&b.name));
        tools
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_registry_has_budget_tool() {
        let registry = ToolRegistry::new();
        assert!(registry.get("get-budget").is_some());
        assert!(registry.get("nonexistent").is_none());
    }

    #[test]
    fn test_tool_schemas_use_function_type() {
        let registry = ToolRegistry::new();
        let schemas = registry.get_tool_schemas();
        assert_eq!(schemas.len(), 1);
        assert_eq!(schemas[0].tool_type, "function");
        assert_eq!(schemas[0].function.name, "get-budget");
    }

    #[test]
    fn test_list_tools_reports_names_and_descriptions() {
        let registry = ToolRegistry::new();
        let tools = registry.list_tools();
        assert_eq!(tools.len(), 1);
        assert_eq!(tools[0].name, "get-budget");
        assert_eq!(tools[0].description, "Analyze monthly budget and suggest savings");

        assert!(ToolRegistry::empty().list_tools().is_empty());
    }

    #[tokio::test]
    async fn test_execute_unknown_tool_fails() {
        let registry = ToolRegistry::new();
        let result = registry.execute("no-such-tool", serde_json::json!({})).await;
        assert!(result.is_err());
    }
}
