//! Tool registry: dispatch by name, engine-facing executor adapter.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use engine_core::{ToolCall, ToolDefinition, ToolExecutor, ToolOutcome};
use tracing::{debug, info, warn};

use crate::error::ToolError;
use crate::tool::{Tool, ToolArgs, ToolOutput};

/// Registry for managing tools.
///
/// The registry holds a collection of tools and dispatches execution
/// requests to the appropriate tool by name. Through its [`ToolExecutor`]
/// implementation it is the piece a completion engine calls when the model
/// requests a tool.
pub struct ToolRegistry {
    /// Registered tools by name.
    tools: HashMap<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
        }
    }

    /// Register a tool.
    ///
    /// If a tool with the same name already exists, it will be replaced.
    pub fn register<T: Tool + 'static>(&mut self, tool: T) {
        let name = tool.name().to_string();
        info!("Registering tool: {}", name);
        self.tools.insert(name, Arc::new(tool));
    }

    /// Get a list of registered tool names.
    pub fn list_tools(&self) -> Vec<&str> {
        self.tools.keys().map(|s| s.as_str()).collect()
    }

    /// Check if a tool is registered.
    pub fn has_tool(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// Execute a tool by name for the given user.
    pub async fn execute_tool(
        &self,
        name: &str,
        user_id: i64,
        args: ToolArgs,
    ) -> Result<ToolOutput, ToolError> {
        let tool = self
            .tools
            .get(name)
            .ok_or_else(|| ToolError::NotFound(name.to_string()))?;

        debug!(
            "Executing tool '{}' for user {} with {} params",
            name,
            user_id,
            args.params.len()
        );

        let result = tool.execute(user_id, args).await?;

        debug!(
            "Tool '{}' completed: success={}, content_len={}",
            name,
            result.success,
            result.content.len()
        );

        Ok(result)
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ToolExecutor for ToolRegistry {
    async fn execute(&self, user_id: i64, call: &ToolCall) -> ToolOutcome {
        let args = match ToolArgs::from_json(&call.arguments) {
            Ok(args) => args,
            Err(e) => {
                warn!("Tool '{}' got malformed arguments: {}", call.name, e);
                return ToolOutcome::failure(&call.id, e.to_string());
            }
        };

        match self.execute_tool(&call.name, user_id, args).await {
            Ok(output) if output.success => ToolOutcome::success(&call.id, output.content),
            Ok(output) => ToolOutcome::failure(&call.id, output.content),
            Err(e) => {
                warn!("Tool '{}' failed: {}", call.name, e);
                ToolOutcome::failure(&call.id, e.to_string())
            }
        }
    }

    fn definitions(&self) -> Vec<ToolDefinition> {
        self.tools
            .values()
            .map(|tool| {
                ToolDefinition::function(tool.name(), tool.description(), tool.parameters())
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    struct EchoTool;

    #[async_trait]
    impl Tool for EchoTool {
        fn name(&self) -> &str {
            "echo"
        }

        fn description(&self) -> &str {
            "Echoes back the input"
        }

        fn parameters(&self) -> Value {
            json!({
                "type": "object",
                "properties": { "message": { "type": "string" } },
                "required": ["message"]
            })
        }

        async fn execute(&self, _user_id: i64, args: ToolArgs) -> Result<ToolOutput, ToolError> {
            let message = args.get_string("message")?;
            Ok(ToolOutput::success(message))
        }
    }

    #[tokio::test]
    async fn test_registry_basic() {
        let mut registry = ToolRegistry::new();
        registry.register(EchoTool);

        assert!(registry.has_tool("echo"));
        assert!(!registry.has_tool("nonexistent"));
        assert_eq!(registry.list_tools(), vec!["echo"]);
    }

    #[tokio::test]
    async fn test_executor_dispatch() {
        let mut registry = ToolRegistry::new();
        registry.register(EchoTool);

        let call = ToolCall {
            id: "call-1".to_string(),
            name: "echo".to_string(),
            arguments: r#"{"message": "hello"}"#.to_string(),
        };

        let outcome = registry.execute(7, &call).await;
        assert!(outcome.success);
        assert_eq!(outcome.content, "hello");
        assert_eq!(outcome.call_id, "call-1");
    }

    #[tokio::test]
    async fn test_executor_unknown_tool() {
        let registry = ToolRegistry::new();
        let call = ToolCall {
            id: "call-2".to_string(),
            name: "nonexistent".to_string(),
            arguments: "{}".to_string(),
        };

        let outcome = registry.execute(7, &call).await;
        assert!(!outcome.success);
        assert!(outcome.content.contains("not found"));
    }

    #[tokio::test]
    async fn test_executor_malformed_arguments() {
        let mut registry = ToolRegistry::new();
        registry.register(EchoTool);

        let call = ToolCall {
            id: "call-3".to_string(),
            name: "echo".to_string(),
            arguments: "not json".to_string(),
        };

        let outcome = registry.execute(7, &call).await;
        assert!(!outcome.success);
    }

    #[tokio::test]
    async fn test_definitions() {
        let mut registry = ToolRegistry::new();
        registry.register(EchoTool);

        let defs = registry.definitions();
        assert_eq!(defs.len(), 1);
        assert_eq!(defs[0].function.name, "echo");
        assert_eq!(defs[0].tool_type, "function");
    }
}
