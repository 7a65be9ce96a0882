//! Conversation turn types.
//!
//! A [`ChatTurn`] is the unit the orchestrator persists: the stored role set
//! is `user`, `system`, and `tool-result`. Assistant output (including tool
//! invocation requests) is stored with the `system` role; a tool invocation
//! request carries no content, only a [`ToolCallInfo`] descriptor.

use serde::{Deserialize, Serialize};

/// Role of a stored conversation turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Role {
    /// A message authored by the user.
    User,
    /// A message authored by the assistant or the service itself.
    System,
    /// The result of a tool execution.
    ToolResult,
}

impl Role {
    /// The role's stored string form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::System => "system",
            Role::ToolResult => "tool-result",
        }
    }

    /// Parse a stored role string.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "user" => Some(Role::User),
            "system" => Some(Role::System),
            "tool-result" => Some(Role::ToolResult),
            _ => None,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Descriptor of a tool invocation attached to a turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolCallInfo {
    /// Backend-assigned call id, used to pair requests with results.
    pub call_id: String,
    /// Name of the invoked tool.
    pub name: String,
    /// Serialized JSON arguments as produced by the model.
    pub arguments: String,
}

/// A single conversation turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    /// Role of the turn.
    pub role: Role,
    /// Textual content. `None` for tool invocation requests.
    pub content: Option<String>,
    /// Tool descriptor, present on tool requests and tool results.
    pub tool_call: Option<ToolCallInfo>,
}

impl ChatTurn {
    /// Create a user turn.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: Some(content.into()),
            tool_call: None,
        }
    }

    /// Create a system turn (assistant or service authored text).
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: Some(content.into()),
            tool_call: None,
        }
    }

    /// Create a tool invocation request turn (no content, descriptor only).
    pub fn tool_request(
        call_id: impl Into<String>,
        name: impl Into<String>,
        arguments: impl Into<String>,
    ) -> Self {
        Self {
            role: Role::System,
            content: None,
            tool_call: Some(ToolCallInfo {
                call_id: call_id.into(),
                name: name.into(),
                arguments: arguments.into(),
            }),
        }
    }

    /// Create a tool result turn.
    pub fn tool_result(
        call_id: impl Into<String>,
        name: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            role: Role::ToolResult,
            content: Some(content.into()),
            tool_call: Some(ToolCallInfo {
                call_id: call_id.into(),
                name: name.into(),
                arguments: String::new(),
            }),
        }
    }

    /// Whether this turn is a tool invocation request.
    pub fn is_tool_request(&self) -> bool {
        self.role == Role::System && self.content.is_none() && self.tool_call.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trip() {
        for role in [Role::User, Role::System, Role::ToolResult] {
            assert_eq!(Role::parse(role.as_str()), Some(role));
        }
        assert_eq!(Role::parse("assistant"), None);
    }

    #[test]
    fn test_user_turn() {
        let turn = ChatTurn::user("hello");
        assert_eq!(turn.role, Role::User);
        assert_eq!(turn.content.as_deref(), Some("hello"));
        assert!(turn.tool_call.is_none());
        assert!(!turn.is_tool_request());
    }

    #[test]
    fn test_tool_request_turn() {
        let turn = ChatTurn::tool_request("call-1", "create_event", r#"{"name":"dentist"}"#);
        assert_eq!(turn.role, Role::System);
        assert!(turn.content.is_none());
        assert!(turn.is_tool_request());
        let info = turn.tool_call.unwrap();
        assert_eq!(info.name, "create_event");
        assert_eq!(info.call_id, "call-1");
    }

    #[test]
    fn test_tool_result_turn() {
        let turn = ChatTurn::tool_result("call-1", "create_event", "Event created");
        assert_eq!(turn.role, Role::ToolResult);
        assert_eq!(turn.content.as_deref(), Some("Event created"));
        assert!(!turn.is_tool_request());
    }
}
