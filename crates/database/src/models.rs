//! Database models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Onboarding state of a user's conversation.
///
/// Persisted explicitly on the user row rather than derived from message
/// counts, so out-of-band message inserts (reminder delivery) cannot move a
/// user through the opt-in handshake.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversationState {
    /// No contact yet; next message triggers the opt-in prompt.
    New,
    /// Opt-in prompt sent; waiting for the confirmation keyword.
    PendingOptIn,
    /// Fully onboarded; messages go to the completion engine.
    Onboarded,
}

impl ConversationState {
    /// The state's stored string form.
    pub fn as_str(&self) -> &'static str {
        match self {
            ConversationState::New => "new",
            ConversationState::PendingOptIn => "pending_opt_in",
            ConversationState::Onboarded => "onboarded",
        }
    }

    /// Parse a stored state string. Unknown values map to `New`.
    pub fn parse(s: &str) -> Self {
        match s {
            "pending_opt_in" => ConversationState::PendingOptIn,
            "onboarded" => ConversationState::Onboarded,
            _ => ConversationState::New,
        }
    }
}

/// A user account, keyed by national phone number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Auto-incrementing id.
    pub id: i64,
    /// 10-digit national phone number (country prefix stripped).
    pub phone_number: String,
    /// Persisted onboarding state (see [`ConversationState`]).
    pub conversation_state: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl User {
    /// The user's onboarding state.
    pub fn state(&self) -> ConversationState {
        ConversationState::parse(&self.conversation_state)
    }
}

/// A stored conversation message. Append-only; never mutated or deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Message {
    /// Auto-incrementing id.
    pub id: i64,
    /// Owning user.
    pub user_id: i64,
    /// Role: "user", "system", or "tool-result".
    pub role: String,
    /// Textual content. NULL for tool invocation requests.
    pub content: Option<String>,
    /// Name of the invoked tool, if this turn is tool plumbing.
    pub tool_name: Option<String>,
    /// Backend-assigned tool call id.
    pub tool_call_id: Option<String>,
    /// Serialized JSON tool arguments.
    pub tool_args: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// A message to be appended (id and timestamp assigned on insert).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMessage {
    /// Owning user.
    pub user_id: i64,
    /// Role: "user", "system", or "tool-result".
    pub role: String,
    /// Textual content.
    pub content: Option<String>,
    /// Tool name, for tool plumbing turns.
    pub tool_name: Option<String>,
    /// Tool call id, for tool plumbing turns.
    pub tool_call_id: Option<String>,
    /// Serialized JSON tool arguments.
    pub tool_args: Option<String>,
}

impl NewMessage {
    /// A plain text message with the given role.
    pub fn text(user_id: i64, role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            user_id,
            role: role.into(),
            content: Some(content.into()),
            tool_name: None,
            tool_call_id: None,
            tool_args: None,
        }
    }
}

/// A scheduled event, created by the create_event tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Event {
    /// Auto-incrementing id.
    pub id: i64,
    /// Owning user.
    pub user_id: i64,
    /// Event name, as supplied by the model.
    pub name: String,
    /// Absolute event date-time.
    pub date: DateTime<Utc>,
    /// Event kind (currently always "one-time").
    pub kind: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// A reminder derived from an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Reminder {
    /// Auto-incrementing id.
    pub id: i64,
    /// The event this reminder belongs to.
    pub event_id: i64,
    /// Owning user.
    pub user_id: i64,
    /// When the reminder fires; always strictly before the event date.
    pub fire_at: DateTime<Utc>,
    /// Claimed by a scheduler task (idempotency guard).
    pub claimed: bool,
    /// Delivered to the user.
    pub sent: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}
