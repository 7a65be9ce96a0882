//! Conversion between stored messages and engine turns.

use database::{Message, NewMessage};
use engine_core::{ChatTurn, Role, ToolCallInfo};

/// Convert recent messages (newest first, as the store returns them) into
/// engine turns ordered oldest first.
pub fn turns_from_messages(mut messages: Vec<Message>) -> Vec<ChatTurn> {
    messages.reverse();
    messages.iter().filter_map(turn_from_message).collect()
}

/// Convert one stored message into an engine turn. Messages with an
/// unrecognized role are dropped.
fn turn_from_message(message: &Message) -> Option<ChatTurn> {
    let role = Role::parse(&message.role)?;

    let tool_call = message.tool_name.as_ref().map(|name| ToolCallInfo {
        call_id: message.tool_call_id.clone().unwrap_or_default(),
        name: name.clone(),
        arguments: message.tool_args.clone().unwrap_or_default(),
    });

    Some(ChatTurn {
        role,
        content: message.content.clone(),
        tool_call,
    })
}

/// Convert engine turns into storable messages for `user_id`, in order.
pub fn messages_from_turns(user_id: i64, turns: &[ChatTurn]) -> Vec<NewMessage> {
    turns
        .iter()
        .map(|turn| NewMessage {
            user_id,
            role: turn.role.as_str().to_string(),
            content: turn.content.clone(),
            tool_name: turn.tool_call.as_ref().map(|c| c.name.clone()),
            tool_call_id: turn.tool_call.as_ref().map(|c| c.call_id.clone()),
            tool_args: turn
                .tool_call
                .as_ref()
                .filter(|c| !c.arguments.is_empty())
                .map(|c| c.arguments.clone()),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn stored(id: i64, role: &str, content: Option<&str>) -> Message {
        Message {
            id,
            user_id: 1,
            role: role.to_string(),
            content: content.map(String::from),
            tool_name: None,
            tool_call_id: None,
            tool_args: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_turns_reordered_oldest_first() {
        // Store order is newest first.
        let messages = vec![
            stored(3, "system", Some("second reply")),
            stored(2, "user", Some("second")),
            stored(1, "user", Some("first")),
        ];

        let turns = turns_from_messages(messages);
        assert_eq!(turns.len(), 3);
        assert_eq!(turns[0].content.as_deref(), Some("first"));
        assert_eq!(turns[2].content.as_deref(), Some("second reply"));
    }

    #[test]
    fn test_unknown_role_dropped() {
        let messages = vec![stored(2, "moderator", Some("??")), stored(1, "user", Some("hi"))];
        let turns = turns_from_messages(messages);
        assert_eq!(turns.len(), 1);
        assert_eq!(turns[0].role, Role::User);
    }

    #[test]
    fn test_tool_request_round_trip() {
        let turn = ChatTurn::tool_request("call-1", "create_event", r#"{"name":"gym"}"#);
        let new_messages = messages_from_turns(7, &[turn]);

        assert_eq!(new_messages.len(), 1);
        let msg = &new_messages[0];
        assert_eq!(msg.role, "system");
        assert!(msg.content.is_none());
        assert_eq!(msg.tool_name.as_deref(), Some("create_event"));
        assert_eq!(msg.tool_call_id.as_deref(), Some("call-1"));
        assert_eq!(msg.tool_args.as_deref(), Some(r#"{"name":"gym"}"#));
    }

    #[test]
    fn test_tool_result_has_no_args() {
        let turn = ChatTurn::tool_result("call-1", "create_event", "Event created");
        let new_messages = messages_from_turns(7, &[turn]);

        let msg = &new_messages[0];
        assert_eq!(msg.role, "tool-result");
        assert_eq!(msg.content.as_deref(), Some("Event created"));
        assert!(msg.tool_args.is_none());
    }
}
