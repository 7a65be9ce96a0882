//! Create-event tool: inserts an event and derives its reminder.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use database::{event, Database};
use serde_json::{json, Value};
use tracing::{info, warn};

use crate::error::ToolError;
use crate::schedule::reminder_fire_at;
use crate::tool::{Tool, ToolArgs, ToolOutput};

/// Display format for dates embedded in confirmation strings.
const DATE_FORMAT: &str = "%Y-%m-%d %H:%M UTC";

/// Tool that creates a one-time event for the acting user.
///
/// The reminder is a derived side effect: its fire time follows the
/// lead-time rule (24h before for events more than 72h out, else 1h
/// before) and is never taken from the model.
pub struct CreateEvent {
    db: Database,
}

impl CreateEvent {
    /// Create the tool backed by the given database.
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    fn confirmation(name: &str, date: DateTime<Utc>, fire_at: DateTime<Utc>) -> String {
        format!(
            "Event \"{}\" created for {}. A reminder is set for {}.",
            name,
            date.format(DATE_FORMAT),
            fire_at.format(DATE_FORMAT)
        )
    }
}

#[async_trait]
impl Tool for CreateEvent {
    fn name(&self) -> &str {
        "create_event"
    }

    fn description(&self) -> &str {
        "Create an event for the user at an absolute date and time. \
         A reminder is scheduled automatically; do not ask for or invent \
         reminder times."
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "name": {
                    "type": "string",
                    "description": "Short name of the event, e.g. 'call mom'."
                },
                "date": {
                    "type": "string",
                    "description": "Absolute event date-time in ISO 8601, resolved against the current date given in the instructions."
                }
            },
            "required": ["name", "date"]
        })
    }

    async fn execute(&self, user_id: i64, args: ToolArgs) -> Result<ToolOutput, ToolError> {
        let name = args.get_string("name")?;
        let date = args.get_datetime("date")?;
        let fire_at = reminder_fire_at(date, Utc::now());

        match event::create_event_with_reminder(self.db.pool(), user_id, &name, date, fire_at)
            .await
        {
            Ok((event, reminder)) => {
                info!(
                    "Created event {} ('{}') for user {}, reminder {} at {}",
                    event.id, event.name, user_id, reminder.id, reminder.fire_at
                );
                Ok(ToolOutput::success(Self::confirmation(
                    &name, date, fire_at,
                )))
            }
            Err(e) => {
                warn!("Failed to create event '{}' for user {}: {}", name, user_id, e);
                Ok(ToolOutput::failure(format!(
                    "Could not save the event \"{}\": {}",
                    name, e
                )))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use database::{reminder, user};

    async fn test_db() -> Database {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        db.migrate().await.unwrap();
        db
    }

    #[tokio::test]
    async fn test_create_event_far_out_gets_24h_reminder() {
        let db = test_db().await;
        let alice = user::create_user(db.pool(), "5551234567").await.unwrap();
        let tool = CreateEvent::new(db.clone());

        let date = Utc::now() + Duration::days(10);
        let args = ToolArgs::from_json(&format!(
            r#"{{"name": "dentist", "date": "{}"}}"#,
            date.to_rfc3339()
        ))
        .unwrap();

        let output = tool.execute(alice.id, args).await.unwrap();
        assert!(output.success);
        assert!(output.content.contains("dentist"));

        let events = event::events_in_range(
            db.pool(),
            alice.id,
            date - Duration::hours(1),
            date + Duration::hours(1),
        )
        .await
        .unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind, "one-time");

        // Reminder due a day before the event, not earlier
        let due = reminder::due_reminders(db.pool(), date - Duration::hours(24))
            .await
            .unwrap();
        assert_eq!(due.len(), 1);
        assert!(reminder::due_reminders(db.pool(), date - Duration::hours(25))
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_create_event_soon_gets_1h_reminder() {
        let db = test_db().await;
        let alice = user::create_user(db.pool(), "5551234567").await.unwrap();
        let tool = CreateEvent::new(db.clone());

        let date = Utc::now() + Duration::hours(2);
        let args = ToolArgs::from_json(&format!(
            r#"{{"name": "call mom", "date": "{}"}}"#,
            date.to_rfc3339()
        ))
        .unwrap();

        let output = tool.execute(alice.id, args).await.unwrap();
        assert!(output.success);

        let due = reminder::due_reminders(db.pool(), date - Duration::hours(1))
            .await
            .unwrap();
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].user_id, alice.id);
    }

    #[tokio::test]
    async fn test_unparseable_date_is_invalid_parameter() {
        let db = test_db().await;
        let tool = CreateEvent::new(db);

        let args = ToolArgs::from_json(r#"{"name": "x", "date": "sometime soon"}"#).unwrap();
        let result = tool.execute(1, args).await;
        assert!(matches!(result, Err(ToolError::InvalidParameter { .. })));
    }
}
