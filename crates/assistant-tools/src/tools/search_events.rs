//! Search-events tool: finds the user's events around an anchor date.

use async_trait::async_trait;
use database::{event, Database};
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::error::ToolError;
use crate::schedule::search_window;
use crate::tool::{Tool, ToolArgs, ToolOutput};

/// Sentinel returned when the search window holds no events.
pub const NO_EVENTS_FOUND: &str = "No events found";

/// Tool that searches the acting user's events inside a padded window
/// around an anchor date: ±1.5 days for a weekend search, ±3.5 days for a
/// full-week search, ±1 day otherwise.
pub struct SearchEvents {
    db: Database,
}

impl SearchEvents {
    /// Create the tool backed by the given database.
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl Tool for SearchEvents {
    fn name(&self) -> &str {
        "search_events"
    }

    fn description(&self) -> &str {
        "Search the user's events around a date. Set is_weekend when the \
         user asks about a weekend, is_full_week when they ask about a \
         whole week."
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "date": {
                    "type": "string",
                    "description": "Anchor date-time in ISO 8601, resolved against the current date given in the instructions."
                },
                "is_weekend": {
                    "type": "boolean",
                    "description": "True when the user is asking about a weekend."
                },
                "is_full_week": {
                    "type": "boolean",
                    "description": "True when the user is asking about a whole week."
                }
            },
            "required": ["date"]
        })
    }

    async fn execute(&self, user_id: i64, args: ToolArgs) -> Result<ToolOutput, ToolError> {
        let anchor = args.get_datetime("date")?;
        let is_weekend = args.get_bool_or("is_weekend", false);
        let is_full_week = args.get_bool_or("is_full_week", false);

        let (start, end) = search_window(anchor, is_weekend, is_full_week);
        debug!(
            "Searching events for user {} in [{}, {}]",
            user_id, start, end
        );

        match event::events_in_range(self.db.pool(), user_id, start, end).await {
            Ok(events) if events.is_empty() => Ok(ToolOutput::success(NO_EVENTS_FOUND)),
            Ok(events) => {
                let names: Vec<&str> = events.iter().map(|e| e.name.as_str()).collect();
                Ok(ToolOutput::success(names.join(", ")))
            }
            Err(e) => {
                warn!("Event search failed for user {}: {}", user_id, e);
                Ok(ToolOutput::failure(format!(
                    "Could not search events: {}",
                    e
                )))
            }
        }
    }
}
