//! Event operations.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use crate::error::{DatabaseError, Result};
use crate::models::{Event, Reminder};

/// Event kind for one-off events (the only kind currently supported).
pub const KIND_ONE_TIME: &str = "one-time";

/// Get an event by id.
pub async fn get_event(pool: &SqlitePool, id: i64) -> Result<Event> {
    sqlx::query_as::<_, Event>(
        r#"
        SELECT id, user_id, name, date, kind, created_at
        FROM events
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| DatabaseError::NotFound {
        entity: "Event",
        id: id.to_string(),
    })
}

/// Create an event together with its derived reminder, atomically.
///
/// The two inserts share one transaction so a failure cannot leave an
/// event with no reminder.
pub async fn create_event_with_reminder(
    pool: &SqlitePool,
    user_id: i64,
    name: &str,
    date: DateTime<Utc>,
    fire_at: DateTime<Utc>,
) -> Result<(Event, Reminder)> {
    let now = Utc::now();
    let mut tx = pool.begin().await?;

    let event_id = sqlx::query(
        r#"
        INSERT INTO events (user_id, name, date, kind, created_at)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(user_id)
    .bind(name)
    .bind(date)
    .bind(KIND_ONE_TIME)
    .bind(now)
    .execute(&mut *tx)
    .await?
    .last_insert_rowid();

    let reminder_id = sqlx::query(
        r#"
        INSERT INTO reminders (event_id, user_id, fire_at, claimed, sent, created_at)
        VALUES (?, ?, ?, 0, 0, ?)
        "#,
    )
    .bind(event_id)
    .bind(user_id)
    .bind(fire_at)
    .bind(now)
    .execute(&mut *tx)
    .await?
    .last_insert_rowid();

    tx.commit().await?;

    let event = get_event(pool, event_id).await?;
    let reminder = crate::reminder::get_reminder(pool, reminder_id).await?;
    Ok((event, reminder))
}

/// Get a user's events with dates inside `[start, end]`, inclusive on both
/// ends, ordered by date.
pub async fn events_in_range(
    pool: &SqlitePool,
    user_id: i64,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Result<Vec<Event>> {
    let events = sqlx::query_as::<_, Event>(
        r#"
        SELECT id, user_id, name, date, kind, created_at
        FROM events
        WHERE user_id = ? AND date >= ? AND date <= ?
        ORDER BY date
        "#,
    )
    .bind(user_id)
    .bind(start)
    .bind(end)
    .fetch_all(pool)
    .await?;

    Ok(events)
}
