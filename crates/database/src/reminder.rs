//! Reminder operations and delivery lifecycle.
//!
//! Lifecycle: created unclaimed and unsent → claimed by exactly one
//! scheduler task via [`claim_reminder`] → marked sent after delivery.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use crate::error::{DatabaseError, Result};
use crate::models::Reminder;

/// Get a reminder by id.
pub async fn get_reminder(pool: &SqlitePool, id: i64) -> Result<Reminder> {
    sqlx::query_as::<_, Reminder>(
        r#"
        SELECT id, event_id, user_id, fire_at, claimed, sent, created_at
        FROM reminders
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| DatabaseError::NotFound {
        entity: "Reminder",
        id: id.to_string(),
    })
}

/// Get all unsent, unclaimed reminders due at or before `now`.
pub async fn due_reminders(pool: &SqlitePool, now: DateTime<Utc>) -> Result<Vec<Reminder>> {
    let reminders = sqlx::query_as::<_, Reminder>(
        r#"
        SELECT id, event_id, user_id, fire_at, claimed, sent, created_at
        FROM reminders
        WHERE sent = 0 AND claimed = 0 AND fire_at <= ?
        ORDER BY fire_at
        "#,
    )
    .bind(now)
    .fetch_all(pool)
    .await?;

    Ok(reminders)
}

/// Atomically claim a reminder for processing.
///
/// Returns true if this caller won the claim; false if another task (or a
/// previous tick) already holds it. The conditional update is the guard
/// against double delivery.
pub async fn claim_reminder(pool: &SqlitePool, id: i64) -> Result<bool> {
    let result = sqlx::query(
        r#"
        UPDATE reminders
        SET claimed = 1
        WHERE id = ? AND claimed = 0
        "#,
    )
    .bind(id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Hand a claim back so the next scan can pick the reminder up again.
///
/// Used when processing fails before delivery was attempted. A reminder
/// that was already sent is never released.
pub async fn release_reminder(pool: &SqlitePool, id: i64) -> Result<()> {
    sqlx::query(
        r#"
        UPDATE reminders
        SET claimed = 0
        WHERE id = ? AND sent = 0
        "#,
    )
    .bind(id)
    .execute(pool)
    .await?;

    Ok(())
}

/// Mark a reminder as sent after successful delivery.
pub async fn mark_reminder_sent(pool: &SqlitePool, id: i64) -> Result<()> {
    let result = sqlx::query(
        r#"
        UPDATE reminders
        SET sent = 1
        WHERE id = ?
        "#,
    )
    .bind(id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DatabaseError::NotFound {
            entity: "Reminder",
            id: id.to_string(),
        });
    }

    Ok(())
}
