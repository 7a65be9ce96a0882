//! Message operations. The conversation log is append-only.

use chrono::Utc;
use sqlx::SqlitePool;

use crate::error::Result;
use crate::models::{Message, NewMessage};

/// Append a batch of messages, in order, all timestamped at insert time.
pub async fn append_messages(pool: &SqlitePool, messages: &[NewMessage]) -> Result<()> {
    let mut tx = pool.begin().await?;

    for message in messages {
        sqlx::query(
            r#"
            INSERT INTO messages (user_id, role, content, tool_name, tool_call_id, tool_args, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(message.user_id)
        .bind(&message.role)
        .bind(&message.content)
        .bind(&message.tool_name)
        .bind(&message.tool_call_id)
        .bind(&message.tool_args)
        .bind(Utc::now())
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;
    Ok(())
}

/// Get the most recent `limit` messages for a user, newest first.
///
/// Callers building prompt context reverse the result to oldest-first.
pub async fn recent_messages(pool: &SqlitePool, user_id: i64, limit: i64) -> Result<Vec<Message>> {
    let messages = sqlx::query_as::<_, Message>(
        r#"
        SELECT id, user_id, role, content, tool_name, tool_call_id, tool_args, created_at
        FROM messages
        WHERE user_id = ?
        ORDER BY created_at DESC, id DESC
        LIMIT ?
        "#,
    )
    .bind(user_id)
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(messages)
}

/// Count messages for a user.
pub async fn count_messages(pool: &SqlitePool, user_id: i64) -> Result<i64> {
    let count = sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(*) FROM messages WHERE user_id = ?
        "#,
    )
    .bind(user_id)
    .fetch_one(pool)
    .await?;

    Ok(count)
}
