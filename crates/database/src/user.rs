//! User operations.

use chrono::Utc;
use sqlx::SqlitePool;

use crate::error::{DatabaseError, Result};
use crate::models::{ConversationState, User};

/// Create a new user for the given national phone number.
pub async fn create_user(pool: &SqlitePool, phone_number: &str) -> Result<User> {
    let result = sqlx::query(
        r#"
        INSERT INTO users (phone_number, conversation_state, created_at)
        VALUES (?, ?, ?)
        "#,
    )
    .bind(phone_number)
    .bind(ConversationState::New.as_str())
    .bind(Utc::now())
    .execute(pool)
    .await
    .map_err(|e| {
        if let sqlx::Error::Database(ref db_err) = e {
            if db_err.is_unique_violation() {
                return DatabaseError::AlreadyExists {
                    entity: "User",
                    id: phone_number.to_string(),
                };
            }
        }
        DatabaseError::Sqlx(e)
    })?;

    get_user(pool, result.last_insert_rowid()).await
}

/// Get a user by id.
pub async fn get_user(pool: &SqlitePool, id: i64) -> Result<User> {
    sqlx::query_as::<_, User>(
        r#"
        SELECT id, phone_number, conversation_state, created_at
        FROM users
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| DatabaseError::NotFound {
        entity: "User",
        id: id.to_string(),
    })
}

/// Get a user by national phone number.
pub async fn get_user_by_phone(pool: &SqlitePool, phone_number: &str) -> Result<User> {
    sqlx::query_as::<_, User>(
        r#"
        SELECT id, phone_number, conversation_state, created_at
        FROM users
        WHERE phone_number = ?
        "#,
    )
    .bind(phone_number)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| DatabaseError::NotFound {
        entity: "User",
        id: phone_number.to_string(),
    })
}

/// Update a user's onboarding state.
pub async fn update_conversation_state(
    pool: &SqlitePool,
    id: i64,
    state: ConversationState,
) -> Result<()> {
    let result = sqlx::query(
        r#"
        UPDATE users
        SET conversation_state = ?
        WHERE id = ?
        "#,
    )
    .bind(state.as_str())
    .bind(id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DatabaseError::NotFound {
            entity: "User",
            id: id.to_string(),
        });
    }

    Ok(())
}

/// Count total users.
pub async fn count_users(pool: &SqlitePool) -> Result<i64> {
    let count = sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(*) FROM users
        "#,
    )
    .fetch_one(pool)
    .await?;

    Ok(count)
}
