//! Errors surfaced by the assistant's SQLite store.

use thiserror::Error;

/// Failure modes of the persistence layer.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// Query or connection failure from the underlying pool.
    #[error("sqlite failure: {0}")]
    Sqlx(#[from] sqlx::Error),

    /// A schema migration could not be applied.
    #[error("schema migration failed: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Lookup missed: no row for the given key.
    #[error("no {entity} with id {id}")]
    NotFound { entity: &'static str, id: String },

    /// A uniqueness rule was violated, such as registering the same phone
    /// number twice.
    #[error("{entity} {id} is already registered")]
    AlreadyExists { entity: &'static str, id: String },
}

/// Alias used throughout the store modules.
pub type Result<T> = std::result::Result<T, DatabaseError>;
