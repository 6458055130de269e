//! Error types for the storage layer.

use snippets_core::{InvalidChoice, SnippetId, UserId};
use thiserror::Error;

/// Result type alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Database connection or query error.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Snippet not found.
    #[error("snippet not found: {0}")]
    SnippetNotFound(SnippetId),

    /// User not found.
    #[error("user not found: {0}")]
    UserNotFound(UserId),

    /// A stored column holds a value the domain types reject.
    #[error("invalid stored value: {0}")]
    InvalidColumn(#[from] InvalidChoice),

    /// Migration error.
    #[error("migration error: {0}")]
    MigrationError(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    ConfigError(String),

    /// In-memory store lock was poisoned by a panicking writer.
    #[error("store lock poisoned")]
    Poisoned,
}
