//! Schema definitions and migration utilities.
//!
//! The SQL lives in the workspace `migrations/` directory and is embedded at
//! compile time.

use sqlx::PgPool;

use crate::error::{StoreError, StoreResult};

/// Embedded migration SQL for the snippets schema (001_snippets.sql).
pub const SNIPPETS_MIGRATION: &str = include_str!("../../../migrations/001_snippets.sql");

/// Run all migrations against the database.
///
/// Idempotent: every statement checks for existing objects first.
///
/// # Errors
///
/// Returns an error if any migration fails to execute.
pub async fn run_migrations(pool: &PgPool) -> StoreResult<()> {
    tracing::info!("Running database migrations...");

    tracing::debug!("Running snippets migration (001_snippets.sql)...");
    sqlx::raw_sql(SNIPPETS_MIGRATION)
        .execute(pool)
        .await
        .map_err(|e| StoreError::MigrationError(format!("Snippets migration failed: {}", e)))?;

    tracing::info!("Migrations completed successfully");
    Ok(())
}

/// Check if the schema has been initialized.
///
/// Returns true if the `snippets` table exists.
pub async fn is_schema_initialized(pool: &PgPool) -> StoreResult<bool> {
    let result: (bool,) = sqlx::query_as(
        r#"
        SELECT EXISTS (
            SELECT FROM information_schema.tables
            WHERE table_schema = 'public'
            AND table_name = 'snippets'
        )
        "#,
    )
    .fetch_one(pool)
    .await?;

    Ok(result.0)
}
