//! Store schema
//!
//! The indexer owns the tables. [`apply`] exists so an empty store can be
//! created for tests and first runs.

use sqlx::SqlitePool;

use crate::Result;

/// DDL for `blocks`, `bulletins` and `blacklist`.
pub const SCHEMA: &str = include_str!("../schema.sql");

/// Create the tables and indexes if they do not exist yet.
pub async fn apply(pool: &SqlitePool) -> Result<()> {
    tracing::info!("Applying public record schema");
    sqlx::raw_sql(SCHEMA).execute(pool).await?;
    Ok(())
}
